/// Replace `${ENV_VAR}` placeholders in config string values.
///
/// Unresolvable variables are left as-is.
pub fn substitute_env(input: &str) -> String {
    substitute_with(input, |name| std::env::var(name).ok())
}

/// Replace `${ENV_VAR}` placeholders using a custom lookup function.
///
/// Separate from [`substitute_env`] so tests don't have to mutate the
/// process environment.
fn substitute_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) if end > 0 => {
                let name = &after[..end];
                match lookup(name) {
                    Some(value) => out.push_str(&value),
                    None => {
                        // Leave unresolved placeholder as-is.
                        out.push_str("${");
                        out.push_str(name);
                        out.push('}');
                    },
                }
                rest = &after[end + 1..];
            },
            // Empty or unterminated placeholder: emit the `${` literally and
            // let the remainder flow through unchanged.
            _ => {
                out.push_str("${");
                rest = after;
            },
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_known_var() {
        let lookup = |name: &str| match name {
            "NOVA_TEST_VAR" => Some("hello".to_string()),
            _ => None,
        };
        assert_eq!(substitute_with("key=${NOVA_TEST_VAR}", lookup), "key=hello");
    }

    #[test]
    fn leaves_unknown_var() {
        let lookup = |_: &str| None;
        assert_eq!(
            substitute_with("${NOVA_NONEXISTENT_XYZ}", lookup),
            "${NOVA_NONEXISTENT_XYZ}"
        );
    }

    #[test]
    fn substitutes_multiple_vars() {
        let lookup = |name: &str| Some(format!("<{name}>"));
        assert_eq!(substitute_with("${A}-${B}", lookup), "<A>-<B>");
    }

    #[test]
    fn malformed_placeholders_pass_through() {
        let lookup = |_: &str| Some("x".to_string());
        assert_eq!(substitute_with("${}", lookup), "${}");
        assert_eq!(substitute_with("tail ${OPEN", lookup), "tail ${OPEN");
    }

    #[test]
    fn no_placeholders() {
        assert_eq!(substitute_env("plain text"), "plain text");
    }
}
