//! Typed provider identifiers.

use serde::{Deserialize, Serialize};

/// Canonical provider keys used across config lookups, the catalog, and
/// failover chains.
///
/// This is a closed set: adding a provider means extending the catalog, the
/// key-format table, and the failover chains, all of which match
/// exhaustively on this enum, so a missing entry fails to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Gemini,
    OpenAi,
    Anthropic,
    Llama,
}

impl ProviderId {
    /// Every known provider, in catalog order.
    pub const ALL: [Self; 4] = [Self::Gemini, Self::OpenAi, Self::Anthropic, Self::Llama];

    /// Provider used when a requested id is unknown or absent.
    pub const DEFAULT: Self = Self::Gemini;

    /// Canonical provider key string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Llama => "llama",
        }
    }

    /// Parse user-facing provider ids into a typed key, accepting a few
    /// common aliases.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Some(Self::Gemini),
            "openai" => Some(Self::OpenAi),
            "anthropic" | "claude" => Some(Self::Anthropic),
            "llama" | "groq" => Some(Self::Llama),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::ProviderId;

    #[test]
    fn parses_canonical_ids() {
        for id in ProviderId::ALL {
            assert_eq!(ProviderId::parse(id.as_str()), Some(id));
        }
    }

    #[test]
    fn parses_aliases_and_whitespace() {
        assert_eq!(ProviderId::parse("claude"), Some(ProviderId::Anthropic));
        assert_eq!(ProviderId::parse("groq"), Some(ProviderId::Llama));
        assert_eq!(ProviderId::parse(" OpenAI "), Some(ProviderId::OpenAi));
    }

    #[test]
    fn rejects_unknown_ids() {
        assert_eq!(ProviderId::parse("unknown-id"), None);
        assert_eq!(ProviderId::parse(""), None);
    }

    #[test]
    fn serde_uses_canonical_strings() {
        let json = serde_json::to_string(&ProviderId::OpenAi).unwrap();
        assert_eq!(json, "\"openai\"");
        let id: ProviderId = serde_json::from_str("\"llama\"").unwrap();
        assert_eq!(id, ProviderId::Llama);
    }
}
