//! Static failover ordering between providers.
//!
//! The order encodes assumed reliability/capability tiers, not live health,
//! which keeps failover behavior predictable and testable. The walk itself
//! is owned by the caller: this module only answers "what should I try
//! next" and "would this config ever authenticate".

use {secrecy::ExposeSecret, tracing::debug};

use nova_config::schema::ProvidersConfig;

use crate::{
    id::ProviderId,
    resolver::{ProviderConfig, requires_api_key, resolve_config, validate_key},
};

/// Fixed failover ordering per provider.
///
/// Invariants, checked in tests: a chain never contains the provider it
/// backs up and never repeats an entry.
#[must_use]
pub const fn fallback_chain(id: ProviderId) -> &'static [ProviderId] {
    use ProviderId::{Anthropic, Gemini, Llama, OpenAi};
    match id {
        Gemini => &[OpenAi, Anthropic],
        OpenAi => &[Gemini, Anthropic, Llama],
        Anthropic => &[Gemini, OpenAi],
        Llama => &[OpenAi, Gemini],
    }
}

/// Chain lookup for raw provider ids, e.g. straight out of loosely
/// validated settings. Unknown ids get a single-element chain holding the
/// default provider.
#[must_use]
pub fn fallback_chain_for(raw: &str) -> &'static [ProviderId] {
    match ProviderId::parse(raw) {
        Some(id) => fallback_chain(id),
        None => &[ProviderId::DEFAULT],
    }
}

/// Providers to try, in order: the primary first, then its chain, skipping
/// any provider the settings explicitly disable.
#[must_use]
pub fn failover_candidates(settings: &ProvidersConfig, primary: ProviderId) -> Vec<ProviderId> {
    std::iter::once(primary)
        .chain(fallback_chain(primary).iter().copied())
        .filter(|id| settings.is_enabled(id.as_str()))
        .collect()
}

/// Walk the failover candidates and resolve the first provider that is
/// immediately usable: either it needs no user key, or the key on file
/// passes the format check.
///
/// Live-call failures are still the caller's to handle and retry down the
/// chain; this only filters out configs that could never authenticate.
/// Returns the resolved config and the candidate's position in the walk.
#[must_use]
pub fn resolve_first_usable(
    settings: &ProvidersConfig,
    primary: ProviderId,
) -> Option<(ProviderConfig, usize)> {
    for (position, id) in failover_candidates(settings, primary).into_iter().enumerate() {
        let config = resolve_config(settings, Some(id));
        if is_usable(&config) {
            return Some((config, position));
        }
        debug!(provider = %id, "skipping failover candidate without a usable key");
    }
    None
}

fn is_usable(config: &ProviderConfig) -> bool {
    if !requires_api_key(config.id) {
        return true;
    }
    config
        .api_key
        .as_ref()
        .is_some_and(|key| validate_key(config.id, Some(key.expose_secret().as_str())))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use secrecy::Secret;

    use {super::*, nova_config::schema::ProviderEntry};

    fn entry(enabled: bool, api_key: Option<&str>) -> ProviderEntry {
        ProviderEntry {
            enabled,
            api_key: api_key.map(|k| Secret::new(k.to_string())),
        }
    }

    #[test]
    fn chains_never_self_reference_or_duplicate() {
        for id in ProviderId::ALL {
            let chain = fallback_chain(id);
            assert!(!chain.is_empty(), "{id} has an empty chain");
            assert!(!chain.contains(&id), "{id} chain references itself");
            for (i, entry) in chain.iter().enumerate() {
                assert!(!chain[i + 1..].contains(entry), "{id} chain repeats {entry}");
            }
        }
    }

    #[test]
    fn unknown_raw_id_gets_default_chain() {
        assert_eq!(fallback_chain_for("unknown-id"), &[ProviderId::Gemini]);
        assert_eq!(fallback_chain_for("openai"), fallback_chain(ProviderId::OpenAi));
    }

    #[test]
    fn candidates_start_with_primary() {
        let settings = ProvidersConfig::default();
        let candidates = failover_candidates(&settings, ProviderId::OpenAi);
        assert_eq!(candidates, vec![
            ProviderId::OpenAi,
            ProviderId::Gemini,
            ProviderId::Anthropic,
            ProviderId::Llama,
        ]);
    }

    #[test]
    fn candidates_skip_disabled_providers() {
        let mut settings = ProvidersConfig::default();
        settings.providers.insert("gemini".into(), entry(false, None));

        let candidates = failover_candidates(&settings, ProviderId::OpenAi);
        assert_eq!(candidates, vec![
            ProviderId::OpenAi,
            ProviderId::Anthropic,
            ProviderId::Llama,
        ]);
    }

    #[test]
    fn gemini_is_always_usable_as_a_candidate() {
        // No key anywhere: the walk from openai lands on gemini, which can
        // run on the ambient credential (present or not).
        let settings = ProvidersConfig::default();
        let (config, position) = resolve_first_usable(&settings, ProviderId::OpenAi).unwrap();
        assert_eq!(config.id, ProviderId::Gemini);
        assert_eq!(position, 1);
    }

    #[test]
    fn malformed_primary_key_fails_over() {
        let mut settings = ProvidersConfig::default();
        settings.providers.insert("openai".into(), entry(true, Some("bad-key")));
        settings.providers.insert("gemini".into(), entry(false, None));
        let anthropic_key = format!("sk-ant-{}", "a".repeat(95));
        settings
            .providers
            .insert("anthropic".into(), entry(true, Some(anthropic_key.as_str())));

        let (config, position) = resolve_first_usable(&settings, ProviderId::OpenAi).unwrap();
        assert_eq!(config.id, ProviderId::Anthropic);
        assert_eq!(position, 1);
    }

    #[test]
    fn well_formed_primary_key_wins() {
        let mut settings = ProvidersConfig::default();
        let key = format!("sk-{}", "a".repeat(32));
        settings.providers.insert("openai".into(), entry(true, Some(key.as_str())));

        let (config, position) = resolve_first_usable(&settings, ProviderId::OpenAi).unwrap();
        assert_eq!(config.id, ProviderId::OpenAi);
        assert_eq!(position, 0);
    }

    #[test]
    fn exhausted_chain_yields_none() {
        // Every candidate disabled or keyless: nothing usable remains.
        let mut settings = ProvidersConfig::default();
        for id in ProviderId::ALL {
            settings.providers.insert(id.as_str().into(), entry(false, None));
        }
        assert!(resolve_first_usable(&settings, ProviderId::OpenAi).is_none());
    }
}
