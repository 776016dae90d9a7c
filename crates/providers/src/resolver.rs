//! Resolution of a provider id plus user settings into a usable config.

use std::{collections::HashMap, sync::LazyLock};

use {regex::Regex, secrecy::Secret, tracing::debug};

use nova_config::schema::ProvidersConfig;

use crate::{
    catalog::{AMBIENT_KEY_ENV_VARS, key_pattern, profile},
    id::ProviderId,
};

/// Fully resolved provider configuration: where to call, which model, and
/// which credential to present.
///
/// `base_url` and `model` always come from the static catalog and are never
/// empty. `api_key` may legitimately be absent; whether that is fatal is
/// the caller's decision at call time.
#[derive(Clone)]
pub struct ProviderConfig {
    pub id: ProviderId,
    pub api_key: Option<Secret<String>>,
    pub base_url: String,
    pub model: String,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("id", &self.id)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

/// True when the provider needs a key from the user's settings. Gemini is
/// the exception: it can run on the ambient deployment credential.
#[must_use]
pub const fn requires_api_key(id: ProviderId) -> bool {
    profile(id).requires_api_key
}

/// Resolve the effective provider config from settings.
///
/// `override_id` takes precedence over the settings' selected provider and
/// is how failover callers request a specific chain entry. An unknown or
/// absent selection falls back to [`ProviderId::DEFAULT`]. A missing key is
/// not an error here; see [`validate_key`] and the failover walk.
#[must_use]
pub fn resolve_config(
    settings: &ProvidersConfig,
    override_id: Option<ProviderId>,
) -> ProviderConfig {
    resolve_config_with_env(settings, override_id, |name| std::env::var(name).ok())
}

/// Implementation of [`resolve_config`] with an injectable env lookup so
/// tests can exercise the ambient-credential path without touching the
/// process environment.
pub(crate) fn resolve_config_with_env(
    settings: &ProvidersConfig,
    override_id: Option<ProviderId>,
    env: impl Fn(&str) -> Option<String>,
) -> ProviderConfig {
    let id = override_id.unwrap_or_else(|| effective_provider(settings));
    let row = profile(id);

    let api_key = if row.requires_api_key {
        settings.api_key(id.as_str()).cloned()
    } else {
        ambient_key(&env)
    };

    ProviderConfig {
        id,
        api_key,
        base_url: row.base_url.to_string(),
        model: row.model.to_string(),
    }
}

/// The provider the settings point at, defaulting permissively. Callers
/// that need strict validation should parse the id themselves first.
fn effective_provider(settings: &ProvidersConfig) -> ProviderId {
    match settings.selected.as_deref() {
        None => ProviderId::DEFAULT,
        Some(raw) => ProviderId::parse(raw).unwrap_or_else(|| {
            debug!(provider = raw, "unknown provider id, using default");
            ProviderId::DEFAULT
        }),
    }
}

fn ambient_key(env: &impl Fn(&str) -> Option<String>) -> Option<Secret<String>> {
    AMBIENT_KEY_ENV_VARS
        .iter()
        .find_map(|name| env(name).filter(|v| !v.trim().is_empty()))
        .map(Secret::new)
}

/// Validators compiled once from the catalog patterns. A pattern that fails
/// to compile leaves its provider without a validator rather than panicking.
static KEY_VALIDATORS: LazyLock<HashMap<ProviderId, Regex>> = LazyLock::new(|| {
    ProviderId::ALL
        .iter()
        .filter_map(|id| Regex::new(key_pattern(*id)).ok().map(|re| (*id, re)))
        .collect()
});

/// Structural format check for a candidate API key.
///
/// A cheap, synchronous guard against obviously malformed input before an
/// expensive network round trip. Never contacts the provider. Absent and
/// empty keys fail, as does a provider with no registered validator.
#[must_use]
pub fn validate_key(id: ProviderId, key: Option<&str>) -> bool {
    let Some(key) = key else {
        return false;
    };
    if key.is_empty() {
        return false;
    }
    KEY_VALIDATORS.get(&id).is_some_and(|re| re.is_match(key))
}
