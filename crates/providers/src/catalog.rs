//! Static provider catalog: endpoints, default models, and key sourcing.

use crate::id::ProviderId;

/// Environment variables consulted for the ambient Gemini credential, in
/// precedence order. `API_KEY` is the legacy deployment name.
pub const AMBIENT_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// One row of the provider catalog.
#[derive(Debug, Clone, Copy)]
pub struct ProviderProfile {
    pub id: ProviderId,
    /// Endpoint the generation client calls.
    pub base_url: &'static str,
    /// Default model sent to the endpoint.
    pub model: &'static str,
    /// Whether a user-supplied API key is required. Gemini can draw on the
    /// deployment-level credential instead.
    pub requires_api_key: bool,
}

/// Catalog lookup. Exhaustive, so a new [`ProviderId`] variant does not
/// compile until it has a profile.
pub const fn profile(id: ProviderId) -> ProviderProfile {
    match id {
        ProviderId::Gemini => ProviderProfile {
            id,
            base_url: "https://generativelanguage.googleapis.com",
            model: "gemini-3-pro-preview",
            requires_api_key: false,
        },
        ProviderId::OpenAi => ProviderProfile {
            id,
            base_url: "https://api.openai.com/v1/chat/completions",
            model: "gpt-4o",
            requires_api_key: true,
        },
        ProviderId::Anthropic => ProviderProfile {
            id,
            base_url: "https://api.anthropic.com/v1/messages",
            model: "claude-3-5-sonnet-latest",
            requires_api_key: true,
        },
        ProviderId::Llama => ProviderProfile {
            id,
            base_url: "https://api.groq.com/openai/v1/chat/completions",
            model: "llama-3.3-70b-versatile",
            requires_api_key: true,
        },
    }
}

/// Structural key-format pattern for each provider.
///
/// These are soft sanity checks, not authentication: providers change key
/// formats upstream, so the patterns stay loose about trailing length. A
/// key that matches can still be revoked, expired, or out of quota.
pub(crate) const fn key_pattern(id: ProviderId) -> &'static str {
    match id {
        ProviderId::Gemini => r"^[A-Za-z0-9_-]{39}$",
        ProviderId::OpenAi => r"^sk-[a-zA-Z0-9]{32,}$",
        ProviderId::Anthropic => r"^sk-ant-[a-zA-Z0-9-]{95,}$",
        ProviderId::Llama => r"^gsk_[a-zA-Z0-9]{32,}$",
    }
}
