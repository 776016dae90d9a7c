//! Configuration loading, schema, and env substitution.
//!
//! Config files: `nova.toml`, `nova.yaml`, or `nova.json`
//! Searched in `./` then `~/.config/nova/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values. The loader only
//! reads settings; persisting edits belongs to whatever frontend owns them.

pub mod env_subst;
pub mod loader;
pub mod schema;

pub use {
    loader::{config_dir, discover_and_load, load_config},
    schema::{NovaConfig, ProviderEntry, ProvidersConfig},
};
