//! Provider catalog, key validation, and failover ordering.
//!
//! Given a requested provider and the user's settings, produce a fully
//! specified endpoint/model/key triple, or walk a static failover ordering
//! when the primary provider is unusable. Every operation here is a
//! stateless lookup over immutable tables plus the caller's settings
//! snapshot; live calls, retries, and timeouts belong to callers.

pub mod catalog;
pub mod failover;
pub mod id;
pub mod resolver;

pub use {
    catalog::{AMBIENT_KEY_ENV_VARS, ProviderProfile, profile},
    failover::{failover_candidates, fallback_chain, fallback_chain_for, resolve_first_usable},
    id::ProviderId,
    resolver::{ProviderConfig, requires_api_key, resolve_config, validate_key},
};
