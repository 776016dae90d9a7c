//! Diagnostic CLI for the provider resolver.
//!
//! Everything here is offline: the commands inspect settings and the static
//! catalog, they never call a provider endpoint.

use {
    anyhow::Result,
    clap::{Parser, Subcommand},
    secrecy::ExposeSecret,
    tracing_subscriber::EnvFilter,
};

use {
    nova_config::{ProvidersConfig, discover_and_load},
    nova_providers::{
        ProviderId, failover_candidates, fallback_chain_for, profile, requires_api_key,
        resolve_config, validate_key,
    },
};

#[derive(Parser)]
#[command(name = "nova", about = "Nova — article engine provider tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the effective provider config from settings.
    Resolve {
        /// Provider to resolve instead of the configured selection.
        #[arg(long)]
        provider: Option<String>,
        /// Print as JSON.
        #[arg(long)]
        json: bool,
        /// Print the resolved API key instead of redacting it.
        #[arg(long)]
        show_key: bool,
    },
    /// Check an API key's structural format for a provider.
    CheckKey {
        #[arg(long)]
        provider: String,
        /// Key to check; the stored key is checked when omitted.
        #[arg(long)]
        key: Option<String>,
    },
    /// Print the failover order starting from a provider.
    Chain {
        /// Provider to start from; defaults to the configured selection.
        #[arg(long)]
        provider: Option<String>,
    },
    /// List the provider catalog.
    Providers,
}

/// ANSI color codes.
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() -> Result<()> {
    // Load .env before anything reads the ambient credential.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let settings = discover_and_load().providers;

    match cli.command {
        Commands::Resolve {
            provider,
            json,
            show_key,
        } => resolve(&settings, provider.as_deref(), json, show_key),
        Commands::CheckKey { provider, key } => check_key(&settings, &provider, key.as_deref()),
        Commands::Chain { provider } => chain(&settings, provider.as_deref()),
        Commands::Providers => list_providers(),
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn parse_provider(raw: &str) -> Result<ProviderId> {
    ProviderId::parse(raw).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown provider '{raw}' (expected one of: {})",
            ProviderId::ALL.map(|id| id.as_str()).join(", ")
        )
    })
}

fn resolve(
    settings: &ProvidersConfig,
    provider: Option<&str>,
    json: bool,
    show_key: bool,
) -> Result<()> {
    let override_id = provider.map(parse_provider).transpose()?;
    let config = resolve_config(settings, override_id);

    let key = config.api_key.as_ref().map(|k| k.expose_secret().as_str());
    let format_ok = validate_key(config.id, key);

    if json {
        let value = serde_json::json!({
            "id": config.id,
            "base_url": config.base_url,
            "model": config.model,
            "api_key": if show_key { serde_json::json!(key) } else { serde_json::json!(key.is_some()) },
            "key_format_valid": format_ok,
            "requires_api_key": requires_api_key(config.id),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{BOLD}provider{RESET}  {}", config.id);
    println!("endpoint  {}", config.base_url);
    println!("model     {}", config.model);
    match key {
        Some(k) if show_key => println!("api key   {k}"),
        Some(_) => println!("api key   [present]"),
        None if requires_api_key(config.id) => println!("api key   [missing]"),
        None => println!("api key   [ambient credential not set]"),
    }
    if key.is_some() {
        let verdict = if format_ok {
            format!("{GREEN}ok{RESET}")
        } else {
            format!("{RED}suspect{RESET}")
        };
        println!("format    {verdict}");
    }
    Ok(())
}

fn check_key(settings: &ProvidersConfig, provider: &str, key: Option<&str>) -> Result<()> {
    let id = parse_provider(provider)?;

    let stored;
    let key = match key {
        Some(k) => Some(k),
        None => {
            stored = settings.api_key(id.as_str()).cloned();
            stored.as_ref().map(|k| k.expose_secret().as_str())
        },
    };

    if key.is_none() {
        anyhow::bail!("no key given and none stored for {id}");
    }

    if validate_key(id, key) {
        println!("{GREEN}valid{RESET}: key matches the expected {id} format");
        Ok(())
    } else {
        println!("{RED}invalid{RESET}: key does not match the expected {id} format");
        std::process::exit(1);
    }
}

fn chain(settings: &ProvidersConfig, provider: Option<&str>) -> Result<()> {
    let raw = provider
        .map(ToString::to_string)
        .or_else(|| settings.selected.clone())
        .unwrap_or_else(|| ProviderId::DEFAULT.as_str().to_string());

    println!("fallback chain for {BOLD}{raw}{RESET}:");
    for id in fallback_chain_for(&raw) {
        let note = if settings.is_enabled(id.as_str()) {
            ""
        } else {
            " (disabled)"
        };
        println!("  -> {id}{note}");
    }

    if let Some(primary) = ProviderId::parse(&raw) {
        let order = failover_candidates(settings, primary)
            .iter()
            .map(|id| id.as_str())
            .collect::<Vec<_>>()
            .join(" -> ");
        println!("effective try order: {order}");
    }
    Ok(())
}

fn list_providers() -> Result<()> {
    for id in ProviderId::ALL {
        let p = profile(id);
        let key_source = if p.requires_api_key {
            "user-supplied key"
        } else {
            "ambient credential"
        };
        println!("{BOLD}{id}{RESET}");
        println!("  endpoint  {}", p.base_url);
        println!("  model     {}", p.model);
        println!("  key       {key_source}");
    }
    Ok(())
}
