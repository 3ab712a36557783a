//! `storefront`: terminal client for the Storefront catalog.
//!
//! Sign in, browse products, mark favorites, sign out. The session token
//! survives restarts through the configured store (file, keyring, or
//! memory).
//!
//! Logs go to a file (default under the platform data directory) so they
//! never corrupt the terminal UI.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use storefront_config::{Config, StoreKind};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;

/// Terminal client for browsing the Storefront catalog.
#[derive(Parser, Debug)]
#[command(name = "storefront", version, about)]
struct Cli {
    /// API base URL (e.g., https://shop.example.com/api)
    #[arg(short = 'u', long, env = "STOREFRONT_URL")]
    url: Option<String>,

    /// Where the session token is kept: file, keyring, or memory
    #[arg(short = 's', long, env = "STOREFRONT_STORE")]
    store: Option<StoreKind>,

    /// Config file (defaults to the platform config directory)
    #[arg(short = 'c', long, env = "STOREFRONT_CONFIG")]
    config: Option<PathBuf>,

    /// Log file (defaults to the platform data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write the effective settings to the config file and exit
    #[arg(long)]
    save_config: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-only tracing; stdout belongs to the TUI. Hold the guard until exit.
fn setup_tracing(cli: &Cli) -> Result<WorkerGuard> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "storefront={level},storefront_core={level},storefront_api={level},storefront_config={level}"
        ))
    });

    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(storefront_config::log_path);
    let log_dir = log_file
        .parent()
        .map_or_else(|| PathBuf::from("."), PathBuf::from);
    std::fs::create_dir_all(&log_dir)
        .wrap_err_with(|| format!("cannot create log directory {}", log_dir.display()))?;
    let file_name = log_file
        .file_name()
        .map_or_else(|| "storefront.log".into(), ToOwned::to_owned);

    let appender = tracing_appender::rolling::never(log_dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    Ok(guard)
}

fn config_file(cli: &Cli) -> PathBuf {
    cli.config
        .clone()
        .unwrap_or_else(storefront_config::config_path)
}

/// Config file + env, then CLI flags on top.
fn load_settings(cli: &Cli) -> Result<Config> {
    let path = config_file(cli);
    let mut config = storefront_config::load_config_from(&path)
        .wrap_err_with(|| format!("failed to load {}", path.display()))?;

    if let Some(url) = &cli.url {
        config.api.base_url.clone_from(url);
    }
    if let Some(store) = cli.store {
        config.session.store = store;
    }
    Ok(config)
}

/// Persist `config` where [`load_settings`] reads it from.
fn save_settings(cli: &Cli, config: &Config) -> Result<PathBuf> {
    let path = config_file(cli);
    storefront_config::save_config_to(config, &path)
        .wrap_err_with(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;
    let _log_guard = setup_tracing(&cli)?;

    let config = load_settings(&cli)?;
    if cli.save_config {
        let path = save_settings(&cli, &config)?;
        info!(path = %path.display(), "config saved");
        println!("Saved settings to {}", path.display());
        return Ok(());
    }
    info!(
        url = %config.api.base_url,
        store = %config.session.store,
        "starting storefront"
    );

    let client = config.to_client()?;
    let tokens = config.token_store();

    let mut app = App::new(client, tokens, config.ui.title);
    app.run().await
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_file_settings() {
        let dir = std::env::temp_dir().join(format!("storefront-cli-{}", std::process::id()));
        let cli = Cli::parse_from([
            "storefront",
            "--url",
            "https://shop.example.com",
            "--store",
            "memory",
            "--config",
            dir.join("absent.toml").to_str().expect("utf-8 path"),
        ]);

        let config = load_settings(&cli).expect("settings");

        assert_eq!(config.api.base_url, "https://shop.example.com");
        assert_eq!(config.session.store, StoreKind::Memory);
        assert_eq!(config.api.products_path, "/products");
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");
        let cli = Cli::parse_from([
            "storefront",
            "--url",
            "https://shop.example.com",
            "--store",
            "keyring",
            "--config",
            path.to_str().expect("utf-8 path"),
            "--save-config",
        ]);
        assert!(cli.save_config);

        let config = load_settings(&cli).expect("settings");
        assert_eq!(save_settings(&cli, &config).expect("saved"), path);

        let reloaded = storefront_config::load_config_from(&path).expect("reload");
        assert_eq!(reloaded, config);
        assert_eq!(reloaded.session.store, StoreKind::Keyring);
    }
}
