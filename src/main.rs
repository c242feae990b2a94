//! Notepane -- a small markdown note editor.
//!
//! Thin binary entry point. All logic lives in the `notepane-core` and
//! `notepane-gui` crates.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;
use notepane_core::access::ContentRouter;
use notepane_core::config::{Overrides, Settings};
use notepane_core::scanner::scan_vault;
use std::sync::Arc;

/// Browse and edit a folder of markdown notes.
#[derive(Parser, Debug)]
#[command(name = "notepane", version, about)]
struct Cli {
    /// Vault folder (or document URI) to open. Overrides NOTEPANE_VAULT.
    vault: Option<String>,

    /// Start in light mode.
    #[arg(long)]
    light: bool,

    /// Log level (error, warn, info, debug, trace). Overrides NOTEPANE_LOG.
    #[arg(long)]
    log_level: Option<tracing::Level>,

    /// Scan the vault, print its tree as JSON and exit.
    #[arg(long)]
    print_tree: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_env().with_overrides(Overrides {
        vault: cli.vault,
        light: cli.light,
        log_level: cli.log_level,
    });

    tracing_subscriber::fmt()
        .with_max_level(settings.log_level)
        .init();
    settings.log_warnings();

    let access = Arc::new(ContentRouter::new());

    if cli.print_tree {
        let vault = settings
            .vault
            .ok_or_else(|| anyhow::anyhow!("no vault given (pass a path or set NOTEPANE_VAULT)"))?;
        let tree = scan_vault(access.as_ref(), &vault)?;
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }

    tracing::info!("notepane starting");

    // Kick off the first scan before the window opens so the tree is
    // usually ready by the first frame.
    let state = notepane_gui::NotepaneState::build(&settings, access);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title(notepane_gui::state::APP_NAME)
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([360.0, 480.0])
            .with_icon(notepane_gui::icon::generate_icon(64)),
        ..Default::default()
    };

    eframe::run_native(
        notepane_gui::state::APP_NAME,
        options,
        Box::new(|cc| Ok(Box::new(notepane_gui::NotepaneApp::with_state(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
