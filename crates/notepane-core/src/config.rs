/// Start-up settings.
///
/// Resolved once at launch: environment variables first, then whatever the
/// command line overrides. Nothing here is written back to disk.
///
/// Settings are resolved before logging is configured (the log level is
/// one of them), so rejected values are collected in
/// [`Settings::warnings`] and emitted by [`Settings::log_warnings`] once a
/// subscriber is installed.
use crate::location::Location;
use std::str::FromStr;
use tracing::{warn, Level};

/// Vault to open at start-up.
pub const ENV_VAULT: &str = "NOTEPANE_VAULT";
/// `light` or `dark`.
pub const ENV_THEME: &str = "NOTEPANE_THEME";
/// `error`, `warn`, `info`, `debug` or `trace`.
pub const ENV_LOG: &str = "NOTEPANE_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Vault to scan on launch. `None` starts with the empty state.
    pub vault: Option<Location>,
    pub dark_mode: bool,
    pub log_level: Level,
    /// Values that were rejected while resolving, in the order seen.
    pub warnings: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault: None,
            dark_mode: true,
            log_level: Level::INFO,
            warnings: Vec::new(),
        }
    }
}

/// Command-line values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub vault: Option<String>,
    pub light: bool,
    pub log_level: Option<Level>,
}

impl Settings {
    /// Settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Settings from an arbitrary variable lookup. Unparseable values are
    /// ignored and recorded in `warnings`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(raw) = lookup(ENV_VAULT).filter(|v| !v.trim().is_empty()) {
            match Location::parse(&raw) {
                Ok(location) => settings.vault = Some(location),
                Err(e) => settings.reject(format!("Ignoring {ENV_VAULT}: {e}")),
            }
        }

        if let Some(raw) = lookup(ENV_THEME) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "light" => settings.dark_mode = false,
                "dark" => settings.dark_mode = true,
                other => settings.reject(format!(
                    "Ignoring {ENV_THEME}={other:?}: expected light or dark"
                )),
            }
        }

        if let Some(raw) = lookup(ENV_LOG) {
            match Level::from_str(raw.trim()) {
                Ok(level) => settings.log_level = level,
                Err(_) => settings.reject(format!("Ignoring {ENV_LOG}={raw:?}: not a log level")),
            }
        }

        settings
    }

    /// Apply command-line values on top of `self`.
    ///
    /// A vault argument that fails to parse keeps the environment's vault
    /// and is recorded in `warnings`.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(raw) = overrides.vault {
            match Location::parse(&raw) {
                Ok(location) if !location.is_zero() => self.vault = Some(location),
                Ok(_) => {}
                Err(e) => self.reject(format!("Ignoring vault argument: {e}")),
            }
        }
        if overrides.light {
            self.dark_mode = false;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        self
    }

    /// Emit every recorded warning through `tracing`. Call after the
    /// subscriber is installed.
    pub fn log_warnings(&self) {
        for message in &self.warnings {
            warn!("{message}");
        }
    }

    fn reject(&mut self, message: String) {
        self.warnings.push(message);
    }
}
