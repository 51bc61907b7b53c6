//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml`, then from `EXPENSES_*` environment variables
//! (e.g. `EXPENSES_SERVER__PORT=8080`).
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_SETTINGS_PATH: &str = "settings";

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    /// Path of the CSV file holding the expenses.
    pub store: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

#[derive(Debug, Parser)]
#[command(name = "expense_tracker", version)]
struct Args {
    /// Settings file path, with or without the `.toml` extension.
    #[arg(long, env = "EXPENSES_CONFIG")]
    config: Option<String>,
    /// Override the listening port.
    #[arg(long)]
    port: Option<u16>,
    /// Override the store path.
    #[arg(long)]
    store: Option<String>,
}

impl Settings {
    /// Parse command line arguments and load the settings they point to.
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        let path = args.config.as_deref().unwrap_or(DEFAULT_SETTINGS_PATH);
        let mut settings = Self::from_sources(path, environment())?;

        if let Some(port) = args.port {
            settings.server.port = port;
        }
        if let Some(store) = args.store {
            settings.server.store = store;
        }

        Ok(settings)
    }

    fn from_sources(path: &str, env: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "0.0.0.0")?
            .set_default("server.port", 5000_i64)?
            .set_default("server.store", "expenses.csv")?
            .add_source(File::with_name(path).required(false))
            .add_source(env)
            .build()?;

        settings.try_deserialize()
    }
}

/// `EXPENSES_*` variables, `__` separating nested keys.
fn environment() -> Environment {
    Environment::with_prefix("EXPENSES")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use config::Map;

    use super::*;

    fn environment_from(vars: &[(&str, &str)]) -> Environment {
        let vars: Map<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        environment().source(Some(vars))
    }

    #[test]
    fn defaults_apply_without_file() {
        let settings = Settings::from_sources("does/not/exist", environment_from(&[])).unwrap();
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.server.bind, "0.0.0.0");
        assert_eq!(settings.server.store, "expenses.csv");
        assert_eq!(settings.app.level, "info");
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[server]\nport = 8081\nstore = \"data/expenses.csv\"\n").unwrap();

        let settings =
            Settings::from_sources(path.to_str().unwrap(), environment_from(&[])).unwrap();
        assert_eq!(settings.server.port, 8081);
        assert_eq!(settings.server.store, "data/expenses.csv");
        assert_eq!(settings.server.bind, "0.0.0.0");
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[server]\nport = 8081\n").unwrap();

        let env = environment_from(&[
            ("EXPENSES_SERVER__PORT", "9000"),
            ("EXPENSES_APP__LEVEL", "debug"),
        ]);
        let settings = Settings::from_sources(path.to_str().unwrap(), env).unwrap();
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.app.level, "debug");
    }
}
