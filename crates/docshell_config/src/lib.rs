//! Configuration loading for Docshell.
//!
//! Settings are layered: `config/default.toml`, then `config/<RUN_ENV>.toml`,
//! then environment variables prefixed with `DOCSHELL__` (nested keys joined
//! with `__`, e.g. `DOCSHELL__DATABASE__URL`). Both files are optional.

use config::{Config, Environment, File, FileFormat};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod models;
pub use config::ConfigError;
pub use models::*;

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "DOCSHELL";

/// Loads the configuration from the default config directory.
///
/// The directory is `config/` relative to the working directory unless
/// `DOCSHELL_CONFIG_DIR` points elsewhere. `RUN_ENV` selects the
/// environment-specific file and defaults to `debug`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let config_dir = env::var("DOCSHELL_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());

    load_config_from(&config_dir, &run_env)
}

/// Loads the configuration from an explicit directory and run environment.
pub fn load_config_from(config_dir: &Path, run_env: &str) -> Result<AppConfig, ConfigError> {
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);

    debug!("config: default_path: {}", default_path.display());
    debug!("config: env_path: {}", env_path.display());

    let builder = Config::builder()
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    builder.build()?.try_deserialize()
}

/// Parses a configuration from an inline TOML document, without file or
/// environment layers.
pub fn parse_config_str(toml: &str) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is `.env` unless `DOTENV_OVERRIDE` names another one. Loading
/// happens at most once per process; a missing file is not an error.
/// Returns the path that was (or would have been) loaded.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config = parse_config_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 3000

            [database]
            url = "mongodb://localhost:27017"
            name = "shop"

            [web]
            dir = "dist"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        let database = config.database.unwrap();
        assert_eq!(database.url, "mongodb://localhost:27017");
        assert_eq!(database.name.as_deref(), Some("shop"));
        let web = config.web.unwrap();
        assert_eq!(web.dir, "dist");
        assert_eq!(web.index, "index.html");
    }

    #[test]
    fn optional_sections_default_to_none() {
        let config = parse_config_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080
            "#,
        )
        .unwrap();

        assert!(config.database.is_none());
        assert!(config.web.is_none());
    }

    #[test]
    fn missing_server_section_is_an_error() {
        let result = parse_config_str(
            r#"
            [database]
            url = "memory://"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn environment_overrides_files() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("does-not-exist");
        env::set_var("DOCSHELL__SERVER__HOST", "10.0.0.1");
        env::set_var("DOCSHELL__SERVER__PORT", "9090");

        let config = load_config_from(&dir, "test").unwrap();

        env::remove_var("DOCSHELL__SERVER__HOST");
        env::remove_var("DOCSHELL__SERVER__PORT");

        assert_eq!(config.server.host, "10.0.0.1");
        assert_eq!(config.server.port, 9090);
    }
}
