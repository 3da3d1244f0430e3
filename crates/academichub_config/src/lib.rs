//! Configuration for the AcademicHub push backend.
//!
//! Sources are layered in this order, later ones winning:
//!
//! 1. `config/default.*`
//! 2. `config/{RUN_ENV}.*` (`RUN_ENV` defaults to `debug`)
//! 3. environment variables prefixed with `PREFIX` (default `ACADEMICHUB`),
//!    nested keys separated by `__`, e.g. `ACADEMICHUB__SERVER__PORT=9000`
//!
//! Any string value equal to `secret_from_env` is then replaced from the
//! environment, see [`env_vars`].

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
use tracing::debug;

pub mod env_vars;
pub mod models;

pub use models::*;

/// Loads the layered configuration from the config directory and the environment.
///
/// The config directory is `CONFIG_DIR` if set, otherwise `./config`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env_vars::get_config_prefix();
    let config_dir = PathBuf::from(env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string()));

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);

    debug!(
        "Loading config from {} and {} (prefix {})",
        default_path.display(),
        env_path.display(),
        prefix
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(&prefix).separator(env_vars::CONFIG_SEPARATOR));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    apply_env_overrides_from_marker(raw_config)
}

/// Applies environment overrides based on "secret_from_env" markers in serialized config
pub fn apply_env_overrides_from_marker(config: AppConfig) -> Result<AppConfig, ConfigError> {
    let mut json = serde_json::to_value(&config)
        .map_err(|err| ConfigError::Message(format!("failed to serialize config: {err}")))?;
    env_vars::inject_env_vars(&mut json);
    serde_json::from_value(json)
        .map_err(|err| ConfigError::Message(format!("failed to rebuild config: {err}")))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// `DOTENV_OVERRIDE` names the file explicitly; otherwise a first command line
/// argument starting with `.env` is used, falling back to `.env`. Loading
/// happens at most once per process. Returns the path that was chosen.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config: AppConfig = serde_json::from_str(
            r#"{"server": {"host": "0.0.0.0", "port": 9000}, "firebase": {"project_id": "demo"}}"#,
        )
        .unwrap();

        assert!(!config.use_firebase);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.max_concurrent_requests, 10);
        assert_eq!(config.notify.body_max_chars, 100);
        assert_eq!(config.notify.sender_fallback, "Someone");

        let firebase = config.firebase.unwrap();
        assert_eq!(firebase.project_id.as_deref(), Some("demo"));
        assert_eq!(firebase.users_collection, "Users");
        assert_eq!(firebase.token_field, "fcmToken");
        assert_eq!(firebase.fcm_base_url, "https://fcm.googleapis.com");
        assert!(firebase.access_token.is_none());
    }

    #[test]
    fn test_marker_replaced_from_secret_env() {
        env::set_var("ACADEMICHUB_SECRET_FIREBASE_ACCESS_TOKEN", "from-env");

        let config = AppConfig {
            firebase: Some(FirebaseConfig {
                project_id: Some("demo".to_string()),
                access_token: Some("secret_from_env".to_string()),
                ..FirebaseConfig::default()
            }),
            ..AppConfig::default()
        };

        let config = apply_env_overrides_from_marker(config).unwrap();
        let firebase = config.firebase.unwrap();
        assert_eq!(firebase.access_token.as_deref(), Some("from-env"));
        assert_eq!(firebase.project_id.as_deref(), Some("demo"));

        env::remove_var("ACADEMICHUB_SECRET_FIREBASE_ACCESS_TOKEN");
    }
}
