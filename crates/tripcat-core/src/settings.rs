// crates/tripcat-core/src/settings.rs
use crate::error::Result;
use crate::raw::{FLAGS_URL, POSITIONS_URL};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

pub const SETTINGS_ENV: &str = "TRIPCAT_SETTINGS";
pub const DEFAULT_SETTINGS_FILE: &str = "tripcat.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedSettings {
    pub flags_url: String,
    pub positions_url: String,
    /// Request timeout; the HTTP client default applies when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Local copies of the feeds. Used instead of HTTP when both are set.
    #[serde(default)]
    pub flags_file: Option<PathBuf>,
    #[serde(default)]
    pub positions_file: Option<PathBuf>,
}

/// Connection details of the Appwrite project holding users and trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub endpoint: String,
    pub project_id: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Session secret for user-scoped calls (`/account`).
    #[serde(default)]
    pub session: Option<String>,
    pub database_id: String,
    pub user_collection_id: String,
    pub trip_collection_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub feeds: FeedSettings,
    #[serde(default)]
    pub backend: Option<BackendConfig>,
}

impl Settings {
    /// Defaults, then `$TRIPCAT_SETTINGS` (or `./tripcat.toml`) if present,
    /// then `TRIPCAT__*` environment variables.
    pub fn new() -> Result<Self> {
        let file = env::var(SETTINGS_ENV).unwrap_or_else(|_| String::from(DEFAULT_SETTINGS_FILE));
        Self::from_file(Path::new(&file), false)
    }

    /// Load with an explicit settings file. `required` controls whether a
    /// missing file is an error.
    pub fn from_file(path: &Path, required: bool) -> Result<Self> {
        Self::build(path, required, Environment::with_prefix("TRIPCAT").separator("__"))
    }

    fn build(path: &Path, required: bool, env: Environment) -> Result<Self> {
        let s = Config::builder()
            .set_default("feeds.flags_url", FLAGS_URL)?
            .set_default("feeds.positions_url", POSITIONS_URL)?
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(env);
        Ok(s.build()?.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_optional_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::from_file(&dir.path().join("absent.toml"), false).unwrap();
        assert_eq!(settings.feeds.flags_url, FLAGS_URL);
        assert_eq!(settings.feeds.positions_url, POSITIONS_URL);
        assert!(settings.backend.is_none());
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::from_file(&dir.path().join("absent.toml"), true).is_err());
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[feeds]
positions_url = "http://localhost:9000/positions"
timeout_secs = 5
flags_file = "data/flags.json.gz"
positions_file = "data/positions.json.gz"

[backend]
endpoint = "https://cloud.appwrite.io/v1"
project_id = "travel"
database_id = "main"
user_collection_id = "users"
trip_collection_id = "trips"
"#
        )
        .unwrap();

        let settings = Settings::from_file(file.path(), true).unwrap();
        assert_eq!(settings.feeds.flags_url, FLAGS_URL);
        assert_eq!(settings.feeds.positions_url, "http://localhost:9000/positions");
        assert_eq!(settings.feeds.timeout_secs, Some(5));
        assert_eq!(
            settings.feeds.flags_file.as_deref(),
            Some(Path::new("data/flags.json.gz"))
        );
        let backend = settings.backend.unwrap();
        assert_eq!(backend.project_id, "travel");
        assert_eq!(backend.api_key, None);
    }

    #[test]
    fn environment_overrides_the_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[feeds]\ntimeout_secs = 5").unwrap();

        let vars: config::Map<String, String> = [
            ("TRIPCAT__FEEDS__TIMEOUT_SECS", "7"),
            ("TRIPCAT__FEEDS__FLAGS_URL", "http://localhost:9000/flags"),
            ("OTHER__FEEDS__POSITIONS_URL", "http://ignored"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();
        let env = Environment::with_prefix("TRIPCAT")
            .separator("__")
            .source(Some(vars));

        let settings = Settings::build(file.path(), true, env).unwrap();
        assert_eq!(settings.feeds.timeout_secs, Some(7));
        assert_eq!(settings.feeds.flags_url, "http://localhost:9000/flags");
        assert_eq!(settings.feeds.positions_url, POSITIONS_URL);
    }
}
