use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use shared::domain::Scores;
use thiserror::Error;
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "chess_client.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid server url '{url}': {source}")]
    ServerUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("server url '{0}' must use http or https")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_url: String,
    pub initial_scores: Scores,
    /// Left to the transport default when unset.
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080/".into(),
            initial_scores: Scores::default(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    server_url: Option<String>,
    request_timeout_secs: Option<u64>,
    initial_white_score: Option<f64>,
    initial_black_score: Option<f64>,
}

impl Settings {
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        parse_server_url(&self.server_url)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn with_server_url(mut self, server_url: &str) -> Result<Self, SettingsError> {
        self.server_url = parse_server_url(server_url)?.to_string();
        Ok(self)
    }

    /// Defaults, then the TOML file, then environment overrides.
    pub fn from_sources(
        file_contents: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        let mut settings = Settings::default();

        if let Some(raw) = file_contents {
            let file_cfg: SettingsFile = toml::from_str(raw)?;
            if let Some(v) = file_cfg.server_url {
                settings.server_url = v;
            }
            if let Some(v) = file_cfg.request_timeout_secs {
                settings.request_timeout_secs = Some(v);
            }
            if let Some(v) = file_cfg.initial_white_score {
                settings.initial_scores.white = v;
            }
            if let Some(v) = file_cfg.initial_black_score {
                settings.initial_scores.black = v;
            }
        }

        if let Some(v) = env("CHESS_SERVER_URL") {
            settings.server_url = v;
        }
        if let Some(v) = env("APP__SERVER_URL") {
            settings.server_url = v;
        }
        if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
            if let Ok(parsed) = v.parse::<u64>() {
                settings.request_timeout_secs = Some(parsed);
            }
        }
        if let Some(v) = env("APP__INITIAL_WHITE_SCORE") {
            if let Ok(parsed) = v.parse::<f64>() {
                settings.initial_scores.white = parsed;
            }
        }
        if let Some(v) = env("APP__INITIAL_BLACK_SCORE") {
            if let Ok(parsed) = v.parse::<f64>() {
                settings.initial_scores.black = parsed;
            }
        }

        settings.server_url = parse_server_url(&settings.server_url)?.to_string();
        Ok(settings)
    }
}

/// Reads `path`, or `chess_client.toml` in the working directory when no path
/// is given. Only an explicitly named file is required to exist.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    let contents = match path {
        Some(path) => Some(fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?),
        None => fs::read_to_string(DEFAULT_SETTINGS_FILE).ok(),
    };
    Settings::from_sources(contents.as_deref(), |key| std::env::var(key).ok())
}

/// Endpoints are joined onto the base, so it always ends with `/`.
fn parse_server_url(raw: &str) -> Result<Url, SettingsError> {
    let raw = raw.trim();
    let mut url = Url::parse(raw).map_err(|source| SettingsError::ServerUrl {
        url: raw.to_string(),
        source,
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(SettingsError::UnsupportedScheme(raw.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_file_or_env() {
        let settings = Settings::from_sources(None, env_from(&[])).expect("settings");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.initial_scores, Scores::new(38.0, 38.0));
        assert!(settings.request_timeout().is_none());
    }

    #[test]
    fn file_overrides_defaults_and_env_overrides_file() {
        let file = r#"
            server_url = "http://chess.internal:9000"
            request_timeout_secs = 15
            initial_white_score = 39.0
        "#;
        let settings = Settings::from_sources(
            Some(file),
            env_from(&[("APP__SERVER_URL", "https://play.example.com/backend")]),
        )
        .expect("settings");

        assert_eq!(settings.server_url, "https://play.example.com/backend/");
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(settings.initial_scores, Scores::new(39.0, 38.0));
    }

    #[test]
    fn app_prefixed_env_wins_over_plain_env() {
        let settings = Settings::from_sources(
            None,
            env_from(&[
                ("CHESS_SERVER_URL", "http://first:1"),
                ("APP__SERVER_URL", "http://second:2"),
            ]),
        )
        .expect("settings");
        assert_eq!(settings.server_url, "http://second:2/");
    }

    #[test]
    fn unparsable_numeric_env_is_ignored() {
        let settings = Settings::from_sources(
            None,
            env_from(&[("APP__REQUEST_TIMEOUT_SECS", "soon")]),
        )
        .expect("settings");
        assert!(settings.request_timeout_secs.is_none());
    }

    #[test]
    fn rejects_invalid_server_urls() {
        let err = Settings::from_sources(None, env_from(&[("CHESS_SERVER_URL", "not a url")]))
            .expect_err("invalid url");
        assert!(matches!(err, SettingsError::ServerUrl { .. }));

        let err = Settings::from_sources(None, env_from(&[("CHESS_SERVER_URL", "ftp://host/")]))
            .expect_err("bad scheme");
        assert!(matches!(err, SettingsError::UnsupportedScheme(_)));
    }

    #[test]
    fn rejects_unknown_file_keys() {
        let err = Settings::from_sources(Some("bind_addr = \"x\""), env_from(&[]))
            .expect_err("unknown key");
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = load_settings(Some(Path::new("/definitely/not/here.toml")))
            .expect_err("missing file");
        assert!(matches!(err, SettingsError::Read { .. }));
    }

    #[test]
    fn with_server_url_normalizes_trailing_slash() {
        let settings = Settings::default()
            .with_server_url("http://localhost:3000")
            .expect("url");
        assert_eq!(settings.server_url, "http://localhost:3000/");
    }
}
