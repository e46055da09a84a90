//! Configuration loading.
//!
//! Settings live in `config.toml` under the platform config dir
//! (`~/.config/mps` on Linux), overridable with `--config` or `MPS_CONFIG`.
//! A missing file just means defaults; a malformed file is an error.
//!
//! ```toml
//! viewport_policy = "bounding-region"
//! request_timeout_secs = 15
//!
//! [default_area]
//! center = { lat = 52.52, lon = 13.405 }
//! radius_m = 5000
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coordinator::ViewportPolicy;
use crate::geo::{GeoCoordinate, SearchArea};

/// Fallback search scope: central Berlin, 5 km.
pub const DEFAULT_CENTER: GeoCoordinate = GeoCoordinate {
    lat: 52.5200,
    lon: 13.4050,
};
pub const DEFAULT_RADIUS_M: u32 = 5000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Camera behavior when results land.
    pub viewport_policy: ViewportPolicy,
    /// Search scope applied when a query does not bring its own.
    pub default_area: SearchArea,
    /// Per-request deadline; absent means wait indefinitely.
    pub request_timeout_secs: Option<u64>,
    /// Artificial latency for the fixture provider, for demoing loading states.
    pub fixture_latency_ms: u64,
    /// Alternate Nominatim endpoint, e.g. a self-hosted instance.
    pub nominatim_base_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            viewport_policy: ViewportPolicy::default(),
            default_area: SearchArea::new(DEFAULT_CENTER, DEFAULT_RADIUS_M),
            request_timeout_secs: None,
            fixture_latency_ms: 0,
            nominatim_base_url: None,
        }
    }
}

impl AppConfig {
    /// Load from an explicit path, or from the default location when `None`.
    /// A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })
    }

    /// `<platform config dir>/mps/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "mps").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn fixture_latency(&self) -> Duration {
        Duration::from_millis(self.fixture_latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_center_on_berlin() {
        let config = AppConfig::default();
        assert_eq!(config.default_area.center, DEFAULT_CENTER);
        assert_eq!(config.default_area.radius_m, DEFAULT_RADIUS_M);
        assert_eq!(config.viewport_policy, ViewportPolicy::FirstResult);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config.fixture_latency_ms, 0);
    }

    #[test]
    fn test_load_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
viewport_policy = "bounding-region"
request_timeout_secs = 15

[default_area]
center = { lat = 48.8566, lon = 2.3522 }
radius_m = 2000
"#,
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.viewport_policy, ViewportPolicy::BoundingRegion);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.default_area.radius_m, 2000);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "viewport_policy = 12").unwrap();
        assert!(matches!(
            AppConfig::load(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "viewport_polcy = \"first-result\"").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());
    }
}
