// config.rs
use crate::fetch::USER_AGENT;
use crate::registry::FieldAliases;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "parcel-lookup.toml";
pub const REGRID_TOKEN_ENV: &str = "REGRID_API_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("county name must not be blank")]
    BlankCountyName,
    #[error("county {0:?} is configured more than once")]
    DuplicateCounty(String),
    #[error("{context}: invalid URL {url:?} ({reason})")]
    InvalidUrl {
        context: String,
        url: String,
        reason: String,
    },
    #[error("county {0:?} needs a `url` for its parcel layer")]
    MissingUrl(String),
    #[error("county {0:?} uses a two-step lookup but has no [join] table")]
    MissingJoin(String),
    #[error("county {county:?}: join field `{field}` must not be blank")]
    BlankJoinField { county: String, field: &'static str },
    #[error("county {county:?}: buffer_deg must be in (0, 0.01], got {value}")]
    InvalidBuffer { county: String, value: f64 },
    #[error("{0}: timeout_secs must be greater than zero")]
    InvalidTimeout(String),
    #[error("county {0:?} uses Regrid but no token is set ({REGRID_TOKEN_ENV} or regrid.token)")]
    MissingRegridToken(String),
    #[error("workers must be greater than zero")]
    InvalidWorkers,
}

/// What to do when a county has no configured source or its source fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Answer with demo data tagged as such.
    #[default]
    Demo,
    /// Answer with an error.
    Error,
}

/// Forces demo data regardless of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoMode {
    #[default]
    Off,
    Always,
    /// Only for coordinates inside the Pennsylvania bounding box.
    InsidePennsylvania,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}
fn default_workers() -> usize {
    8
}
fn default_user_agent() -> String {
    USER_AGENT.to_string()
}
fn default_geocoder_url() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}
fn default_region_suffix() -> String {
    ", Pennsylvania, USA".to_string()
}
fn default_regrid_url() -> String {
    "https://app.regrid.com/api/v2/parcels/point".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_probe_timeout_secs() -> u64 {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub fallback: FallbackPolicy,
    #[serde(default)]
    pub demo_mode: DemoMode,
    #[serde(default)]
    pub geocoder: GeocoderSettings,
    #[serde(default)]
    pub regrid: RegridSettings,
    #[serde(default)]
    pub probe: ProbeSettings,
    #[serde(default)]
    pub counties: Vec<CountyEntry>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            workers: default_workers(),
            user_agent: default_user_agent(),
            fallback: FallbackPolicy::default(),
            demo_mode: DemoMode::default(),
            geocoder: GeocoderSettings::default(),
            regrid: RegridSettings::default(),
            probe: ProbeSettings::default(),
            counties: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderSettings {
    #[serde(default = "default_geocoder_url")]
    pub url: String,
    /// Appended to every address; empty disables it.
    #[serde(default = "default_region_suffix")]
    pub region_suffix: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            url: default_geocoder_url(),
            region_suffix: default_region_suffix(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GeocoderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Clone, Deserialize)]
pub struct RegridSettings {
    #[serde(default = "default_regrid_url")]
    pub url: String,
    /// Never compiled in; comes from the config file or `REGRID_API_TOKEN`.
    #[serde(default)]
    pub token: Option<String>,
    /// Query Regrid for counties that are not in the registry.
    #[serde(default)]
    pub use_for_unlisted_counties: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Overrides the built-in Regrid field aliases.
    #[serde(default)]
    pub fields: Option<FieldAliases>,
}

impl Default for RegridSettings {
    fn default() -> Self {
        Self {
            url: default_regrid_url(),
            token: None,
            use_for_unlisted_counties: false,
            timeout_secs: default_timeout_secs(),
            fields: None,
        }
    }
}

impl fmt::Debug for RegridSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegridSettings")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("use_for_unlisted_counties", &self.use_for_unlisted_counties)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl RegridSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The token, if one is set and non-blank.
    pub fn token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProbeSettings {
    #[serde(default = "default_probe_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_probe_timeout_secs(),
        }
    }
}

impl ProbeSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Which kind of upstream a county entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Arcgis,
    TwoStep,
    Regrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryKind {
    #[default]
    Envelope,
    Point,
}

pub fn default_buffer_deg() -> f64 {
    0.00045
}

/// A `[[counties]]` table as written in the config file. Checked and turned
/// into a `CountyConfig` when the registry is built.
#[derive(Debug, Clone, Deserialize)]
pub struct CountyEntry {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    pub source: SourceKind,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub geometry: GeometryKind,
    #[serde(default = "default_buffer_deg")]
    pub buffer_deg: f64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub fields: FieldAliases,
    #[serde(default)]
    pub join: Option<JoinEntry>,
}

/// Second table of a two-step lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct JoinEntry {
    pub url: String,
    /// Field on the parcel layer holding the join key.
    pub key_field: String,
    /// Field on the joined table matched against the key.
    pub match_field: String,
    #[serde(default)]
    pub fields: FieldAliases,
}

impl AppConfig {
    /// Load from `path` if given (it must exist), else from `parcel-lookup.toml`
    /// in the working directory if present, else built-in defaults. The Regrid
    /// token from the environment wins over the file.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) if !p.exists() => return Err(ConfigError::NotFound(p.to_path_buf())),
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        if let Ok(token) = std::env::var(REGRID_TOKEN_ENV) {
            if !token.trim().is_empty() {
                config.regrid.token = Some(token);
            }
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks the settings that are not part of the county registry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::InvalidWorkers);
        }
        check_url("geocoder", &self.geocoder.url)?;
        check_timeout("geocoder", self.geocoder.timeout_secs)?;
        check_url("regrid", &self.regrid.url)?;
        check_timeout("regrid", self.regrid.timeout_secs)?;
        check_timeout("probe", self.probe.timeout_secs)?;
        Ok(())
    }
}

pub(crate) fn check_url(context: &str, raw: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        context: context.to_string(),
        url: raw.to_string(),
        reason,
    };

    let parsed = url::Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {other}"))),
    }
}

pub(crate) fn check_timeout(context: &str, secs: u64) -> Result<(), ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidTimeout(context.to_string()));
    }
    Ok(())
}
