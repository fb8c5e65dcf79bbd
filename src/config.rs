use crate::markers::MarkerSet;
use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

const APP_NAME: &str = "ordercal";
const CONFIG_VERSION: i64 = 1;
const CONFIG_PATH_ENV: &str = "ORDERCAL_CONFIG_PATH";
const DEFAULT_ENDPOINT: &str = "https://example.com/order";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Config {
    pub(crate) version: i64,
    #[serde(default)]
    pub(crate) order: Order,
    #[serde(default)]
    pub(crate) markers: Markers,
    #[serde(default)]
    pub(crate) log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            order: Order::default(),
            markers: Markers::default(),
            log: Log::default(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct Order {
    pub(crate) endpoint: Option<String>,
    pub(crate) timeout: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct Markers {
    #[serde(default)]
    pub(crate) offer_days: Vec<String>,
    #[serde(default)]
    pub(crate) order_days: Vec<String>,
    pub(crate) file: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct Log {
    pub(crate) file: Option<PathBuf>,
    pub(crate) level: Option<String>,
}

impl Config {
    pub(crate) fn default_path() -> Result<PathBuf> {
        resolve_path(env::var_os(CONFIG_PATH_ENV))
    }

    pub(crate) fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = {CONFIG_VERSION}` at the top",
                    path.display()
                )
            })?;
        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = {}",
                version,
                path.display(),
                CONFIG_VERSION
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        self.endpoint()?;
        self.timeout()?;
        Ok(())
    }

    pub(crate) fn endpoint(&self) -> Result<Url> {
        parse_endpoint(self.order.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT))
    }

    /// The order request timeout; `None` means requests never time out
    pub(crate) fn timeout(&self) -> Result<Option<Duration>> {
        let Some(raw) = self.order.timeout.as_deref() else {
            return Ok(None);
        };
        let timeout = parse_duration(raw)?;
        if timeout.is_zero() {
            bail!("order.timeout must be positive, got {raw:?}");
        }
        Ok(Some(timeout))
    }

    /// Collect the offer and order days from the config file and from the
    /// markers file, if any.  `file_override` takes the place of
    /// `markers.file`.
    pub(crate) fn markers(&self, file_override: Option<&Path>) -> Result<MarkerSet> {
        let mut markers = MarkerSet::new(
            self.markers.offer_days.iter().cloned(),
            self.markers.order_days.iter().cloned(),
        );
        if let Some(path) = file_override.or(self.markers.file.as_deref()) {
            markers.merge(MarkerSet::from_json_file(path)?);
        }
        Ok(markers)
    }

    pub(crate) fn log_file(&self) -> Result<PathBuf> {
        if let Some(path) = &self.log.file {
            return Ok(path.clone());
        }
        let cache_root = dirs::cache_dir()
            .ok_or_else(|| anyhow!("cannot resolve cache directory; set log.file in the config"))?;
        Ok(cache_root.join(APP_NAME).join(format!("{APP_NAME}.log")))
    }

    pub(crate) fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub(crate) fn example_config(path: &Path) -> String {
        format!(
            "# ordercal config\n# Place this file at: {}\n\nversion = {CONFIG_VERSION}\n\n[order]\nendpoint = \"{DEFAULT_ENDPOINT}\"\n# Optional; no timeout by default\n# timeout = \"10s\"\n\n[markers]\noffer_days = []\norder_days = []\n# JSON file of the form {{\"offer_days\": [...], \"order_days\": [...]}}\n# file = \"/absolute/path/to/markers.json\"\n\n[log]\n# Default is the platform cache dir (for example ~/.cache/ordercal/ordercal.log)\n# file = \"/absolute/path/to/ordercal.log\"\nlevel = \"{DEFAULT_LOG_LEVEL}\"\n",
            path.display(),
        )
    }
}

fn resolve_path(env_override: Option<OsString>) -> Result<PathBuf> {
    if let Some(path) = env_override {
        return Ok(PathBuf::from(path));
    }

    let config_root = dirs::config_dir().ok_or_else(|| {
        anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
    })?;
    Ok(config_root.join(APP_NAME).join("config.toml"))
}

pub(crate) fn parse_endpoint(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        bail!("order.endpoint must not be empty");
    }
    let url = Url::parse(raw).with_context(|| format!("invalid order endpoint {raw:?}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!(
            "order endpoint {raw:?} must use http or https, not {:?}",
            url.scheme()
        );
    }
    Ok(url)
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(mins.saturating_mul(60)));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 5s)")
}
