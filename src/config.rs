//! geoqr runtime configuration handling

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoQrConfig {
    /// QR rendering options
    pub qr: QrOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
    /// File the configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl GeoQrConfig {
    /// Load configuration from an explicit path, a discovered file, or defaults,
    /// then apply `GEOQR_*` environment overrides.
    ///
    /// Runs before logging is installed; callers report [`GeoQrConfig::source`]
    /// once a subscriber exists.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let source = match explicit_path {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let xdg = env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
                candidate_paths(&env::current_dir()?, xdg.as_deref())
                    .into_iter()
                    .find(|path| path.is_file())
            }
        };

        let mut config = match source {
            Some(ref path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.source = source;
        config.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    /// Read configuration from a concrete file path, picking the format by extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !matches!(ext.as_str(), "toml" | "yaml" | "yml") {
            return Err(Error::Config(format!(
                "Unsupported config format '{ext}' for {}, expected toml/yaml",
                path.display()
            )));
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;
        let parsed = if ext == "toml" {
            toml::from_str(&contents).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(&contents).map_err(|e| e.to_string())
        };

        parsed.map_err(|e| Error::Config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Apply `GEOQR_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.qr.apply_overrides(&lookup);
        self.logging.apply_overrides(&lookup);
    }
}

/// Config files looked for, in order, when no `--config` is given.
fn candidate_paths(cwd: &Path, xdg_config: Option<&Path>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = ["geoqr.toml", "geoqr.yaml", "geoqr.yml"]
        .iter()
        .map(|name| cwd.join(name))
        .collect();
    if let Some(base) = xdg_config {
        let base = base.join("geoqr");
        paths.extend(["config.toml", "config.yaml"].iter().map(|name| base.join(name)));
    }
    paths
}

/// QR error-correction level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum EccLevel {
    /// ~7% recovery
    L,
    /// ~15% recovery
    #[default]
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    H,
}

impl FromStr for EccLevel {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            _ => Err(format!(
                "Unknown error correction level '{value}', expected L, M, Q or H"
            )),
        }
    }
}

impl From<EccLevel> for qrcode::EcLevel {
    fn from(level: EccLevel) -> Self {
        match level {
            EccLevel::L => qrcode::EcLevel::L,
            EccLevel::M => qrcode::EcLevel::M,
            EccLevel::Q => qrcode::EcLevel::Q,
            EccLevel::H => qrcode::EcLevel::H,
        }
    }
}

/// QR rendering parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QrOptions {
    /// Error-correction level
    pub ecc: EccLevel,
    /// Pixels per QR module
    pub box_size: u32,
    /// Quiet-zone width in modules
    pub border: u32,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            ecc: EccLevel::M,
            box_size: 10,
            border: 2,
        }
    }
}

impl QrOptions {
    fn apply_overrides(&mut self, lookup: &dyn Fn(&str) -> Option<String>) {
        if let Some(ecc) = lookup("GEOQR_QR_ECC") {
            if let Ok(parsed) = ecc.parse::<EccLevel>() {
                self.ecc = parsed;
            }
        }
        if let Some(size) = lookup("GEOQR_QR_BOX_SIZE") {
            if let Ok(parsed) = size.parse::<u32>() {
                self.box_size = parsed;
            }
        }
        if let Some(border) = lookup("GEOQR_QR_BORDER") {
            if let Ok(parsed) = border.parse::<u32>() {
                self.border = parsed;
            }
        }
        self.box_size = self.box_size.max(1);
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `GEOQR_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stdout logging
    pub color: bool,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
        }
    }
}

impl LoggingOptions {
    fn apply_overrides(&mut self, lookup: &dyn Fn(&str) -> Option<String>) {
        if let Some(level) = lookup("GEOQR_LOG_LEVEL") {
            self.level = level;
        }
        if let Some(file) = lookup("GEOQR_LOG_FILE") {
            self.file = if file.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(file))
            };
        }
        if let Some(color) = lookup("GEOQR_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
    }
}
