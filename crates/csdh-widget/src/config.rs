use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use csdh_score::dataset::ReferenceDataset;

use crate::error::WidgetError;
use crate::styles::DocumentStyles;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

const CONFIG_FILE: &str = "widget.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Schema version. A file without one is read as [`CURRENT_VERSION`].
    #[serde(default = "current_version")]
    pub config_version: u32,
    #[serde(default)]
    pub gauge: GaugeGeometry,
    /// Upper end of the gauge and the `/N` beside the score. `None` derives it
    /// from the factor weights; an explicit value may only widen the scale.
    #[serde(default)]
    pub display_max_score: Option<u32>,
    #[serde(default)]
    pub document: DocumentStyles,
}

fn current_version() -> u32 {
    CURRENT_VERSION
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            gauge: GaugeGeometry::default(),
            display_max_score: None,
            document: DocumentStyles::default(),
        }
    }
}

impl WidgetConfig {
    /// The maximum shown on the gauge for `dataset`.
    pub fn display_max(&self, dataset: &ReferenceDataset) -> Result<u32, WidgetError> {
        let required = dataset.max_score();
        match self.display_max_score {
            None => Ok(required),
            Some(configured) if configured < required || configured == 0 => {
                Err(WidgetError::DisplayMaxTooSmall {
                    configured,
                    required,
                })
            }
            Some(configured) => Ok(configured),
        }
    }
}

/// SVG geometry of the semicircular gauge, in viewBox units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeGeometry {
    pub width: f64,
    pub height: f64,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub needle_length: f64,
    pub stroke_width: f64,
}

impl Default for GaugeGeometry {
    fn default() -> Self {
        Self {
            width: 240.0,
            height: 140.0,
            cx: 120.0,
            cy: 110.0,
            radius: 88.0,
            needle_length: 70.0,
            stroke_width: 16.0,
        }
    }
}

fn config_dir() -> Result<PathBuf, WidgetError> {
    let base = dirs::config_dir().ok_or(WidgetError::NoConfigDir)?;
    Ok(base.join("com.csdh.reoperation"))
}

pub fn config_path() -> Result<PathBuf, WidgetError> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Load the per-user config, falling back to defaults when none exists.
pub fn load_config() -> Result<WidgetConfig, WidgetError> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<WidgetConfig, WidgetError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no widget config, using defaults");
        return Ok(WidgetConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|source| WidgetError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_config(&contents)?;
    tracing::info!(path = %path.display(), version = config.config_version, "widget config loaded");
    Ok(config)
}

/// Parse config JSON, migrating older shapes to [`CURRENT_VERSION`].
pub fn parse_config(contents: &str) -> Result<WidgetConfig, WidgetError> {
    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = match json.get("config_version") {
        None => CURRENT_VERSION,
        Some(value) => {
            let raw = value.as_u64().ok_or_else(|| {
                WidgetError::InvalidConfig(format!(
                    "config_version must be a non-negative integer, found {value}"
                ))
            })?;
            u32::try_from(raw).map_err(|_| WidgetError::UnsupportedConfigVersion {
                found: raw,
                supported: CURRENT_VERSION,
            })?
        }
    };

    let migrated = migrate(json, on_disk_version)?;
    let config: WidgetConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
/// Version 1 is the first shape, so there is nothing to migrate yet.
fn migrate(json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, WidgetError> {
    if from_version > CURRENT_VERSION {
        return Err(WidgetError::UnsupportedConfigVersion {
            found: u64::from(from_version),
            supported: CURRENT_VERSION,
        });
    }
    if from_version == 0 {
        return Err(WidgetError::InvalidConfig(
            "config_version starts at 1".to_string(),
        ));
    }
    if !json.is_object() {
        return Err(WidgetError::InvalidConfig(
            "config is not a JSON object".to_string(),
        ));
    }

    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use csdh_score::dataset::csdh_reoperation;

    #[test]
    fn empty_object_yields_defaults() {
        let config = parse_config("{}").unwrap();
        assert_eq!(config.config_version, 1);
        assert_eq!(config.gauge, GaugeGeometry::default());
        assert_eq!(config.display_max_score, None);
    }

    #[test]
    fn partial_gauge_keeps_other_defaults() {
        let config = parse_config(r#"{"config_version": 1, "gauge": {"radius": 90.0}}"#).unwrap();
        assert_eq!(config.gauge.radius, 90.0);
        assert_eq!(config.gauge.cx, 120.0);
        assert_eq!(config.display_max_score, None);
    }

    #[test]
    fn version_zero_is_rejected() {
        assert!(matches!(
            parse_config(r#"{"config_version": 0}"#),
            Err(WidgetError::InvalidConfig(_))
        ));
    }

    #[test]
    fn out_of_range_version_is_not_truncated() {
        let err = parse_config(r#"{"config_version": 4294967297}"#).unwrap_err();
        assert!(matches!(
            err,
            WidgetError::UnsupportedConfigVersion {
                found: 4294967297,
                supported: 1
            }
        ));
    }

    #[test]
    fn non_integer_version_is_rejected() {
        assert!(matches!(
            parse_config(r#"{"config_version": "1"}"#),
            Err(WidgetError::InvalidConfig(_))
        ));
        assert!(matches!(
            parse_config(r#"{"config_version": -1}"#),
            Err(WidgetError::InvalidConfig(_))
        ));
    }

    #[test]
    fn newer_version_is_rejected() {
        let err = parse_config(r#"{"config_version": 7}"#).unwrap_err();
        assert!(matches!(
            err,
            WidgetError::UnsupportedConfigVersion {
                found: 7,
                supported: 1
            }
        ));
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(matches!(parse_config("[1, 2]"), Err(WidgetError::InvalidConfig(_))));
    }

    #[test]
    fn display_max_derives_from_factor_weights() {
        let dataset = csdh_reoperation();
        let config = WidgetConfig::default();
        assert_eq!(config.display_max(dataset).unwrap(), 8);
    }

    #[test]
    fn display_max_cannot_undercut_factor_weights() {
        let dataset = csdh_reoperation();
        let config = WidgetConfig {
            display_max_score: Some(6),
            ..WidgetConfig::default()
        };
        assert!(matches!(
            config.display_max(dataset),
            Err(WidgetError::DisplayMaxTooSmall {
                configured: 6,
                required: 8
            })
        ));

        let wider = WidgetConfig {
            display_max_score: Some(10),
            ..WidgetConfig::default()
        };
        assert_eq!(wider.display_max(dataset).unwrap(), 10);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("csdh-widget-config-does-not-exist.json");
        let config = load_config_from(&path).unwrap();
        assert_eq!(config, WidgetConfig::default());
    }

    #[test]
    fn loads_file_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "csdh-widget-config-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"config_version": 1, "display_max_score": 12}"#).unwrap();
        let config = load_config_from(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.display_max_score, Some(12));
    }
}
