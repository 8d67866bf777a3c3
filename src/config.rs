//! Configuration loaded from YAML.
//!
//! Every field has a default, so a file only needs the values it changes:
//!
//! ```yaml
//! theme: light              # "dark" or "light"
//! window:
//!   title: "Neural Field"
//!   monitor_fraction: 0.8   # window size relative to the primary monitor
//!   show_debug: false
//! field:
//!   particle_count: 70
//!   connection_distance: 160.0
//!   repulsion_radius: 220.0
//!   repulsion_strength: 0.05
//!   speed_limit: 1.0        # omit or set to null for no limit
//!   timestep: per_frame     # or {elapsed: {reference_fps: 60.0}}
//!   seed: 42
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params::{FieldParams, Timestep};
use crate::theme::Theme;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub monitor_fraction: f32,
    pub show_debug: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Neural Field".to_string(),
            monitor_fraction: 0.8,
            show_debug: false,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub theme: Theme,
    pub window: WindowConfig,
    pub field: FieldParams,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let field = &self.field;

        positive("field.connection_distance", field.connection_distance)?;
        positive("field.repulsion_radius", field.repulsion_radius)?;
        positive("field.edge_width", field.edge_width)?;
        non_negative("field.repulsion_strength", field.repulsion_strength)?;
        non_negative("field.initial_speed", field.initial_speed)?;
        non_negative("field.min_radius", field.min_radius)?;
        non_negative("field.max_radius", field.max_radius)?;
        finite_span("field.initial_speed", -field.initial_speed, field.initial_speed)?;
        finite_span("field.max_radius", field.min_radius, field.max_radius)?;

        if field.max_radius < field.min_radius {
            return Err(ConfigError::Invalid {
                field: "field.max_radius",
                reason: format!(
                    "{} is smaller than min_radius {}",
                    field.max_radius, field.min_radius
                ),
            });
        }

        if let Some(limit) = field.speed_limit {
            positive("field.speed_limit", limit)?;
        }

        if let Timestep::Elapsed { reference_fps } = field.timestep {
            positive("field.timestep.reference_fps", reference_fps)?;
        }

        if !(self.window.monitor_fraction > 0.0 && self.window.monitor_fraction <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "window.monitor_fraction",
                reason: format!("{} is outside (0, 1]", self.window.monitor_fraction),
            });
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{} must be a positive number", value),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{} must not be negative", value),
        })
    }
}

// Particles are sampled uniformly from [low, high); the width must fit in an f32
fn finite_span(field: &'static str, low: f32, high: f32) -> Result<(), ConfigError> {
    if (high - low).is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("range {}..{} is too wide", low, high),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = AppConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.field.particle_count, 70);
        assert_eq!(config.field.timestep, Timestep::PerFrame);
        assert_eq!(config.field.speed_limit, Some(1.0));
    }

    #[test]
    fn partial_document_overrides_only_given_fields() {
        let yaml = "
theme: light
field:
  particle_count: 12
  speed_limit: null
  timestep:
    elapsed:
      reference_fps: 60.0
  seed: 9
";
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.field.particle_count, 12);
        assert_eq!(config.field.speed_limit, None);
        assert_eq!(config.field.timestep, Timestep::Elapsed { reference_fps: 60.0 });
        assert_eq!(config.field.seed, Some(9));
        assert_eq!(config.field.connection_distance, 160.0);
    }

    #[test]
    fn rejects_inverted_radius_range() {
        let err = AppConfig::from_yaml_str("field: {min_radius: 5.0, max_radius: 1.0}").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "field.max_radius", .. }));
    }

    #[test]
    fn rejects_unbounded_radius() {
        let err = AppConfig::from_yaml_str("field: {max_radius: .inf}").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "field.max_radius", .. }));
    }

    #[test]
    fn rejects_speed_range_that_overflows() {
        let err = AppConfig::from_yaml_str("field: {initial_speed: 3.0e38}").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "field.initial_speed", .. }));
    }

    #[test]
    fn timestep_reads_as_string_or_single_key_map() {
        let config = AppConfig::from_yaml_str("field: {timestep: per_frame}").unwrap();
        assert_eq!(config.field.timestep, Timestep::PerFrame);

        let config = AppConfig::from_yaml_str("field: {timestep: {elapsed: {reference_fps: 30.0}}}").unwrap();
        assert_eq!(config.field.timestep, Timestep::Elapsed { reference_fps: 30.0 });
    }

    #[test]
    fn rejects_zero_reference_fps() {
        let err = AppConfig::from_yaml_str("field: {timestep: {elapsed: {reference_fps: 0.0}}}").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "field.timestep.reference_fps", .. }));
    }

    #[test]
    fn rejects_non_positive_distance() {
        let err = AppConfig::from_yaml_str("field: {connection_distance: 0.0}").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "field.connection_distance", .. }));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = AppConfig::from_yaml_str("theme: [not, a, theme]").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AppConfig::load(Path::new("/definitely/not/here.yaml")).unwrap_err();
        match err {
            ConfigError::Io { path, .. } => assert_eq!(path, PathBuf::from("/definitely/not/here.yaml")),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
