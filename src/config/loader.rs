//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading HR policy
//! from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    Destination, DestinationsConfig, GosiPolicy, PayComponentTemplate, PolicyConfig, PolicyFile,
    PolicyMetadata, TemplateKind, TemplatesConfig,
};

/// Loads and provides access to HR policy configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── policy.yaml        # Metadata, travel and GOSI settings
/// ├── destinations.yaml  # Destination code -> per-night rate
/// └── templates.yaml     # Named allowance and deduction templates
/// ```
///
/// # Example
///
/// ```no_run
/// use hr_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// let destination = loader.get_destination("riyadh")?;
/// println!("{}: {} per night", destination.name, destination.per_night_rate);
/// # Ok::<(), hr_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PolicyConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any required file is missing or contains
    /// invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<PolicyFile>(&path.join("policy.yaml"))?;
        let destinations = Self::load_yaml::<DestinationsConfig>(&path.join("destinations.yaml"))?;
        let templates = Self::load_yaml::<TemplatesConfig>(&path.join("templates.yaml"))?;

        tracing::debug!(
            path = %path.display(),
            destinations = destinations.destinations.len(),
            templates = templates.templates.len(),
            "Loaded policy configuration"
        );

        Ok(Self::from_config(PolicyConfig::new(
            policy,
            destinations.destinations,
            templates.templates,
        )))
    }

    /// Wraps an already-built policy configuration.
    pub fn from_config(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying policy configuration.
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Returns the policy metadata.
    pub fn metadata(&self) -> &PolicyMetadata {
        self.config.metadata()
    }

    /// Gets a destination by its code.
    pub fn get_destination(&self, code: &str) -> EngineResult<&Destination> {
        self.config
            .destinations()
            .get(code)
            .ok_or_else(|| EngineError::DestinationNotFound {
                code: code.to_string(),
            })
    }

    /// Gets a pay component template by its code.
    pub fn get_template(&self, code: &str) -> EngineResult<&PayComponentTemplate> {
        self.config
            .templates()
            .get(code)
            .ok_or_else(|| EngineError::TemplateNotFound {
                code: code.to_string(),
            })
    }

    /// Gets a template by code, checking that it is of the expected kind.
    pub fn get_template_of_kind(
        &self,
        code: &str,
        kind: TemplateKind,
    ) -> EngineResult<&PayComponentTemplate> {
        let template = self.get_template(code)?;
        if template.kind != kind {
            return Err(EngineError::InvalidCompensation {
                field: code.to_string(),
                message: format!("template is a {:?}, expected a {:?}", template.kind, kind),
            });
        }
        Ok(template)
    }

    /// Returns the per-night car uplift used when a trip gives none.
    pub fn default_car_uplift(&self) -> Decimal {
        self.config.travel().default_car_uplift_per_night
    }

    /// Returns the GOSI settings.
    pub fn gosi(&self) -> &GosiPolicy {
        self.config.gosi()
    }
}
