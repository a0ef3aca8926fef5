//! Configuration loading and management for the HR engine.
//!
//! This module provides functionality to load HR policy from YAML files,
//! including travel destinations, allowance and deduction templates, and
//! GOSI settings.
//!
//! # Example
//!
//! ```no_run
//! use hr_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded policy: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    Destination, DestinationsConfig, GosiPolicy, PayComponentTemplate, PolicyConfig, PolicyFile,
    PolicyMetadata, TemplateKind, TemplatesConfig, TravelPolicy,
};
