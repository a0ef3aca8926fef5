//! Configuration types for HR policy.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::models::PayComponent;

/// Metadata about the policy set.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyMetadata {
    /// Short code identifying the policy set (e.g., "default").
    pub code: String,
    /// The human-readable name of the policy set.
    pub name: String,
    /// The version or effective date of the policy.
    pub version: String,
    /// ISO currency code amounts are expressed in.
    pub currency: String,
}

/// Travel settings from policy.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct TravelPolicy {
    /// Per-night uplift paid for car travel when a trip does not specify one.
    pub default_car_uplift_per_night: Decimal,
}

/// GOSI settings from policy.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct GosiPolicy {
    /// The employee contribution as a percentage of the registered base.
    pub employee_rate_percent: Decimal,
    /// The maximum registered base that contributions are charged on.
    #[serde(default)]
    pub contribution_ceiling: Option<Decimal>,
}

/// The policy.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyFile {
    /// Policy metadata.
    pub policy: PolicyMetadata,
    /// Travel settings.
    pub travel: TravelPolicy,
    /// GOSI settings.
    pub gosi: GosiPolicy,
}

/// A travel destination with its per-night rate.
#[derive(Debug, Clone, Deserialize)]
pub struct Destination {
    /// The human-readable name of the destination.
    pub name: String,
    /// The per-night allowance rate.
    pub per_night_rate: Decimal,
}

/// Destinations configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct DestinationsConfig {
    /// Map of destination code to destination details.
    pub destinations: HashMap<String, Destination>,
}

/// Whether a template adds to or subtracts from pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// Added to the base salary.
    Allowance,
    /// Subtracted from gross pay.
    Deduction,
}

/// A reusable named allowance or deduction rule.
#[derive(Debug, Clone, Deserialize)]
pub struct PayComponentTemplate {
    /// The human-readable name of the template.
    pub name: String,
    /// Whether the template is an allowance or a deduction.
    pub kind: TemplateKind,
    /// Fixed amount, or percentage of base when `is_percentage_of_base`.
    pub amount: Decimal,
    /// Whether `amount` is a percentage of the base salary.
    #[serde(default)]
    pub is_percentage_of_base: bool,
}

impl PayComponentTemplate {
    /// Builds a pay component entry from this template.
    pub fn to_component(&self) -> PayComponent {
        PayComponent {
            name: self.name.clone(),
            amount: self.amount,
            is_percentage_of_base: self.is_percentage_of_base,
        }
    }
}

/// Templates configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesConfig {
    /// Map of template code to template details.
    pub templates: HashMap<String, PayComponentTemplate>,
}

/// The complete HR policy loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    policy: PolicyFile,
    destinations: HashMap<String, Destination>,
    templates: HashMap<String, PayComponentTemplate>,
}

impl PolicyConfig {
    /// Creates a new PolicyConfig from its component parts.
    pub fn new(
        policy: PolicyFile,
        destinations: HashMap<String, Destination>,
        templates: HashMap<String, PayComponentTemplate>,
    ) -> Self {
        Self {
            policy,
            destinations,
            templates,
        }
    }

    /// Returns the policy metadata.
    pub fn metadata(&self) -> &PolicyMetadata {
        &self.policy.policy
    }

    /// Returns the travel settings.
    pub fn travel(&self) -> &TravelPolicy {
        &self.policy.travel
    }

    /// Returns the GOSI settings.
    pub fn gosi(&self) -> &GosiPolicy {
        &self.policy.gosi
    }

    /// Returns all destinations.
    pub fn destinations(&self) -> &HashMap<String, Destination> {
        &self.destinations
    }

    /// Returns all pay component templates.
    pub fn templates(&self) -> &HashMap<String, PayComponentTemplate> {
        &self.templates
    }
}
