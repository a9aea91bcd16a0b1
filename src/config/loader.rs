//! Rule profile loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading named rule-set
//! profiles from YAML files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{AuditError, AuditResult};

use super::types::{RuleConfig, RuleOverrides, RuleProfile};

/// Name of the profile used when a run does not ask for one.
pub const DEFAULT_PROFILE: &str = "california_standard";

/// Loads and provides access to rule-set profiles.
///
/// # Directory Structure
///
/// ```text
/// config/profiles/
/// ├── california_standard.yaml
/// ├── five_hour_trigger.yaml
/// └── sixth_hour_deadline.yaml
/// ```
///
/// Each file holds one [`RuleProfile`]:
///
/// ```yaml
/// name: california_standard
/// version: "2025-07-01"
/// description: First meal by hour 5, waived at or below 6 hours
/// rules:
///   meal_deadline_hours: 5.0
///   waiver_limit_hours: 6.0
///   min_break_minutes: 30
/// ```
///
/// # Example
///
/// ```no_run
/// use meal_audit::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/profiles")?;
/// let profile = loader.get_profile("california_standard")?;
/// println!("Deadline: {}h", profile.rules.meal_deadline_hours);
/// # Ok::<(), meal_audit::error::AuditError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    profiles: BTreeMap<String, RuleProfile>,
}

impl ConfigLoader {
    /// Loads every `*.yaml` profile in the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The directory is missing or holds no profile files
    /// - Any file contains invalid YAML
    /// - Any profile carries rule values outside their permitted ranges
    pub fn load<P: AsRef<Path>>(path: P) -> AuditResult<Self> {
        let dir = path.as_ref();
        let dir_str = dir.display().to_string();

        if !dir.exists() {
            return Err(AuditError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| AuditError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut profiles = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| AuditError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                profiles.push(Self::load_yaml::<RuleProfile>(&path)?);
            }
        }

        if profiles.is_empty() {
            return Err(AuditError::ConfigNotFound {
                path: format!("{} (no profile files found)", dir_str),
            });
        }

        Self::from_profiles(profiles)
    }

    /// Builds a loader from profiles already in memory.
    ///
    /// Every profile is validated; a later profile with a duplicate name
    /// replaces the earlier one.
    pub fn from_profiles(profiles: Vec<RuleProfile>) -> AuditResult<Self> {
        let mut by_name = BTreeMap::new();
        for profile in profiles {
            profile.rules.validate()?;
            debug!(profile = %profile.name, version = %profile.version, "Loaded rule profile");
            by_name.insert(profile.name.clone(), profile);
        }
        Ok(Self { profiles: by_name })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> AuditResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| AuditError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| AuditError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Gets a profile by name.
    pub fn get_profile(&self, name: &str) -> AuditResult<&RuleProfile> {
        self.profiles
            .get(name)
            .ok_or_else(|| AuditError::ProfileNotFound {
                name: name.to_string(),
            })
    }

    /// Resolves the rules for a run: the named profile (or the default
    /// profile) with the optional overrides applied and validated.
    ///
    /// When no profile is named and the default profile was not loaded,
    /// the built-in [`RuleConfig::default`] is used.
    pub fn resolve_rules(
        &self,
        profile: Option<&str>,
        overrides: &RuleOverrides,
    ) -> AuditResult<(String, RuleConfig)> {
        let (name, base) = match profile {
            Some(name) => (name.to_string(), self.get_profile(name)?.rules),
            None => match self.profiles.get(DEFAULT_PROFILE) {
                Some(p) => (p.name.clone(), p.rules),
                None => (DEFAULT_PROFILE.to_string(), RuleConfig::default()),
            },
        };

        let rules = base.with_overrides(overrides);
        rules.validate()?;
        Ok((name, rules))
    }

    /// Returns all loaded profiles ordered by name.
    pub fn profiles(&self) -> impl Iterator<Item = &RuleProfile> {
        self.profiles.values()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        let profile = RuleProfile {
            name: DEFAULT_PROFILE.to_string(),
            version: "builtin".to_string(),
            description: "Built-in defaults".to_string(),
            rules: RuleConfig::default(),
        };
        Self {
            profiles: BTreeMap::from([(profile.name.clone(), profile)]),
        }
    }
}
