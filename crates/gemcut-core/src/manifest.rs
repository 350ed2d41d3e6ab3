use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use gemcut_util::errors::GemcutError;

use crate::gem::{GemEntry, GemTable};
use crate::policy::PolicyValue;

/// The parsed representation of a `Gemcut.toml` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, rename = "gem")]
    pub gems: Vec<GemSpec>,

    /// Policies used by builds that leave theirs unspecified.
    #[serde(default)]
    pub defaults: BuildPolicies,

    #[serde(default, rename = "build")]
    pub builds: BTreeMap<String, BuildPolicies>,
}

/// A gem declaration from `[[gem]]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GemSpec {
    pub name: String,
    #[serde(default)]
    pub cname: Option<String>,
    #[serde(default)]
    pub deps: Vec<String>,
}

/// The `bundle`/`drop` pair of a `[build.<name>]` or `[defaults]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPolicies {
    #[serde(default, skip_serializing_if = "PolicyValue::is_unspecified")]
    pub bundle: PolicyValue,
    #[serde(default, skip_serializing_if = "PolicyValue::is_unspecified")]
    pub drop: PolicyValue,
}

impl BuildPolicies {
    pub fn new(bundle: PolicyValue, drop: PolicyValue) -> Self {
        Self { bundle, drop }
    }

    /// Fill unspecified policies from `defaults`.
    pub fn inherit(&self, defaults: &BuildPolicies) -> BuildPolicies {
        BuildPolicies {
            bundle: self.bundle.or_default_from(&defaults.bundle),
            drop: self.drop.or_default_from(&defaults.drop),
        }
    }
}

impl Manifest {
    /// Load and parse a `Gemcut.toml` from disk.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GemcutError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_str(&content)
    }

    /// Parse a `Gemcut.toml` from a string.
    pub fn from_str(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            GemcutError::Manifest {
                message: format!("Failed to parse Gemcut.toml: {e}"),
            }
            .into()
        })
    }

    /// Build the gem table, turning dependency names into indices.
    pub fn gem_table(&self) -> Result<GemTable, GemcutError> {
        let positions: BTreeMap<&str, usize> = self
            .gems
            .iter()
            .enumerate()
            .map(|(i, g)| (g.name.as_str(), i))
            .collect();

        let mut entries = Vec::with_capacity(self.gems.len());
        for spec in &self.gems {
            let mut deps = Vec::with_capacity(spec.deps.len());
            for dep in &spec.deps {
                let Some(&idx) = positions.get(dep.as_str()) else {
                    return Err(GemcutError::Manifest {
                        message: format!(
                            "gem '{}' depends on undeclared gem '{dep}'",
                            spec.name
                        ),
                    });
                };
                deps.push(idx);
            }
            let mut entry = GemEntry::new(spec.name.clone(), deps);
            if let Some(cname) = &spec.cname {
                entry = entry.with_cname(cname.clone());
            }
            entries.push(entry);
        }

        GemTable::new(entries)
    }

    /// Effective policies of one build, with `[defaults]` applied.
    pub fn build(&self, name: &str) -> Option<BuildPolicies> {
        self.builds.get(name).map(|b| b.inherit(&self.defaults))
    }

    /// Effective policies of every build, ordered by build name.
    pub fn effective_builds(&self) -> BTreeMap<String, BuildPolicies> {
        self.builds
            .iter()
            .map(|(name, b)| (name.clone(), b.inherit(&self.defaults)))
            .collect()
    }
}
