// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Sync plan: which remote secrets are required and how they are grouped
//! into Kubernetes secrets.

use crate::constants::{cluster, groups, keys, remote};
use crate::error::{Result, SyncError};
use crate::types::secret::SecretGroup;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SyncPlan {
    /// Remote secrets checked by validation. Derived from the groups when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    pub groups: Vec<GroupSpec>,
}

/// A set of remote secrets fetched together and written to one or more targets
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupSpec {
    pub name: String,
    pub fields: Vec<FieldSpec>,
    pub targets: Vec<TargetSpec>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    /// Key inside the Kubernetes secret
    pub key: String,
    /// Secret name in Secret Manager
    pub remote: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TargetSpec {
    /// Kubernetes secret name
    pub name: String,
    /// Subset of the group keys to write; all keys when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
}

fn field(key: &str, remote: &str) -> FieldSpec {
    FieldSpec {
        key: key.to_string(),
        remote: remote.to_string(),
    }
}

impl Default for SyncPlan {
    fn default() -> Self {
        SyncPlan {
            required: None,
            groups: vec![
                GroupSpec {
                    name: groups::DATABASE.to_string(),
                    fields: vec![
                        field(keys::PGPASSWORD, remote::POSTGRES_PASSWORD),
                        field(keys::PGUSER, remote::POSTGRES_USER),
                        field(keys::PGHOST, remote::POSTGRES_HOST),
                        field(keys::PGPORT, remote::POSTGRES_PORT),
                        field(keys::PGDATABASE, remote::POSTGRES_DATABASE),
                    ],
                    targets: vec![
                        TargetSpec {
                            name: cluster::DATABASE_SECRETS.to_string(),
                            keys: None,
                        },
                        TargetSpec {
                            name: cluster::LEGACY_PGPASSWORD.to_string(),
                            keys: Some(vec![keys::PGPASSWORD.to_string()]),
                        },
                    ],
                },
                GroupSpec {
                    name: groups::REDIS.to_string(),
                    fields: vec![
                        field(keys::REDIS_HOST, remote::REDIS_HOST),
                        field(keys::REDIS_PORT, remote::REDIS_PORT),
                    ],
                    targets: vec![TargetSpec {
                        name: cluster::REDIS_SECRETS.to_string(),
                        keys: None,
                    }],
                },
            ],
        }
    }
}

impl SyncPlan {
    /// Parse and check a plan from YAML
    pub fn from_yaml(content: &str) -> Result<Self> {
        let plan: SyncPlan = serde_yaml::from_str(content)
            .map_err(|e| SyncError::Plan(format!("Failed to parse plan: {}", e)))?;
        plan.check()?;
        Ok(plan)
    }

    /// Structural checks that would otherwise only surface halfway through a sync
    pub fn check(&self) -> Result<()> {
        if self.groups.is_empty() {
            return Err(SyncError::Plan("plan has no groups".to_string()));
        }
        if self.required.as_ref().is_some_and(Vec::is_empty) {
            return Err(SyncError::Plan(
                "required list is empty, validation would check nothing".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for group in &self.groups {
            if !seen.insert(group.name.as_str()) {
                return Err(SyncError::Plan(format!(
                    "group '{}' is defined more than once",
                    group.name
                )));
            }
            if group.fields.is_empty() {
                return Err(SyncError::Plan(format!(
                    "group '{}' has no fields",
                    group.name
                )));
            }
            if group.targets.is_empty() {
                return Err(SyncError::Plan(format!(
                    "group '{}' has no targets",
                    group.name
                )));
            }
            for target in &group.targets {
                if target.keys.as_ref().is_some_and(Vec::is_empty) {
                    return Err(SyncError::Plan(format!(
                        "target '{}' in group '{}' selects no keys",
                        target.name, group.name
                    )));
                }
                for key in target.keys.iter().flatten() {
                    if !group.fields.iter().any(|f| &f.key == key) {
                        return Err(SyncError::Plan(format!(
                            "target '{}' references unknown key '{}' in group '{}'",
                            target.name, key, group.name
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Remote secret names validation checks, in order and without duplicates
    pub fn required_secrets(&self) -> Vec<&str> {
        if let Some(required) = &self.required {
            return required.iter().map(String::as_str).collect();
        }

        let mut seen = HashSet::new();
        self.groups
            .iter()
            .flat_map(|g| g.fields.iter())
            .map(|f| f.remote.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    pub fn group(&self, name: &str) -> Option<&GroupSpec> {
        self.groups.iter().find(|g| g.name == name)
    }
}

impl TargetSpec {
    /// Select the keys of `data` this target receives
    pub fn project(&self, data: &SecretGroup) -> SecretGroup {
        match &self.keys {
            None => data.clone(),
            Some(keys) => data
                .iter()
                .filter(|(k, _)| keys.contains(k))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Keys this target is expected to hold for a given group
    pub fn expected_keys<'a>(&'a self, group: &'a GroupSpec) -> Vec<&'a str> {
        match &self.keys {
            None => group.fields.iter().map(|f| f.key.as_str()).collect(),
            Some(keys) => keys.iter().map(String::as_str).collect(),
        }
    }
}
