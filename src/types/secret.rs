// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Logical key to plain-text secret value, as written into one cluster secret
pub type SecretGroup = BTreeMap<String, String>;

/// One entry of `gcloud secrets list --format json`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecretDescriptor {
    /// Full resource name, `projects/<project>/secrets/<name>`
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
}

impl SecretDescriptor {
    /// The secret name without the project prefix
    pub fn short_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// The part of `kubectl get secret -o json` we consume
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ClusterSecretManifest {
    #[serde(default)]
    pub data: Option<BTreeMap<String, String>>,
}
