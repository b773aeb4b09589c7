// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes client creation for the API backend

use crate::error::{Result, SyncError};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KConfig};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Create a client from an explicit kubeconfig file, a named context of the
/// default kubeconfig, or the inferred in-cluster/local configuration.
#[instrument]
pub async fn create_client(kubeconfig: Option<&Path>, context: Option<&str>) -> Result<Client> {
    let options = KubeConfigOptions {
        context: context.map(str::to_string),
        ..Default::default()
    };

    let config = match kubeconfig {
        Some(path) => {
            info!("Loading kubeconfig from {}", path.display());
            let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                SyncError::Kubeconfig(format!("Failed to read {}: {}", path.display(), e))
            })?;
            config_from_kubeconfig(&content, &options).await?
        }
        None if context.is_some() => KConfig::from_kubeconfig(&options)
            .await
            .map_err(|e| SyncError::Kubeconfig(format!("Failed to load context: {}", e)))?,
        None => KConfig::infer()
            .await
            .map_err(|e| SyncError::Kubeconfig(format!("Failed to infer config: {}", e)))?,
    };

    debug!("Using cluster {}", config.cluster_url);

    Client::try_from(config)
        .map_err(|e| SyncError::Kubeconfig(format!("Failed to create client: {}", e)))
}

/// Build a client config from a kubeconfig document
async fn config_from_kubeconfig(kubeconfig: &str, options: &KubeConfigOptions) -> Result<KConfig> {
    let parsed: Kubeconfig = serde_yaml::from_str(kubeconfig)
        .map_err(|e| SyncError::Kubeconfig(format!("Failed to parse kubeconfig: {}", e)))?;

    KConfig::from_custom_kubeconfig(parsed, options)
        .await
        .map_err(|e| SyncError::Kubeconfig(format!("Failed to create config: {}", e)))
}
