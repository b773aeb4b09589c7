// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Top-level run policy: validation always precedes a sync.

use crate::error::Result;
use crate::remote::RemoteSecretStore;
use crate::sync::manager::Synchronizer;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Check the remote secrets without writing anything
    ValidateOnly,
    /// Validate, then sync; optionally read the written secrets back
    Sync { verify: bool },
}

/// Run one invocation and report whether it succeeded
pub async fn run(synchronizer: &Synchronizer, mode: RunMode) -> bool {
    match mode {
        RunMode::ValidateOnly => synchronizer.validate().await,
        RunMode::Sync { verify } => {
            if !synchronizer.validate().await {
                error!(
                    "❌ Secret validation failed. Run manage-secrets.sh to create missing secrets."
                );
                return false;
            }

            if !synchronizer.sync_all().await {
                return false;
            }

            if verify {
                let verified = synchronizer.verify().await;
                if verified {
                    info!("✅ Cluster secrets verified");
                }
                return verified;
            }

            true
        }
    }
}

/// Short names of the secrets in Secret Manager. Needs no cluster access.
pub async fn list_remote(remote: &dyn RemoteSecretStore) -> Result<Vec<String>> {
    let secrets = remote.list().await?;
    info!("Found {} secrets in Secret Manager", secrets.len());
    Ok(secrets.iter().map(|s| s.short_name().to_string()).collect())
}
