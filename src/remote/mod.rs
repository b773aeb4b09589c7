// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reading secrets from GCP Secret Manager.

pub mod gcloud;

pub use gcloud::GcloudSecretStore;

use crate::error::Result;
use crate::types::secret::SecretDescriptor;
use async_trait::async_trait;

/// Read access to the remote secret store, scoped to one project
#[async_trait]
pub trait RemoteSecretStore: Send + Sync {
    /// Latest value of a secret. Every failure is a
    /// [`SyncError::NotFoundOrAccess`](crate::error::SyncError::NotFoundOrAccess).
    async fn get(&self, name: &str) -> Result<String>;

    /// All secrets visible in the project
    async fn list(&self) -> Result<Vec<SecretDescriptor>>;
}
