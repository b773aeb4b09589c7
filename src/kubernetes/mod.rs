// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Writing and reading Kubernetes secrets, either through `kubectl` or the API.

pub mod api;
pub mod client;
pub mod kubectl;

pub use api::ApiSecretStore;
pub use client::create_client;
pub use kubectl::{decode_secret_data, KubectlSecretStore};

use crate::types::secret::SecretGroup;
use async_trait::async_trait;

/// Namespaced key-value secrets in the cluster.
///
/// Writes replace a secret as a whole: an existing secret is deleted and then
/// created again. A crash between the two steps leaves the secret absent.
/// Failures are logged by the store and reported as `false` or an empty map.
#[async_trait]
pub trait ClusterSecretStore: Send + Sync {
    async fn exists(&self, name: &str, namespace: &str) -> bool;

    /// Delete-then-create. Nothing is created if the delete fails.
    async fn create(&self, name: &str, namespace: &str, data: &SecretGroup) -> bool;

    /// Decoded secret data. Empty when the secret could not be read, which
    /// cannot be told apart from a secret without keys.
    async fn get(&self, name: &str, namespace: &str) -> SecretGroup;
}
