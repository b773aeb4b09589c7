// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Validates the remote secrets and writes them to the cluster, group by group.

use crate::constants::groups;
use crate::error::Result;
use crate::kubernetes::ClusterSecretStore;
use crate::remote::RemoteSecretStore;
use crate::types::plan::{GroupSpec, SyncPlan};
use crate::types::secret::SecretGroup;
use tracing::{debug, error, info, instrument};

pub struct Synchronizer {
    remote: Box<dyn RemoteSecretStore>,
    cluster: Box<dyn ClusterSecretStore>,
    plan: SyncPlan,
    namespace: String,
}

impl Synchronizer {
    pub fn new(
        remote: Box<dyn RemoteSecretStore>,
        cluster: Box<dyn ClusterSecretStore>,
        plan: SyncPlan,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            remote,
            cluster,
            plan,
            namespace: namespace.into(),
        }
    }

    /// Check every required remote secret exists and is non-empty.
    /// Stops at the first one that is not.
    pub async fn validate(&self) -> bool {
        info!("Validating required secrets...");

        for name in self.plan.required_secrets() {
            match self.remote.get(name).await {
                Ok(value) if value.is_empty() => {
                    error!("❌ Secret {} is empty", name);
                    return false;
                }
                Ok(_) => info!("✅ Secret {} exists", name),
                Err(e) => {
                    debug!("Validation lookup failed: {}", e);
                    error!("❌ Secret {} not found", name);
                    return false;
                }
            }
        }

        info!("✅ All required secrets validated");
        true
    }

    /// Write `database-secrets` and the legacy `pgpassword` secret
    pub async fn sync_database(&self) -> bool {
        self.sync_named_group(groups::DATABASE).await
    }

    /// Write `redis-secrets`
    pub async fn sync_redis(&self) -> bool {
        self.sync_named_group(groups::REDIS).await
    }

    /// Sync every group in plan order. A failing group does not stop the
    /// ones after it.
    pub async fn sync_all(&self) -> bool {
        info!("Starting secret synchronization...");

        let mut success = true;
        for group in &self.plan.groups {
            success &= self.sync_group(group).await;
        }

        if success {
            info!("✅ All secrets synchronized successfully!");
        } else {
            error!("❌ Some secrets failed to synchronize");
        }
        success
    }

    /// Fetch a group's remote secrets, then write each of its targets.
    /// Every target is written even if an earlier one failed.
    #[instrument(skip(self, group), fields(group = %group.name, namespace = %self.namespace))]
    pub async fn sync_group(&self, group: &GroupSpec) -> bool {
        info!("Syncing {} secrets...", group.name);

        let data = match self.fetch_group(group).await {
            Ok(data) => data,
            Err(e) => {
                error!("Failed to sync {} secrets: {}", group.name, e);
                return false;
            }
        };

        let mut success = true;
        for target in &group.targets {
            success &= self
                .cluster
                .create(&target.name, &self.namespace, &target.project(&data))
                .await;
        }
        success
    }

    /// Read back every target secret and check none of its keys is missing or empty
    pub async fn verify(&self) -> bool {
        info!("Verifying cluster secrets in namespace {}...", self.namespace);

        let mut success = true;
        for group in &self.plan.groups {
            for target in &group.targets {
                let stored = self.cluster.get(&target.name, &self.namespace).await;
                if stored.is_empty() {
                    error!("❌ Secret {} is unavailable", target.name);
                    success = false;
                    continue;
                }

                let missing: Vec<&str> = target
                    .expected_keys(group)
                    .into_iter()
                    .filter(|key| stored.get(*key).map_or(true, |v| v.is_empty()))
                    .collect();

                if missing.is_empty() {
                    info!("✅ Secret {} is complete", target.name);
                } else {
                    error!(
                        "❌ Secret {} is missing keys: {}",
                        target.name,
                        missing.join(", ")
                    );
                    success = false;
                }
            }
        }
        success
    }

    async fn sync_named_group(&self, name: &str) -> bool {
        match self.plan.group(name) {
            Some(group) => self.sync_group(group).await,
            None => {
                error!("Sync plan has no '{}' group", name);
                false
            }
        }
    }

    async fn fetch_group(&self, group: &GroupSpec) -> Result<SecretGroup> {
        let mut data = SecretGroup::new();
        for field in &group.fields {
            let value = self.remote.get(&field.remote).await?;
            data.insert(field.key.clone(), value);
        }
        Ok(data)
    }
}
