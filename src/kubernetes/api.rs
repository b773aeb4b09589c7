// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Secret access through the Kubernetes API

use crate::error::{Result, SyncError};
use crate::kubernetes::ClusterSecretStore;
use crate::types::secret::SecretGroup;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::{
    api::{DeleteParams, ObjectMeta, PostParams},
    Api, Client,
};
use tracing::{error, info, instrument, warn};

pub struct ApiSecretStore {
    client: Client,
}

impl ApiSecretStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn secrets(&self, namespace: &str) -> Api<Secret> {
        Api::namespaced(self.client.clone(), namespace)
    }

    async fn replace_secret(&self, name: &str, namespace: &str, data: &SecretGroup) -> Result<()> {
        let secrets = self.secrets(namespace);

        if secrets.get_opt(name).await?.is_some() {
            secrets.delete(name, &DeleteParams::default()).await?;
            info!("Deleted existing secret: {}", name);
        }

        secrets
            .create(&PostParams::default(), &build_secret(name, namespace, data))
            .await?;
        info!("Created/updated Kubernetes secret: {}", name);
        Ok(())
    }

    async fn fetch_secret(&self, name: &str, namespace: &str) -> Result<SecretGroup> {
        let secret = self.secrets(namespace).get(name).await?;

        secret
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|(key, value)| {
                String::from_utf8(value.0)
                    .map(|text| (key.clone(), text))
                    .map_err(|e| SyncError::Decode(format!("key {}: {}", key, e)))
            })
            .collect()
    }
}

/// Build an Opaque secret holding `data`, as `kubectl create secret generic` would
fn build_secret(name: &str, namespace: &str, data: &SecretGroup) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        data: Some(
            data.iter()
                .map(|(k, v)| (k.clone(), ByteString(v.as_bytes().to_vec())))
                .collect(),
        ),
        type_: Some("Opaque".to_string()),
        ..Default::default()
    }
}

#[async_trait]
impl ClusterSecretStore for ApiSecretStore {
    #[instrument(skip(self))]
    async fn exists(&self, name: &str, namespace: &str) -> bool {
        match self.secrets(namespace).get_opt(name).await {
            Ok(found) => found.is_some(),
            Err(e) => {
                warn!("Could not check secret {}/{}: {}", namespace, name, e);
                false
            }
        }
    }

    #[instrument(skip(self, data), fields(keys = data.len()))]
    async fn create(&self, name: &str, namespace: &str, data: &SecretGroup) -> bool {
        match self.replace_secret(name, namespace, data).await {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to create Kubernetes secret {}: {}", name, e);
                false
            }
        }
    }

    #[instrument(skip(self))]
    async fn get(&self, name: &str, namespace: &str) -> SecretGroup {
        self.fetch_secret(name, namespace).await.unwrap_or_else(|e| {
            error!("Failed to get Kubernetes secret {}: {}", name, e);
            SecretGroup::new()
        })
    }
}
