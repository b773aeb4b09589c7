// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Secret access through the `kubectl` CLI

use crate::constants::tools;
use crate::error::{Result, SyncError};
use crate::exec::{CommandOutput, CommandRunner, ProcessRunner};
use crate::kubernetes::ClusterSecretStore;
use crate::types::secret::{ClusterSecretManifest, SecretGroup};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use std::collections::BTreeMap;
use tracing::{debug, error, info, instrument};

#[derive(Debug, Clone)]
pub struct KubectlSecretStore<R = ProcessRunner> {
    program: String,
    runner: R,
}

impl KubectlSecretStore<ProcessRunner> {
    pub fn new() -> Self {
        Self::with_runner(ProcessRunner)
    }
}

impl Default for KubectlSecretStore<ProcessRunner> {
    fn default() -> Self {
        Self::new()
    }
}

fn to_args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

impl<R: CommandRunner> KubectlSecretStore<R> {
    pub fn with_runner(runner: R) -> Self {
        Self {
            program: tools::KUBECTL.to_string(),
            runner,
        }
    }

    /// Use a different `kubectl` executable
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    async fn run_checked(&self, args: Vec<String>) -> Result<CommandOutput> {
        let output = self.runner.run(&self.program, &args).await?;
        if !output.success {
            return Err(SyncError::CommandFailed {
                program: self.program.clone(),
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(output)
    }

    async fn replace_secret(&self, name: &str, namespace: &str, data: &SecretGroup) -> Result<()> {
        if self.exists(name, namespace).await {
            self.run_checked(to_args(&["delete", "secret", name, "-n", namespace]))
                .await?;
            info!("Deleted existing secret: {}", name);
        }

        let mut args = to_args(&["create", "secret", "generic", name, "-n", namespace]);
        for (key, value) in data {
            args.push("--from-literal".to_string());
            args.push(format!("{}={}", key, value));
        }

        self.run_checked(args).await?;
        info!("Created/updated Kubernetes secret: {}", name);
        Ok(())
    }

    async fn fetch_secret(&self, name: &str, namespace: &str) -> Result<SecretGroup> {
        let output = self
            .run_checked(to_args(&["get", "secret", name, "-n", namespace, "-o", "json"]))
            .await?;

        let manifest: ClusterSecretManifest = serde_json::from_str(&output.stdout)?;
        match manifest.data {
            Some(data) => decode_secret_data(&data),
            None => Ok(SecretGroup::new()),
        }
    }
}

/// Decode the base64 values of a secret's `data` field into UTF-8 text
pub fn decode_secret_data(data: &BTreeMap<String, String>) -> Result<SecretGroup> {
    data.iter()
        .map(|(key, encoded)| {
            let bytes = general_purpose::STANDARD
                .decode(encoded)
                .map_err(|e| SyncError::Decode(format!("key {}: {}", key, e)))?;
            let value = String::from_utf8(bytes)
                .map_err(|e| SyncError::Decode(format!("key {}: {}", key, e)))?;
            Ok((key.clone(), value))
        })
        .collect()
}

#[async_trait]
impl<R: CommandRunner> ClusterSecretStore for KubectlSecretStore<R> {
    #[instrument(skip(self))]
    async fn exists(&self, name: &str, namespace: &str) -> bool {
        match self
            .runner
            .run(&self.program, &to_args(&["get", "secret", name, "-n", namespace]))
            .await
        {
            Ok(output) => output.success,
            Err(e) => {
                debug!("Could not check secret {}: {}", name, e);
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
