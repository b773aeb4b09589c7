// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Secret Manager access through the `gcloud` CLI

use crate::constants::tools;
use crate::error::{Result, SyncError};
use crate::exec::{CommandRunner, ProcessRunner};
use crate::remote::RemoteSecretStore;
use crate::types::secret::SecretDescriptor;
use async_trait::async_trait;
use tracing::{debug, error, instrument};

#[derive(Debug, Clone)]
pub struct GcloudSecretStore<R = ProcessRunner> {
    project_id: String,
    program: String,
    runner: R,
}

impl GcloudSecretStore<ProcessRunner> {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self::with_runner(project_id, ProcessRunner)
    }
}

impl<R: CommandRunner> GcloudSecretStore<R> {
    pub fn with_runner(project_id: impl Into<String>, runner: R) -> Self {
        Self {
            project_id: project_id.into(),
            program: tools::GCLOUD.to_string(),
            runner,
        }
    }

    /// Use a different `gcloud` executable
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn access_args(&self, name: &str) -> Vec<String> {
        [
            "secrets",
            "versions",
            "access",
            "latest",
            "--secret",
            name,
            "--project",
            self.project_id.as_str(),
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn list_args(&self) -> Vec<String> {
        ["secrets", "list", "--project", self.project_id.as_str(), "--format", "json"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

#[async_trait]
impl<R: CommandRunner> RemoteSecretStore for GcloudSecretStore<R> {
    #[instrument(skip(self), fields(project = %self.project_id))]
    async fn get(&self, name: &str) -> Result<String> {
        let not_found = |reason: String| SyncError::NotFoundOrAccess {
            name: name.to_string(),
            reason,
        };

        let output = self
            .runner
            .run(&self.program, &self.access_args(name))
            .await
            .map_err(|e| {
                error!("Failed to get secret {}: {}", name, e);
                not_found(e.to_string())
            })?;

        if !output.success {
            let stderr = output.stderr.trim().to_string();
            error!("Failed to get secret {}: {}", name, stderr);
            return Err(not_found(stderr));
        }

        debug!("Fetched secret {}", name);
        Ok(output.stdout.trim().to_string())
    }

    #[instrument(skip(self), fields(project = %self.project_id))]
    async fn list(&self) -> Result<Vec<SecretDescriptor>> {
        let output = self.runner.run(&self.program, &self.list_args()).await?;

        if !output.success {
            error!("Failed to list secrets: {}", output.stderr.trim());
            return Err(SyncError::CommandFailed {
                program: self.program.clone(),
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            });
        }

        let descriptors: Vec<SecretDescriptor> = serde_json::from_str(&output.stdout)?;
        debug!("Listed {} secrets", descriptors.len());
        Ok(descriptors)
    }
}
