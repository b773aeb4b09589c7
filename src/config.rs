// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::cli::{Cli, ClusterBackend};
use crate::sync::RunMode;
use crate::types::plan::SyncPlan;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Run configuration resolved from the command line and environment
#[derive(Debug, Clone)]
pub struct Config {
    pub project_id: String,
    /// Namespace the Kubernetes secrets are written to
    pub namespace: String,
    pub plan_path: Option<PathBuf>,
    pub cluster_backend: ClusterBackend,
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
    pub gcloud_bin: String,
    pub kubectl_bin: String,
    pub validate_only: bool,
    pub list_remote: bool,
    pub verify: bool,
    pub verbose: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        Config {
            project_id: cli.project_id,
            namespace: cli.namespace,
            plan_path: cli.plan,
            cluster_backend: cli.cluster_backend,
            kubeconfig: cli.kubeconfig,
            context: cli.context,
            gcloud_bin: cli.gcloud_bin,
            kubectl_bin: cli.kubectl_bin,
            validate_only: cli.validate_only,
            list_remote: cli.list_remote,
            verify: cli.verify,
            verbose: cli.verbose,
        }
    }

    pub fn run_mode(&self) -> RunMode {
        if self.validate_only {
            RunMode::ValidateOnly
        } else {
            RunMode::Sync {
                verify: self.verify,
            }
        }
    }

    /// Default log filter when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// The plan file if one was given, the built-in plan otherwise
    pub fn load_plan(&self) -> Result<SyncPlan> {
        let Some(path) = &self.plan_path else {
            return Ok(SyncPlan::default());
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read sync plan {}", path.display()))?;
        SyncPlan::from_yaml(&content)
            .with_context(|| format!("Invalid sync plan {}", path.display()))
    }
}
