// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Command-line arguments

use crate::constants::{tools, DEFAULT_NAMESPACE, DEFAULT_PROJECT_ID};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Synchronize secrets from GCP Secret Manager to Kubernetes
#[derive(Parser, Debug, Clone)]
#[command(name = "sync-secrets", version, long_about = None)]
pub struct Cli {
    /// GCP Project ID
    #[arg(long, env = "GCP_PROJECT_ID", default_value = DEFAULT_PROJECT_ID)]
    pub project_id: String,

    /// Only validate secrets exist
    #[arg(long)]
    pub validate_only: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Kubernetes namespace to write secrets to
    #[arg(long, env = "SYNC_SECRETS_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// YAML sync plan replacing the built-in secret groups
    #[arg(long, env = "SYNC_SECRETS_PLAN")]
    pub plan: Option<PathBuf>,

    /// How Kubernetes secrets are written
    #[arg(long, value_enum, default_value_t = ClusterBackend::Kubectl)]
    pub cluster_backend: ClusterBackend,

    /// Kubeconfig file for the api backend
    #[arg(long, env = "KUBECONFIG_PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context for the api backend
    #[arg(long)]
    pub context: Option<String>,

    /// List the secrets in Secret Manager and exit
    #[arg(long, conflicts_with = "validate_only")]
    pub list_remote: bool,

    /// Read the Kubernetes secrets back after syncing
    #[arg(long, conflicts_with = "validate_only")]
    pub verify: bool,

    /// gcloud executable
    #[arg(long, default_value = tools::GCLOUD)]
    pub gcloud_bin: String,

    /// kubectl executable
    #[arg(long, default_value = tools::KUBECTL)]
    pub kubectl_bin: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterBackend {
    /// Shell out to kubectl
    Kubectl,
    /// Talk to the Kubernetes API directly
    Api,
}
