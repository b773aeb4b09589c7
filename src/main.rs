// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sync_secrets::cli::{Cli, ClusterBackend};
use sync_secrets::config::Config;
use sync_secrets::kubernetes::{create_client, ApiSecretStore, ClusterSecretStore, KubectlSecretStore};
use sync_secrets::remote::GcloudSecretStore;
use sync_secrets::sync::{self, Synchronizer};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = Config::from_cli(Cli::parse());

    // RUST_LOG overrides --verbose
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<bool> {
    info!(
        "Configuration loaded: project_id={}, namespace={}, backend={:?}",
        config.project_id, config.namespace, config.cluster_backend
    );

    let remote = GcloudSecretStore::new(config.project_id.clone()).program(config.gcloud_bin.clone());

    if config.list_remote {
        for name in sync::list_remote(&remote).await? {
            println!("{}", name);
        }
        return Ok(true);
    }

    let plan = config.load_plan()?;

    let cluster: Box<dyn ClusterSecretStore> = match config.cluster_backend {
        ClusterBackend::Kubectl => {
            Box::new(KubectlSecretStore::new().program(config.kubectl_bin.clone()))
        }
        ClusterBackend::Api => {
            let client = create_client(config.kubeconfig.as_deref(), config.context.as_deref()).await?;
            info!("Connected to Kubernetes cluster");
            Box::new(ApiSecretStore::new(client))
        }
    };

    let synchronizer = Synchronizer::new(Box::new(remote), cluster, plan, config.namespace.clone());
    Ok(sync::run(&synchronizer, config.run_mode()).await)
}
