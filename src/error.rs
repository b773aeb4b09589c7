// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    /// Missing secret, permission denial and transport faults all land here.
    #[error("Secret {name} not found or not accessible: {reason}")]
    NotFoundOrAccess { name: String, reason: String },

    #[error("Failed to run {program}: {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {}: {stderr}", describe_exit(.code))]
    CommandFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to decode secret data: {0}")]
    Decode(String),

    #[error("Invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid sync plan: {0}")]
    Plan(String),

    #[error("Failed to parse kubeconfig: {0}")]
    Kubeconfig(String),

    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "a signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
