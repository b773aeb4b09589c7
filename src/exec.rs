// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Running the external command-line tools the stores are built on.

use crate::error::{Result, SyncError};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Captured result of one command invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn succeeded(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Runs a program to completion. A non-zero exit is reported through
/// [`CommandOutput::success`]. Spawn failures and stdout that is not valid
/// UTF-8 are errors.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput>;
}

/// Runs commands as child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        debug!("Running: {} {}", program, redact_args(args).join(" "));

        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|source| SyncError::CommandSpawn {
                program: program.to_string(),
                source,
            })?;

        // stdout carries secret values and must come through unaltered
        let stdout = String::from_utf8(output.stdout).map_err(|e| {
            SyncError::Decode(format!("{} wrote non-UTF-8 output: {}", program, e))
        })?;

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

const FROM_LITERAL: &str = "--from-literal";

/// Replace literal secret values with `***` so arguments can be logged
pub fn redact_args(args: &[String]) -> Vec<String> {
    let mut redacted = Vec::with_capacity(args.len());
    let mut value_follows = false;

    for arg in args {
        if value_follows {
            redacted.push(redact_literal(arg));
            value_follows = false;
        } else if arg == FROM_LITERAL {
            redacted.push(arg.clone());
            value_follows = true;
        } else if let Some(literal) = arg.strip_prefix("--from-literal=") {
            redacted.push(format!("{}={}", FROM_LITERAL, redact_literal(literal)));
        } else {
            redacted.push(arg.clone());
        }
    }

    redacted
}

fn redact_literal(literal: &str) -> String {
    match literal.split_once('=') {
        Some((key, _)) => format!("{}=***", key),
        None => "***".to_string(),
    }
}
