// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Data types shared by the stores and the synchronizer.

pub mod plan;
pub mod secret;

pub use plan::{FieldSpec, GroupSpec, SyncPlan, TargetSpec};
pub use secret::{ClusterSecretManifest, SecretDescriptor, SecretGroup};
