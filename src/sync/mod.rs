// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Secret validation and synchronization logic.

pub mod flow;
pub mod manager;

pub use flow::{list_remote, run, RunMode};
pub use manager::Synchronizer;
