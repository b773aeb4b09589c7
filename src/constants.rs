// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// GCP project used when none is given on the command line
pub const DEFAULT_PROJECT_ID: &str = "vschiavo-home";

/// Namespace the cluster secrets are written to
pub const DEFAULT_NAMESPACE: &str = "default";

/// Secret names in GCP Secret Manager
pub mod remote {
    pub const POSTGRES_PASSWORD: &str = "postgres-password";
    pub const POSTGRES_USER: &str = "postgres-user";
    pub const POSTGRES_HOST: &str = "postgres-host";
    pub const POSTGRES_PORT: &str = "postgres-port";
    pub const POSTGRES_DATABASE: &str = "postgres-database";
    pub const REDIS_HOST: &str = "redis-host";
    pub const REDIS_PORT: &str = "redis-port";
}

/// Kubernetes secrets produced by a sync
pub mod cluster {
    pub const DATABASE_SECRETS: &str = "database-secrets";
    /// Password-only secret kept for consumers that predate `database-secrets`
    pub const LEGACY_PGPASSWORD: &str = "pgpassword";
    pub const REDIS_SECRETS: &str = "redis-secrets";
}

/// Keys inside the Kubernetes secrets
pub mod keys {
    pub const PGPASSWORD: &str = "PGPASSWORD";
    pub const PGUSER: &str = "PGUSER";
    pub const PGHOST: &str = "PGHOST";
    pub const PGPORT: &str = "PGPORT";
    pub const PGDATABASE: &str = "PGDATABASE";
    pub const REDIS_HOST: &str = "REDIS_HOST";
    pub const REDIS_PORT: &str = "REDIS_PORT";
}

/// Logical group names in the sync plan
pub mod groups {
    pub const DATABASE: &str = "database";
    pub const REDIS: &str = "redis";
}

/// External tools driven by the command adapters
pub mod tools {
    pub const GCLOUD: &str = "gcloud";
    pub const KUBECTL: &str = "kubectl";
}
