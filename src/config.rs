// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Command line and environment configuration.
//!
//! Every flag can also be set through a `POD_DNS_*` environment variable so the
//! binary can be configured from a Deployment manifest without arguments.
//! Logging is configured separately through `RUST_LOG` and `RUST_LOG_FORMAT`.

use crate::constants::{
    COMPATIBILITY_KOPS_DNS_CONTROLLER, COMPATIBILITY_STANDARD, DEFAULT_CACHE_SYNC_TIMEOUT_SECS,
    DEFAULT_METRICS_BIND_ADDRESS, DEFAULT_REFRESH_INTERVAL_SECS,
};
use crate::errors::SourceError;
use clap::{Parser, ValueEnum};
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

/// Which annotation naming schemes are honored.
///
/// The standard mode honors only the external-dns annotations. The kops
/// dns-controller mode additionally honors the legacy `dns.alpha.kubernetes.io`
/// annotations; both sets contribute to the same endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Compatibility {
    /// external-dns annotations only
    #[default]
    Standard,
    /// external-dns annotations plus the kops dns-controller annotations
    KopsDnsController,
}

impl Compatibility {
    /// The configuration string for this mode.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Compatibility::Standard => COMPATIBILITY_STANDARD,
            Compatibility::KopsDnsController => COMPATIBILITY_KOPS_DNS_CONTROLLER,
        }
    }
}

impl fmt::Display for Compatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Compatibility {
    type Err = SourceError;

    /// Parse a compatibility mode.
    ///
    /// An empty value, `standard` and `none` select [`Compatibility::Standard`].
    /// Anything that is not a known mode is rejected so a misspelled mode
    /// cannot silently disable the legacy annotations.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" | COMPATIBILITY_STANDARD => Ok(Compatibility::Standard),
            COMPATIBILITY_KOPS_DNS_CONTROLLER => Ok(Compatibility::KopsDnsController),
            other => Err(SourceError::UnknownCompatibility(other.to_string())),
        }
    }
}

/// Output format for `--once`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Runtime configuration of the pod DNS source.
#[derive(Clone, Debug, Parser)]
#[command(
    name = "pod-dns-source",
    version,
    about = "Derive DNS endpoints from annotated host-network pods"
)]
pub struct Config {
    /// Namespace to watch pods in (empty watches all namespaces)
    #[arg(long, env = "POD_DNS_NAMESPACE", default_value = "")]
    pub namespace: String,

    /// Annotation compatibility mode (`standard` or `kops-dns-controller`)
    #[arg(long, env = "POD_DNS_COMPATIBILITY", default_value = COMPATIBILITY_STANDARD)]
    pub compatibility: Compatibility,

    /// Seconds between two resolution passes
    #[arg(
        long = "interval",
        env = "POD_DNS_INTERVAL_SECS",
        default_value_t = DEFAULT_REFRESH_INTERVAL_SECS
    )]
    pub interval_secs: u64,

    /// Seconds to wait for the pod and node caches to sync at startup
    #[arg(
        long = "cache-sync-timeout",
        env = "POD_DNS_CACHE_SYNC_TIMEOUT_SECS",
        default_value_t = DEFAULT_CACHE_SYNC_TIMEOUT_SECS
    )]
    pub cache_sync_timeout_secs: u64,

    /// Address the `/metrics` and `/healthz` endpoints listen on
    #[arg(
        long,
        env = "POD_DNS_METRICS_BIND_ADDRESS",
        default_value = DEFAULT_METRICS_BIND_ADDRESS
    )]
    pub metrics_bind_address: SocketAddr,

    /// Resolve once, print the endpoints and exit
    #[arg(long)]
    pub once: bool,

    /// Output format used with `--once`
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}

impl Config {
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    #[must_use]
    pub fn cache_sync_timeout(&self) -> Duration {
        Duration::from_secs(self.cache_sync_timeout_secs)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
