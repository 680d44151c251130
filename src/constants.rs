// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the pod DNS source.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// Kubernetes Node Address Types
// ============================================================================

/// Node address type for addresses reachable from outside the cluster
pub const NODE_EXTERNAL_IP: &str = "ExternalIP";

/// Node address type for addresses reachable only within the cluster network
pub const NODE_INTERNAL_IP: &str = "InternalIP";

// ============================================================================
// Compatibility Modes
// ============================================================================

/// Compatibility value that enables the kops dns-controller annotations
pub const COMPATIBILITY_KOPS_DNS_CONTROLLER: &str = "kops-dns-controller";

/// Compatibility value for the standard annotation set
pub const COMPATIBILITY_STANDARD: &str = "standard";

// ============================================================================
// Cache & Refresh Constants
// ============================================================================

/// How long to wait for the pod and node caches to complete their initial list
pub const DEFAULT_CACHE_SYNC_TIMEOUT_SECS: u64 = 60;

/// Default interval between two resolution passes
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;

/// Resource name used in logs and errors for the pod cache
pub const RESOURCE_PODS: &str = "pods";

/// Resource name used in logs and errors for the node cache
pub const RESOURCE_NODES: &str = "nodes";

// ============================================================================
// Runtime Constants
// ============================================================================

/// Number of tokio worker threads for the binary
pub const TOKIO_WORKER_THREADS: usize = 2;

/// Default bind address of the metrics HTTP server
pub const DEFAULT_METRICS_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Metrics namespace prefix (prometheus-safe)
pub const METRICS_NAMESPACE: &str = "pod_dns_source";
