// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for the pod DNS source.
//!
//! Only a few conditions are errors at all. A failed pod listing aborts the
//! resolution pass; cache synchronization problems abort startup; an unknown
//! compatibility value is rejected at configuration time. Everything else
//! (missing nodes, blank annotation segments, non host-network pods) is
//! skipped silently by the resolver.

use thiserror::Error;

/// Errors that can occur while building or querying the pod source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The pod cache could not produce a listing
    ///
    /// Fatal to the current resolution pass: no partial endpoint list is returned.
    /// The next refresh cycle is expected to try again.
    #[error("Failed to list pods in namespace '{namespace}': {reason}")]
    PodListFailed {
        /// The namespace that was listed (empty means all namespaces)
        namespace: String,
        /// Reason reported by the cache
        reason: String,
    },

    /// A cache did not finish its initial list before the deadline
    #[error("Timed out after {timeout_secs}s waiting for the {resource} cache to sync")]
    CacheSyncTimeout {
        /// The cached resource (`pods` or `nodes`)
        resource: String,
        /// The deadline that was exceeded
        timeout_secs: u64,
    },

    /// The watch task feeding a cache stopped before the initial list completed
    #[error("The {resource} cache writer was dropped before the initial sync completed")]
    CacheWriterDropped {
        /// The cached resource (`pods` or `nodes`)
        resource: String,
    },

    /// The compatibility mode string is not a known mode
    #[error("Unknown compatibility mode '{0}' (expected 'standard' or 'kops-dns-controller')")]
    UnknownCompatibility(String),
}

impl SourceError {
    /// Short, stable identifier used as a metrics label.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            SourceError::PodListFailed { .. } => "pod_list_failed",
            SourceError::CacheSyncTimeout { .. } => "cache_sync_timeout",
            SourceError::CacheWriterDropped { .. } => "cache_writer_dropped",
            SourceError::UnknownCompatibility(_) => "unknown_compatibility",
        }
    }
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;
