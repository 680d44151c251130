// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for error types.

#[cfg(test)]
mod tests {
    use crate::errors::*;

    #[test]
    fn test_pod_list_failed_error() {
        let error = SourceError::PodListFailed {
            namespace: "kube-system".to_string(),
            reason: "cache unavailable".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Failed to list pods in namespace 'kube-system': cache unavailable"
        );
        assert_eq!(error.error_type(), "pod_list_failed");
    }

    #[test]
    fn test_cache_sync_timeout_error() {
        let error = SourceError::CacheSyncTimeout {
            resource: "nodes".to_string(),
            timeout_secs: 60,
        };

        assert_eq!(
            error.to_string(),
            "Timed out after 60s waiting for the nodes cache to sync"
        );
        assert_eq!(error.error_type(), "cache_sync_timeout");
    }

    #[test]
    fn test_cache_writer_dropped_error() {
        let error = SourceError::CacheWriterDropped {
            resource: "pods".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "The pods cache writer was dropped before the initial sync completed"
        );
        assert_eq!(error.error_type(), "cache_writer_dropped");
    }

    #[test]
    fn test_unknown_compatibility_error() {
        let error = SourceError::UnknownCompatibility("kops-dns-controler".to_string());

        assert_eq!(
            error.to_string(),
            "Unknown compatibility mode 'kops-dns-controler' (expected 'standard' or 'kops-dns-controller')"
        );
        assert_eq!(error.error_type(), "unknown_compatibility");
    }

    #[test]
    fn test_error_is_std_error() {
        let error: Box<dyn std::error::Error> = Box::new(SourceError::PodListFailed {
            namespace: String::new(),
            reason: "boom".to_string(),
        });

        assert!(error.to_string().contains("boom"));
    }
}
