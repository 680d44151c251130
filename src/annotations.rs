// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Hostname annotations honored on host-network pods.
//!
//! Two annotation families are recognized:
//! - the external-dns keys, always honored
//! - the kops dns-controller keys, honored only in
//!   [`Compatibility::KopsDnsController`] mode, in addition to the external-dns keys

use crate::config::Compatibility;

// ============================================================================
// external-dns Annotations
// ============================================================================

/// Hostnames resolved to the addresses advertised by the pod's node
pub const HOSTNAME_ANNOTATION: &str = "external-dns.alpha.kubernetes.io/hostname";

/// Hostnames resolved to the pod's own IP
pub const INTERNAL_HOSTNAME_ANNOTATION: &str = "external-dns.alpha.kubernetes.io/internal-hostname";

// ============================================================================
// kops dns-controller Annotations
// ============================================================================

/// Legacy equivalent of [`HOSTNAME_ANNOTATION`]
pub const KOPS_DNS_CONTROLLER_HOSTNAME_ANNOTATION: &str = "dns.alpha.kubernetes.io/external";

/// Legacy equivalent of [`INTERNAL_HOSTNAME_ANNOTATION`]
pub const KOPS_DNS_CONTROLLER_INTERNAL_HOSTNAME_ANNOTATION: &str =
    "dns.alpha.kubernetes.io/internal";

/// Where the targets of a hostname annotation come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetSource {
    /// The pod's own `status.podIP`
    PodIp,
    /// The external (and internal IPv6) addresses of the pod's node
    NodeAddresses,
}

const STANDARD_ANNOTATIONS: &[(&str, TargetSource)] = &[
    (INTERNAL_HOSTNAME_ANNOTATION, TargetSource::PodIp),
    (HOSTNAME_ANNOTATION, TargetSource::NodeAddresses),
];

const KOPS_DNS_CONTROLLER_ANNOTATIONS: &[(&str, TargetSource)] = &[
    (INTERNAL_HOSTNAME_ANNOTATION, TargetSource::PodIp),
    (HOSTNAME_ANNOTATION, TargetSource::NodeAddresses),
    (
        KOPS_DNS_CONTROLLER_INTERNAL_HOSTNAME_ANNOTATION,
        TargetSource::PodIp,
    ),
    (
        KOPS_DNS_CONTROLLER_HOSTNAME_ANNOTATION,
        TargetSource::NodeAddresses,
    ),
];

/// Annotation keys honored in the given compatibility mode, in processing order.
#[must_use]
pub fn hostname_annotations(compatibility: Compatibility) -> &'static [(&'static str, TargetSource)] {
    match compatibility {
        Compatibility::Standard => STANDARD_ANNOTATIONS,
        Compatibility::KopsDnsController => KOPS_DNS_CONTROLLER_ANNOTATIONS,
    }
}

/// Split a comma-separated hostname annotation value into hostnames.
///
/// Each segment is trimmed of surrounding whitespace and empty segments are
/// discarded, so `" a.example.com, ,b.example.com "` yields
/// `["a.example.com", "b.example.com"]`.
#[must_use]
pub fn split_hostname_annotation(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|hostname| !hostname.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
#[path = "annotations_tests.rs"]
mod annotations_tests;
