// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # pod-dns-source - DNS endpoints for host-network pods
//!
//! This crate derives desired DNS records from Kubernetes pods that run in the
//! host network namespace. Hostnames are declared with annotations on the pod;
//! the addresses come from the pod itself or from the node it is scheduled on.
//!
//! ## Overview
//!
//! | Annotation | Targets |
//! |---|---|
//! | `external-dns.alpha.kubernetes.io/internal-hostname` | the pod's IP |
//! | `external-dns.alpha.kubernetes.io/hostname` | the node's external (and internal IPv6) addresses |
//! | `dns.alpha.kubernetes.io/internal` (kops compatibility) | the pod's IP |
//! | `dns.alpha.kubernetes.io/external` (kops compatibility) | the node's addresses |
//!
//! Targets for the same name and record type are merged into a single
//! [`endpoint::Endpoint`].
//!
//! ## Modules
//!
//! - [`resolver`] - The endpoint derivation algorithm
//! - [`endpoint`] - Endpoint records, record types and aggregation
//! - [`annotations`] - Hostname annotation keys and parsing
//! - [`lister`] - Snapshot interfaces over the pod and node caches
//! - [`pod_source`] - Cache lifecycle and resolution passes
//! - [`config`] - Command line and environment configuration
//! - [`metrics`] - Prometheus metrics
//!
//! ## Example
//!
//! ```rust
//! use pod_dns_source::config::Compatibility;
//! use pod_dns_source::endpoint::RecordType;
//! use pod_dns_source::resolver::resolve_endpoints;
//! use k8s_openapi::api::core::v1::{Node, Pod};
//! use kube::runtime::{reflector, watcher::Event};
//!
//! let pod: Pod = serde_json::from_value(serde_json::json!({
//!     "apiVersion": "v1",
//!     "kind": "Pod",
//!     "metadata": {
//!         "name": "web",
//!         "namespace": "default",
//!         "annotations": {
//!             "external-dns.alpha.kubernetes.io/internal-hostname": "web.example.com"
//!         }
//!     },
//!     "spec": { "hostNetwork": true, "containers": [] },
//!     "status": { "podIP": "192.0.2.10" }
//! }))
//! .unwrap();
//!
//! let (pods, mut writer) = reflector::store::<Pod>();
//! writer.apply_watcher_event(&Event::Apply(pod));
//! let (nodes, _) = reflector::store::<Node>();
//!
//! let endpoints = resolve_endpoints(&pods, &nodes, "default", Compatibility::Standard).unwrap();
//! assert_eq!(endpoints[0].dns_name, "web.example.com");
//! assert_eq!(endpoints[0].record_type, RecordType::A);
//! assert_eq!(endpoints[0].targets, vec!["192.0.2.10".to_string()]);
//! ```

pub mod annotations;
pub mod config;
pub mod constants;
pub mod endpoint;
pub mod errors;
pub mod lister;
pub mod metrics;
pub mod pod_source;
pub mod resolver;

#[cfg(test)]
pub(crate) mod test_utils;
