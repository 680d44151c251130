// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Test utilities shared by the unit tests.
//!
//! Provides pod and node builders plus helpers to load them into reflector
//! stores the same way the watch task would.

use crate::errors::SourceError;
use crate::lister::PodLister;
use k8s_openapi::api::core::v1::{Node, NodeAddress, NodeStatus, Pod, PodSpec, PodStatus};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::runtime::reflector::{self, Store};
use kube::runtime::watcher::Event;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Build a pod with the given host-network flag, annotations, IP and node.
pub fn create_test_pod(
    name: &str,
    namespace: &str,
    host_network: bool,
    annotations: &[(&str, &str)],
    pod_ip: Option<&str>,
    node_name: Option<&str>,
) -> Pod {
    let annotations: BTreeMap<String, String> = annotations
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect();

    Pod {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            annotations: if annotations.is_empty() {
                None
            } else {
                Some(annotations)
            },
            ..Default::default()
        },
        spec: Some(PodSpec {
            host_network: Some(host_network),
            node_name: node_name.map(ToString::to_string),
            ..Default::default()
        }),
        status: Some(PodStatus {
            pod_ip: pod_ip.map(ToString::to_string),
            ..Default::default()
        }),
    }
}

/// Shorthand for a host-network pod in `default` scheduled on `node_name`.
pub fn create_host_network_pod(
    name: &str,
    annotations: &[(&str, &str)],
    pod_ip: &str,
    node_name: &str,
) -> Pod {
    create_test_pod(
        name,
        "default",
        true,
        annotations,
        Some(pod_ip),
        Some(node_name),
    )
}

/// Build a node advertising `(type, address)` pairs.
pub fn create_test_node(name: &str, addresses: &[(&str, &str)]) -> Node {
    Node {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        spec: None,
        status: Some(NodeStatus {
            addresses: Some(
                addresses
                    .iter()
                    .map(|(type_, address)| NodeAddress {
                        type_: (*type_).to_string(),
                        address: (*address).to_string(),
                    })
                    .collect(),
            ),
            ..Default::default()
        }),
    }
}

/// A pod store holding `pods`.
pub fn pod_store(pods: Vec<Pod>) -> Store<Pod> {
    let (reader, mut writer) = reflector::store::<Pod>();
    for pod in pods {
        writer.apply_watcher_event(&Event::Apply(pod));
    }
    reader
}

/// A node store holding `nodes`.
pub fn node_store(nodes: Vec<Node>) -> Store<Node> {
    let (reader, mut writer) = reflector::store::<Node>();
    for node in nodes {
        writer.apply_watcher_event(&Event::Apply(node));
    }
    reader
}

/// A pod lister whose cache is always unavailable.
pub struct FailingPodLister;

impl PodLister for FailingPodLister {
    fn list_pods(&self, namespace: &str) -> Result<Vec<Arc<Pod>>, SourceError> {
        Err(SourceError::PodListFailed {
            namespace: namespace.to_string(),
            reason: "cache unavailable".to_string(),
        })
    }
}
