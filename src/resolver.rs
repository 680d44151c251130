// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Endpoint resolution for host-network pods.
//!
//! A resolution pass lists the pods of a namespace and, for every pod running
//! in the host network namespace, turns its hostname annotations into DNS
//! endpoints:
//!
//! - `internal-hostname` names resolve to the pod's own IP
//! - `hostname` names resolve to the addresses advertised by the pod's node
//!
//! Node addresses are used if they are `ExternalIP`, or if they are `InternalIP`
//! and IPv6: nodes commonly report their globally routable IPv6 addresses as
//! internal.
//!
//! Targets for the same name and record type are merged into one endpoint,
//! across pods, annotations and node addresses. The pass is a pure function of
//! the two snapshots it reads and keeps all of its state on the stack.

use crate::annotations::{hostname_annotations, split_hostname_annotation, TargetSource};
use crate::config::Compatibility;
use crate::constants::{NODE_EXTERNAL_IP, NODE_INTERNAL_IP};
use crate::endpoint::{suitable_type, Endpoint, EndpointMap, RecordType};
use crate::errors::SourceError;
use crate::lister::{NodeLookup, PodLister};
use k8s_openapi::api::core::v1::Pod;
use kube::ResourceExt;
use tracing::debug;

/// Derive the endpoints for all host-network pods of `namespace`.
///
/// # Arguments
/// * `pods` - Snapshot of pods, listed once per pass
/// * `nodes` - Node lookup used for `hostname` annotations
/// * `namespace` - Namespace to list pods in (empty lists every namespace)
/// * `compatibility` - Whether the kops dns-controller annotations are honored too
///
/// # Returns
/// One endpoint per distinct `(name, record type)` pair, ordered by name then type.
///
/// # Errors
/// Returns the lister's error if the pods cannot be listed. Nothing else fails:
/// missing nodes, blank annotation segments and pods without an IP only reduce
/// the set of targets.
pub fn resolve_endpoints<P, N>(
    pods: &P,
    nodes: &N,
    namespace: &str,
    compatibility: Compatibility,
) -> Result<Vec<Endpoint>, SourceError>
where
    P: PodLister + ?Sized,
    N: NodeLookup + ?Sized,
{
    let pods = pods.list_pods(namespace)?;

    let mut endpoint_map = EndpointMap::new();
    for pod in &pods {
        if !is_host_network(pod) {
            debug!(pod = %pod.name_any(), "skipping pod, hostNetwork=false");
            continue;
        }

        for (key, target_source) in hostname_annotations(compatibility) {
            let Some(value) = pod.annotations().get(*key) else {
                continue;
            };
            let hostnames = split_hostname_annotation(value);
            if hostnames.is_empty() {
                continue;
            }

            match target_source {
                TargetSource::PodIp => add_pod_ip_targets(&mut endpoint_map, pod, &hostnames),
                TargetSource::NodeAddresses => {
                    add_node_address_targets(&mut endpoint_map, pod, nodes, &hostnames);
                }
            }
        }
    }

    Ok(endpoint_map.into_endpoints())
}

/// Whether a node address may be published for a `hostname` annotation.
#[must_use]
pub fn is_publishable_node_address(address_type: &str, record_type: RecordType) -> bool {
    address_type == NODE_EXTERNAL_IP
        || (address_type == NODE_INTERNAL_IP && record_type == RecordType::AAAA)
}

fn is_host_network(pod: &Pod) -> bool {
    pod.spec
        .as_ref()
        .and_then(|spec| spec.host_network)
        .unwrap_or(false)
}

fn add_pod_ip_targets(endpoint_map: &mut EndpointMap, pod: &Pod, hostnames: &[String]) {
    let pod_ip = pod
        .status
        .as_ref()
        .and_then(|status| status.pod_ip.as_deref())
        .filter(|ip| !ip.is_empty());

    let Some(pod_ip) = pod_ip else {
        debug!(pod = %pod.name_any(), "pod has no IP yet, skipping internal hostnames");
        return;
    };

    let record_type = suitable_type(pod_ip);
    for hostname in hostnames {
        endpoint_map.add(hostname, record_type, pod_ip);
    }
}

fn add_node_address_targets<N>(
    endpoint_map: &mut EndpointMap,
    pod: &Pod,
    nodes: &N,
    hostnames: &[String],
) where
    N: NodeLookup + ?Sized,
{
    let node_name = pod
        .spec
        .as_ref()
        .and_then(|spec| spec.node_name.as_deref())
        .unwrap_or_default();

    // Node deleted or pod not scheduled yet: nothing to publish until the next pass.
    let Some(node) = nodes.get_node(node_name) else {
        debug!(
            pod = %pod.name_any(),
            node = node_name,
            "node not found, skipping hostnames"
        );
        return;
    };

    let addresses = node
        .status
        .as_ref()
        .and_then(|status| status.addresses.as_deref())
        .unwrap_or_default();

    for hostname in hostnames {
        for address in addresses {
            let record_type = suitable_type(&address.address);
            if is_publishable_node_address(&address.type_, record_type) {
                endpoint_map.add(hostname, record_type, &address.address);
            }
        }
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod resolver_tests;
