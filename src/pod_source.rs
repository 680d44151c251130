// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Pod endpoint source backed by reflector caches.
//!
//! [`PodSource::start`] spawns one reflector for pods and one for nodes, waits
//! for both caches to finish their initial list, and then serves resolution
//! passes from memory. Each call to [`PodSource::endpoints`] reads the current
//! snapshots once and never blocks on the watch tasks.
//!
//! # Example
//!
//! ```rust,no_run
//! use clap::Parser;
//! use pod_dns_source::config::Config;
//! use pod_dns_source::pod_source::PodSource;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = kube::Client::try_default().await?;
//! let config = Config::parse();
//! let source = PodSource::start(client, &config).await?;
//! for endpoint in source.endpoints()? {
//!     println!("{endpoint}");
//! }
//! # Ok(())
//! # }
//! ```

use crate::config::{Compatibility, Config};
use crate::constants::{RESOURCE_NODES, RESOURCE_PODS};
use crate::endpoint::Endpoint;
use crate::errors::SourceError;
use crate::lister::{NodeLookup, PodLister};
use crate::metrics;
use crate::resolver::resolve_endpoints;
use futures::StreamExt;
use k8s_openapi::api::core::v1::{Node, Pod};
use kube::runtime::reflector::{self, Store};
use kube::runtime::watcher::{self, Config as WatcherConfig};
use kube::runtime::WatchStreamExt;
use kube::{Api, Client, Resource};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Endpoint source for annotated host-network pods.
pub struct PodSource<P = Store<Pod>, N = Store<Node>> {
    pods: P,
    nodes: N,
    namespace: String,
    compatibility: Compatibility,
    watchers: Vec<JoinHandle<()>>,
}

impl PodSource<Store<Pod>, Store<Node>> {
    /// Start the pod and node caches and wait until both are populated.
    ///
    /// Pods are watched in `config.namespace` (every namespace when empty);
    /// nodes are always watched cluster-wide.
    ///
    /// # Errors
    /// Returns [`SourceError::CacheSyncTimeout`] if a cache does not sync within
    /// `config.cache_sync_timeout()`, or [`SourceError::CacheWriterDropped`] if a
    /// watch task stops before syncing.
    pub async fn start(client: Client, config: &Config) -> Result<Self, SourceError> {
        let pod_api: Api<Pod> = if config.namespace.is_empty() {
            Api::all(client.clone())
        } else {
            Api::namespaced(client.clone(), &config.namespace)
        };
        let node_api: Api<Node> = Api::all(client);

        let (pods, pod_watcher) = spawn_reflector(pod_api, RESOURCE_PODS);
        let (nodes, node_watcher) = spawn_reflector(node_api, RESOURCE_NODES);

        let mut source = Self::from_listers(
            pods,
            nodes,
            config.namespace.clone(),
            config.compatibility,
        );
        source.watchers = vec![pod_watcher, node_watcher];

        info!(
            namespace = %source.namespace,
            compatibility = %source.compatibility,
            "Waiting for pod and node caches to sync"
        );
        let timeout = config.cache_sync_timeout();
        wait_for_sync(&source.pods, RESOURCE_PODS, timeout).await?;
        wait_for_sync(&source.nodes, RESOURCE_NODES, timeout).await?;
        info!("Pod and node caches synced");

        Ok(source)
    }
}

impl<P, N> PodSource<P, N>
where
    P: PodLister,
    N: NodeLookup,
{
    /// Build a source over existing snapshots.
    #[must_use]
    pub fn from_listers(
        pods: P,
        nodes: N,
        namespace: impl Into<String>,
        compatibility: Compatibility,
    ) -> Self {
        Self {
            pods,
            nodes,
            namespace: namespace.into(),
            compatibility,
            watchers: Vec::new(),
        }
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn compatibility(&self) -> Compatibility {
        self.compatibility
    }

    /// Run one resolution pass over the current snapshots.
    ///
    /// # Errors
    /// Returns [`SourceError::PodListFailed`] if the pods cannot be listed.
    pub fn endpoints(&self) -> Result<Vec<Endpoint>, SourceError> {
        let start = Instant::now();

        match resolve_endpoints(&self.pods, &self.nodes, &self.namespace, self.compatibility) {
            Ok(endpoints) => {
                let duration = start.elapsed();
                metrics::record_resolution_success(duration, &endpoints);
                debug!(
                    namespace = %self.namespace,
                    endpoints = endpoints.len(),
                    duration_ms = duration.as_millis(),
                    "Resolved pod endpoints"
                );
                Ok(endpoints)
            }
            Err(e) => {
                metrics::record_resolution_error(e.error_type(), start.elapsed());
                error!(namespace = %self.namespace, error = %e, "Failed to resolve pod endpoints");
                Err(e)
            }
        }
    }
}

impl<P, N> Drop for PodSource<P, N> {
    fn drop(&mut self) {
        for watcher in &self.watchers {
            watcher.abort();
        }
    }
}

/// Wait until `store` has completed its initial list, or until `timeout` expires.
///
/// # Errors
/// Returns [`SourceError::CacheSyncTimeout`] on timeout and
/// [`SourceError::CacheWriterDropped`] if the store's writer went away first.
pub async fn wait_for_sync<K>(
    store: &Store<K>,
    resource: &str,
    timeout: Duration,
) -> Result<(), SourceError>
where
    K: Resource<DynamicType = ()> + Clone + 'static,
{
    match tokio::time::timeout(timeout, store.wait_until_ready()).await {
        Ok(Ok(())) => {
            debug!(resource, "Cache synced");
            Ok(())
        }
        Ok(Err(_)) => Err(SourceError::CacheWriterDropped {
            resource: resource.to_string(),
        }),
        Err(_) => Err(SourceError::CacheSyncTimeout {
            resource: resource.to_string(),
            timeout_secs: timeout.as_secs(),
        }),
    }
}

/// Spawn a reflector that keeps a store of `K` up to date.
fn spawn_reflector<K>(api: Api<K>, resource: &'static str) -> (Store<K>, JoinHandle<()>)
where
    K: Resource<DynamicType = ()> + Clone + DeserializeOwned + Debug + Send + Sync + 'static,
{
    let (reader, writer) = reflector::store::<K>();
    let stream = reflector::reflector(writer, watcher::watcher(api, WatcherConfig::default()))
        .default_backoff()
        .touched_objects();

    let handle = tokio::spawn(async move {
        debug!(resource, "Starting reflector");
        stream
            .for_each(|event| {
                if let Err(e) = event {
                    warn!(resource, error = %e, "Watch error, retrying with backoff");
                }
                futures::future::ready(())
            })
            .await;
        warn!(resource, "Reflector stream ended");
    });

    (reader, handle)
}

#[cfg(test)]
#[path = "pod_source_tests.rs"]
mod pod_source_tests;
