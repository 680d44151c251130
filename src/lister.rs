// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Read-only snapshot access to pods and nodes.
//!
//! The resolver never talks to the API server. It receives two capabilities:
//! - [`PodLister`] lists the pods of a namespace
//! - [`NodeLookup`] fetches a node by name
//!
//! Both are implemented for the kube-rs reflector [`Store`], which keeps an
//! in-memory, eventually-consistent copy of the cluster state that is updated by
//! a background watch task. Tests and other callers can provide their own
//! implementations.

use crate::errors::SourceError;
use k8s_openapi::api::core::v1::{Node, Pod};
use kube::runtime::reflector::{ObjectRef, Store};
use kube::ResourceExt;
use std::sync::Arc;

/// Lists pods from a point-in-time snapshot.
pub trait PodLister {
    /// List the pods of `namespace`, or of every namespace when it is empty.
    ///
    /// # Errors
    /// Returns [`SourceError::PodListFailed`] if the snapshot cannot be read.
    fn list_pods(&self, namespace: &str) -> Result<Vec<Arc<Pod>>, SourceError>;
}

/// Looks nodes up by name.
pub trait NodeLookup {
    /// Fetch a node by name. A node that is not known is `None`, never an error.
    fn get_node(&self, name: &str) -> Option<Arc<Node>>;
}

impl PodLister for Store<Pod> {
    fn list_pods(&self, namespace: &str) -> Result<Vec<Arc<Pod>>, SourceError> {
        Ok(self
            .state()
            .into_iter()
            .filter(|pod| namespace.is_empty() || pod.namespace().as_deref() == Some(namespace))
            .collect())
    }
}

impl NodeLookup for Store<Node> {
    fn get_node(&self, name: &str) -> Option<Arc<Node>> {
        self.get(&ObjectRef::new(name))
    }
}

impl<T: PodLister + ?Sized> PodLister for Arc<T> {
    fn list_pods(&self, namespace: &str) -> Result<Vec<Arc<Pod>>, SourceError> {
        (**self).list_pods(namespace)
    }
}

impl<T: NodeLookup + ?Sized> NodeLookup for Arc<T> {
    fn get_node(&self, name: &str) -> Option<Arc<Node>> {
        (**self).get_node(name)
    }
}

#[cfg(test)]
#[path = "lister_tests.rs"]
mod lister_tests;
