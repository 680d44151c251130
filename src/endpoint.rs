// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Desired DNS endpoints and their aggregation.
//!
//! An [`Endpoint`] is one DNS name, one record type and the list of addresses
//! it should resolve to. During a resolution pass targets are collected in an
//! [`EndpointMap`] keyed by `(name, record type)`, so every pod, annotation and
//! node address that contributes to the same name and family ends up in a
//! single endpoint.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;

/// DNS record family of an endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// IPv4 address record
    A,
    /// IPv6 address record
    AAAA,
}

impl RecordType {
    /// The DNS mnemonic of the record type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the record type for an address.
///
/// IPv6 literals map to `AAAA`. Everything else, including strings that are
/// not IP addresses at all, maps to `A`; validating targets is left to
/// whoever consumes the endpoints.
///
/// # Examples
///
/// ```
/// use pod_dns_source::endpoint::{suitable_type, RecordType};
///
/// assert_eq!(suitable_type("10.0.0.5"), RecordType::A);
/// assert_eq!(suitable_type("2001:db8::1"), RecordType::AAAA);
/// assert_eq!(suitable_type("not-an-ip"), RecordType::A);
/// ```
#[must_use]
pub fn suitable_type(address: &str) -> RecordType {
    match address.parse::<IpAddr>() {
        Ok(IpAddr::V6(_)) => RecordType::AAAA,
        _ => RecordType::A,
    }
}

/// A desired DNS record set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Fully qualified name, without the trailing root dot
    pub dns_name: String,

    pub record_type: RecordType,

    /// Addresses in discovery order; duplicates are kept
    pub targets: Vec<String>,
}

impl Endpoint {
    /// Create an endpoint, stripping a trailing root dot from the name and targets.
    #[must_use]
    pub fn new<I, S>(dns_name: &str, record_type: RecordType, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            dns_name: trim_root_dot(dns_name).to_string(),
            record_type,
            targets: targets
                .into_iter()
                .map(|target| trim_root_dot(target.as_ref()).to_string())
                .collect(),
        }
    }

    /// The aggregation key of this endpoint.
    #[must_use]
    pub fn key(&self) -> EndpointKey {
        EndpointKey::new(&self.dns_name, self.record_type)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} IN {} {}",
            self.dns_name,
            self.record_type,
            self.targets.join(";")
        )
    }
}

fn trim_root_dot(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Identity of an endpoint within one resolution pass.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EndpointKey {
    pub dns_name: String,
    pub record_type: RecordType,
}

impl EndpointKey {
    #[must_use]
    pub fn new(dns_name: &str, record_type: RecordType) -> Self {
        Self {
            dns_name: trim_root_dot(dns_name).to_string(),
            record_type,
        }
    }
}

/// Targets collected per [`EndpointKey`] during one resolution pass.
///
/// The map is local to a pass and never shared, so concurrent passes do not
/// interfere with each other.
#[derive(Debug, Default)]
pub struct EndpointMap {
    targets: BTreeMap<EndpointKey, Vec<String>>,
}

impl EndpointMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a target to the endpoint identified by `dns_name` and `record_type`.
    pub fn add(&mut self, dns_name: &str, record_type: RecordType, target: &str) {
        self.targets
            .entry(EndpointKey::new(dns_name, record_type))
            .or_default()
            .push(target.to_string());
    }

    /// Number of distinct `(name, record type)` pairs collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Turn the collected targets into endpoints, one per key, ordered by key.
    #[must_use]
    pub fn into_endpoints(self) -> Vec<Endpoint> {
        self.targets
            .into_iter()
            .map(|(key, targets)| Endpoint::new(&key.dns_name, key.record_type, targets))
            .collect()
    }
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod endpoint_tests;
