//! Gateway API resource types
//!
//! The translator reads a base [`Gateway`] and produces Gateway, HTTPRoute and
//! TLSRoute objects. Types follow the `gateway.networking.k8s.io/v1alpha2`
//! schema, trimmed to the fields this tool reads or writes. Resources read
//! from input keep every other key in an `extra` mapping so they are written
//! back unchanged.

mod listener;
mod route;

pub use listener::*;
pub use route::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// API group of every Gateway API resource
pub const GROUP_NAME: &str = "gateway.networking.k8s.io";

/// `apiVersion` written on generated resources
pub const API_VERSION: &str = "gateway.networking.k8s.io/v1alpha2";

pub const GATEWAY_KIND: &str = "Gateway";
pub const HTTP_ROUTE_KIND: &str = "HTTPRoute";
pub const TLS_ROUTE_KIND: &str = "TLSRoute";

/// Object metadata
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,

    /// `uid`, `resourceVersion`, `ownerReferences` and the rest
    #[serde(flatten)]
    pub extra: serde_yaml::Mapping,
}

impl ObjectMeta {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    /// `namespace/name`, used for stable ordering
    pub fn namespaced_name(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }
}
