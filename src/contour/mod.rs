//! Contour HTTPProxy resource types
//!
//! Only the fields the translator reads are modelled. Unknown fields are
//! ignored on decode.

use serde::{Deserialize, Serialize};

/// Kind string carried by HTTPProxy documents
pub const HTTP_PROXY_KIND: &str = "HTTPProxy";

/// A Contour HTTPProxy (`projectcontour.io/v1`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpProxy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default)]
    pub metadata: ProxyMetadata,

    #[serde(default)]
    pub spec: HttpProxySpec,
}

impl HttpProxy {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn namespace(&self) -> &str {
        &self.metadata.namespace
    }

    /// Virtual host FQDN, or `None` when unset or empty
    pub fn fqdn(&self) -> Option<&str> {
        self.spec
            .virtualhost
            .as_ref()
            .map(|vh| vh.fqdn.as_str())
            .filter(|fqdn| !fqdn.is_empty())
    }

    /// TLS secret name configured on the virtual host
    pub fn tls_secret_name(&self) -> Option<&str> {
        self.spec
            .virtualhost
            .as_ref()
            .and_then(|vh| vh.tls.as_ref())
            .map(|tls| tls.secret_name.as_str())
    }

    /// Whether the virtual host asks for TLS passthrough to the backend
    pub fn tls_passthrough(&self) -> bool {
        self.spec
            .virtualhost
            .as_ref()
            .and_then(|vh| vh.tls.as_ref())
            .is_some_and(|tls| tls.passthrough)
    }
}

/// Object identity
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProxyMetadata {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub namespace: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpProxySpec {
    /// Root proxies carry a virtual host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtualhost: Option<VirtualHost>,

    /// Delegation to other proxies (not translated)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<Include>,

    /// HTTP routing rules
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,

    /// TCP proxying, mutually exclusive with `routes` in practice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcpproxy: Option<TcpProxy>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualHost {
    #[serde(default)]
    pub fqdn: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<VirtualHostTls>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualHostTls {
    #[serde(default)]
    pub secret_name: String,

    #[serde(default)]
    pub passthrough: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Include {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<MatchCondition>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<MatchCondition>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<Service>,
}

/// A single match condition. Contour expects exactly one field per entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCondition {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prefix: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderMatchCondition>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderMatchCondition {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact: Option<String>,
}

/// Backend Kubernetes service
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub name: String,

    pub port: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TcpProxy {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<Service>,
}
