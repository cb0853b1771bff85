//! Route construction

use super::add_info;
use crate::contour::{HttpProxy, MatchCondition, Service, TcpProxy};
use crate::diagnostics::Diagnostics;
use crate::gateway::{
    BackendRef, HttpPathMatch, HttpRoute, HttpRouteMatch, HttpRouteRule, HttpRouteSpec,
    ObjectMeta, ParentReference, TlsRoute, TlsRouteRule, TlsRouteSpec, API_VERSION,
    HTTP_ROUTE_KIND, TLS_ROUTE_KIND,
};

/// Map an HTTPProxy's routes to an HTTPRoute with one rule per route
pub fn map_http_route(
    proxy: &HttpProxy,
    parent_refs: &[ParentReference],
    diagnostics: &mut Diagnostics,
) -> HttpRoute {
    let resource = format!("{}/{}", proxy.namespace(), proxy.name());

    let rules = proxy
        .spec
        .routes
        .iter()
        .map(|route| {
            if route.conditions.iter().any(|c| c.header.is_some()) {
                add_info(
                    diagnostics,
                    &resource,
                    "header match conditions are not translated",
                );
            }

            HttpRouteRule {
                matches: vec![HttpRouteMatch {
                    path: path_match(&route.conditions),
                }],
                backend_refs: backend_refs(&route.services),
            }
        })
        .collect();

    HttpRoute {
        api_version: Some(API_VERSION.to_string()),
        kind: Some(HTTP_ROUTE_KIND.to_string()),
        metadata: ObjectMeta::new(proxy.name(), proxy.namespace()),
        spec: HttpRouteSpec {
            parent_refs: parent_refs.to_vec(),
            rules,
        },
    }
}

/// Map an HTTPProxy's `tcpproxy` to a TLSRoute with a single rule
pub fn map_tls_route(
    proxy: &HttpProxy,
    tcp_proxy: &TcpProxy,
    parent_refs: &[ParentReference],
) -> TlsRoute {
    TlsRoute {
        api_version: Some(API_VERSION.to_string()),
        kind: Some(TLS_ROUTE_KIND.to_string()),
        metadata: ObjectMeta::new(proxy.name(), proxy.namespace()),
        spec: TlsRouteSpec {
            parent_refs: parent_refs.to_vec(),
            rules: vec![TlsRouteRule {
                backend_refs: backend_refs(&tcp_proxy.services),
            }],
        },
    }
}

/// Path prefix match for a route's conditions.
///
/// When several prefix conditions are present the last one wins.
pub fn path_match(conditions: &[MatchCondition]) -> Option<HttpPathMatch> {
    conditions
        .iter()
        .filter(|c| !c.prefix.is_empty())
        .last()
        .map(|c| HttpPathMatch::prefix(&c.prefix))
}

fn backend_refs(services: &[Service]) -> Vec<BackendRef> {
    services
        .iter()
        .map(|s| BackendRef::service(&s.name, s.port))
        .collect()
}
