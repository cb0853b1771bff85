//! HTTPProxy to Gateway API translation
//!
//! Each proxy becomes exactly one route: a TLSRoute when it declares a
//! `tcpproxy`, an HTTPRoute otherwise. Every route also registers a listener
//! on the output Gateway, deduplicated by (protocol, port, hostname).

mod listener;
mod route;

pub use listener::{add_listener, listener_name};
pub use route::{map_http_route, map_tls_route, path_match};

use crate::contour::HttpProxy;
use crate::diagnostics::{ConversionWarning, ConvertedItem, Diagnostics, Severity, SkippedItem};
use crate::gateway::{
    Gateway, GatewayTlsConfig, HttpRoute, Listener, ParentReference, ProtocolType,
    SecretObjectReference, TlsModeType, TlsRoute,
};
use thiserror::Error;
use tracing::{debug, warn};

/// Port of listeners generated for HTTP routes
pub const HTTP_PORT: u16 = 80;

/// Port of listeners generated for TLS routes
pub const TLS_PORT: u16 = 443;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    #[error(
        "HTTPProxy {namespace}/{name} needs a Gateway listener but no base Gateway was provided"
    )]
    MissingParentGateway { name: String, namespace: String },
}

/// Output of a translation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Translation {
    /// The base Gateway with generated listeners appended, if one was given
    pub gateway: Option<Gateway>,
    pub http_routes: Vec<HttpRoute>,
    pub tls_routes: Vec<TlsRoute>,
}

/// Translate HTTPProxies to Gateway API resources.
///
/// `base_gateway` is never modified; the output Gateway is a copy with the
/// generated listeners appended. Without a base Gateway the routes carry no
/// parent reference, and any proxy that needs a listener fails the
/// translation with [`TranslateError::MissingParentGateway`].
pub fn translate(
    base_gateway: Option<&Gateway>,
    proxies: &[HttpProxy],
    diagnostics: &mut Diagnostics,
) -> Result<Translation, TranslateError> {
    let mut gateway = base_gateway.cloned();
    let parent_refs: Vec<ParentReference> = base_gateway
        .map(ParentReference::to_gateway)
        .into_iter()
        .collect();

    let mut http_routes = Vec::new();
    let mut tls_routes = Vec::new();

    for proxy in proxies {
        let resource = resource_name(proxy);

        if !proxy.spec.includes.is_empty() {
            warn!(
                name = proxy.name(),
                namespace = proxy.namespace(),
                "skipping HTTPProxy: translating includes not supported"
            );
            add_warning(
                diagnostics,
                &resource,
                "includes are not supported, HTTPProxy skipped",
                Some("flatten included routes into the root HTTPProxy before converting"),
            );
            diagnostics.skipped.push(SkippedItem {
                resource,
                reason: "translating includes not supported".to_string(),
            });
            continue;
        }

        if let Some(tcp_proxy) = &proxy.spec.tcpproxy {
            let listener = tls_listener(proxy, &resource, diagnostics);
            register_listener(gateway.as_mut(), listener, proxy)?;

            tls_routes.push(map_tls_route(proxy, tcp_proxy, &parent_refs));
            diagnostics.converted.push(ConvertedItem {
                resource,
                output_kind: crate::gateway::TLS_ROUTE_KIND.to_string(),
            });
        } else {
            let listener = Listener::new(ProtocolType::Http, HTTP_PORT, proxy.fqdn());
            register_listener(gateway.as_mut(), listener, proxy)?;

            http_routes.push(map_http_route(proxy, &parent_refs, diagnostics));
            diagnostics.converted.push(ConvertedItem {
                resource,
                output_kind: crate::gateway::HTTP_ROUTE_KIND.to_string(),
            });
        }
    }

    Ok(Translation {
        gateway,
        http_routes,
        tls_routes,
    })
}

/// Build the TLS listener for a `tcpproxy` HTTPProxy.
///
/// The listener always terminates TLS, including for passthrough virtual
/// hosts.
fn tls_listener(proxy: &HttpProxy, resource: &str, diagnostics: &mut Diagnostics) -> Listener {
    let secret_name = proxy.tls_secret_name().unwrap_or_default();
    if proxy.tls_passthrough() {
        add_warning(
            diagnostics,
            resource,
            "TLS passthrough is mapped to a Terminate listener",
            Some("set the listener tls.mode to Passthrough if the backend terminates TLS"),
        );
    } else if secret_name.is_empty() {
        add_warning(
            diagnostics,
            resource,
            "virtualhost has no TLS secret, listener certificateRef name is empty",
            Some("set spec.virtualhost.tls.secretName or edit the generated listener"),
        );
    }

    Listener::new(ProtocolType::Tls, TLS_PORT, proxy.fqdn()).with_tls(GatewayTlsConfig {
        mode: Some(TlsModeType::Terminate),
        certificate_refs: vec![SecretObjectReference::named(secret_name)],
        ..Default::default()
    })
}

/// Add `listener` to the output Gateway unless an equivalent one exists
fn register_listener(
    gateway: Option<&mut Gateway>,
    listener: Listener,
    proxy: &HttpProxy,
) -> Result<(), TranslateError> {
    let gateway = gateway.ok_or_else(|| TranslateError::MissingParentGateway {
        name: proxy.name().to_string(),
        namespace: proxy.namespace().to_string(),
    })?;

    if let Some(name) = add_listener(&mut gateway.spec.listeners, listener) {
        debug!(
            name = proxy.name(),
            namespace = proxy.namespace(),
            listener = %name,
            "registered listener"
        );
    }
    Ok(())
}

fn resource_name(proxy: &HttpProxy) -> String {
    format!("{}/{}", proxy.namespace(), proxy.name())
}

/// Add a warning diagnostic
fn add_warning(
    diagnostics: &mut Diagnostics,
    resource: &str,
    message: &str,
    suggestion: Option<&str>,
) {
    diagnostics.warnings.push(ConversionWarning {
        severity: Severity::Warning,
        resource: resource.to_string(),
        message: message.to_string(),
        suggestion: suggestion.map(str::to_string),
    });
}

/// Add an info diagnostic
fn add_info(diagnostics: &mut Diagnostics, resource: &str, message: &str) {
    diagnostics.warnings.push(ConversionWarning {
        severity: Severity::Info,
        resource: resource.to_string(),
        message: message.to_string(),
        suggestion: None,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::{
        Include, MatchCondition, Route, Service, TcpProxy, VirtualHost, VirtualHostTls,
    };
    use crate::gateway::{BackendRef, HttpPathMatch, ObjectMeta};

    fn base_gateway() -> Gateway {
        Gateway {
            api_version: Some(crate::gateway::API_VERSION.to_string()),
            kind: Some("Gateway".to_string()),
            metadata: ObjectMeta::new("contour", "projectcontour"),
            ..Default::default()
        }
    }

    fn http_proxy(name: &str, fqdn: &str, prefix: &str, service: &str) -> HttpProxy {
        let mut proxy = HttpProxy::default();
        proxy.metadata.name = name.to_string();
        proxy.metadata.namespace = "default".to_string();
        proxy.spec.virtualhost = Some(VirtualHost {
            fqdn: fqdn.to_string(),
            tls: None,
        });
        proxy.spec.routes = vec![Route {
            conditions: vec![MatchCondition {
                prefix: prefix.to_string(),
                header: None,
            }],
            services: vec![Service {
                name: service.to_string(),
                port: 80,
                weight: None,
            }],
        }];
        proxy
    }

    fn tcp_proxy(name: &str, fqdn: &str, secret: &str, service: &str) -> HttpProxy {
        let mut proxy = HttpProxy::default();
        proxy.metadata.name = name.to_string();
        proxy.metadata.namespace = "default".to_string();
        proxy.spec.virtualhost = Some(VirtualHost {
            fqdn: fqdn.to_string(),
            tls: Some(VirtualHostTls {
                secret_name: secret.to_string(),
                passthrough: false,
            }),
        });
        proxy.spec.tcpproxy = Some(TcpProxy {
            services: vec![Service {
                name: service.to_string(),
                port: 443,
                weight: None,
            }],
        });
        proxy
    }

    fn listener_names(gateway: Gateway) -> Vec<String> {
        gateway.spec.listeners.into_iter().map(|l| l.name).collect()
    }

    fn with_includes(mut proxy: HttpProxy) -> HttpProxy {
        proxy.spec.includes = vec![Include {
            name: "child".to_string(),
            ..Default::default()
        }];
        proxy
    }

    #[test]
    fn test_http_only_produces_http_routes() {
        let proxies = vec![
            http_proxy("a", "a.example.com", "/", "a-svc"),
            http_proxy("b", "b.example.com", "/", "b-svc"),
            http_proxy("c", "c.example.com", "/", "c-svc"),
        ];
        let mut diagnostics = Diagnostics::default();
        let out = translate(Some(&base_gateway()), &proxies, &mut diagnostics).unwrap();

        assert_eq!(out.http_routes.len(), 3);
        assert!(out.tls_routes.is_empty());
        assert_eq!(diagnostics.converted.len(), 3);

        let names = listener_names(out.gateway.unwrap());
        assert_eq!(names, vec!["http-0", "http-1", "http-2"]);
    }

    #[test]
    fn test_tcp_only_produces_tls_routes() {
        let proxies = vec![
            tcp_proxy("a", "a.example.com", "a-tls", "a-svc"),
            tcp_proxy("b", "b.example.com", "b-tls", "b-svc"),
        ];
        let mut diagnostics = Diagnostics::default();
        let out = translate(Some(&base_gateway()), &proxies, &mut diagnostics).unwrap();

        assert!(out.http_routes.is_empty());
        assert_eq!(out.tls_routes.len(), 2);
    }

    #[test]
    fn test_tls_listener_and_parent_ref() {
        let proxies = vec![tcp_proxy("tls", "tls.example.com", "tls-secret", "tcp-svc")];
        let mut diagnostics = Diagnostics::default();
        let out = translate(Some(&base_gateway()), &proxies, &mut diagnostics).unwrap();

        let route = &out.tls_routes[0];
        assert_eq!(route.metadata, ObjectMeta::new("tls", "default"));
        assert_eq!(route.kind.as_deref(), Some("TLSRoute"));
        assert_eq!(route.spec.parent_refs.len(), 1);
        assert_eq!(route.spec.parent_refs[0].name, "contour");
        assert_eq!(route.spec.parent_refs[0].namespace.as_deref(), Some("projectcontour"));
        assert_eq!(route.spec.rules.len(), 1);
        assert_eq!(route.spec.rules[0].backend_refs, vec![BackendRef::service("tcp-svc", 443)]);

        let gateway = out.gateway.unwrap();
        assert_eq!(gateway.spec.listeners.len(), 1);
        let listener = &gateway.spec.listeners[0];
        assert_eq!(listener.name, "tls-0");
        assert_eq!(listener.protocol, ProtocolType::Tls);
        assert_eq!(listener.port, 443);
        assert_eq!(listener.hostname.as_deref(), Some("tls.example.com"));
        let tls = listener.tls.as_ref().unwrap();
        assert_eq!(tls.mode, Some(TlsModeType::Terminate));
        assert_eq!(tls.certificate_refs, vec![SecretObjectReference::named("tls-secret")]);
        assert_eq!(diagnostics.warning_count(), 0);
    }

    #[test]
    fn test_duplicate_fqdn_shares_listener() {
        let proxies = vec![
            http_proxy("a", "shared.example.com", "/a", "a-svc"),
            http_proxy("b", "shared.example.com", "/b", "b-svc"),
        ];
        let mut diagnostics = Diagnostics::default();
        let out = translate(Some(&base_gateway()), &proxies, &mut diagnostics).unwrap();

        assert_eq!(out.http_routes.len(), 2);
        let listeners = out.gateway.unwrap().spec.listeners;
        assert_eq!(listeners.len(), 1);
        assert_eq!(listeners[0].name, "http-0");
    }

    #[test]
    fn test_http_and_tls_listener_indices_share_sequence() {
        let proxies = vec![
            http_proxy("a", "a.example.com", "/", "a-svc"),
            tcp_proxy("b", "b.example.com", "b-tls", "b-svc"),
            http_proxy("c", "a.example.com", "/", "c-svc"),
            http_proxy("d", "d.example.com", "/", "d-svc"),
        ];
        let mut diagnostics = Diagnostics::default();
        let out = translate(Some(&base_gateway()), &proxies, &mut diagnostics).unwrap();

        let names = listener_names(out.gateway.unwrap());
        assert_eq!(names, vec!["http-0", "tls-1", "http-2"]);
    }

    #[test]
    fn test_includes_skipped_and_processing_continues() {
        let proxies = vec![
            with_includes(http_proxy("root", "root.example.com", "/", "root-svc")),
            http_proxy("next", "next.example.com", "/", "next-svc"),
        ];
        let mut diagnostics = Diagnostics::default();
        let out = translate(Some(&base_gateway()), &proxies, &mut diagnostics).unwrap();

        assert_eq!(out.http_routes.len(), 1);
        assert_eq!(out.http_routes[0].metadata.name, "next");
        assert_eq!(diagnostics.skipped.len(), 1);
        assert_eq!(diagnostics.skipped[0].resource, "default/root");
        assert_eq!(diagnostics.warning_count(), 1);
        assert_eq!(out.gateway.unwrap().spec.listeners.len(), 1);
    }

    #[test]
    fn test_includes_tcp_proxy_also_skipped() {
        let proxies = vec![with_includes(tcp_proxy("t", "t.example.com", "s", "svc"))];
        let mut diagnostics = Diagnostics::default();
        let out = translate(Some(&base_gateway()), &proxies, &mut diagnostics).unwrap();

        assert!(out.http_routes.is_empty());
        assert!(out.tls_routes.is_empty());
        assert!(out.gateway.unwrap().spec.listeners.is_empty());
    }

    #[test]
    fn test_missing_base_gateway_is_an_error() {
        let proxies = vec![http_proxy("echo", "echo.example.com", "/", "echo-svc")];
        let mut diagnostics = Diagnostics::default();
        let err = translate(None, &proxies, &mut diagnostics).unwrap_err();

        assert_eq!(
            err,
            TranslateError::MissingParentGateway {
                name: "echo".to_string(),
                namespace: "default".to_string(),
            }
        );
        assert!(err.to_string().contains("default/echo"));
    }

    #[test]
    fn test_no_base_gateway_with_only_skipped_proxies() {
        let proxies = vec![with_includes(http_proxy("root", "root.example.com", "/", "svc"))];
        let mut diagnostics = Diagnostics::default();
        let out = translate(None, &proxies, &mut diagnostics).unwrap();

        assert_eq!(out, Translation::default());
    }

    #[test]
    fn test_base_gateway_not_mutated() {
        let mut base = base_gateway();
        base.spec.listeners.push(Listener {
            name: "existing".to_string(),
            ..Listener::new(ProtocolType::Http, 80, Some("a.example.com"))
        });
        let snapshot = base.clone();

        let proxies = vec![
            http_proxy("a", "a.example.com", "/", "a-svc"),
            http_proxy("b", "b.example.com", "/", "b-svc"),
        ];
        let mut diagnostics = Diagnostics::default();
        let out = translate(Some(&base), &proxies, &mut diagnostics).unwrap();

        assert_eq!(base, snapshot);
        let listeners = out.gateway.unwrap().spec.listeners;
        assert_eq!(listeners.len(), 2);
        assert_eq!(listeners[0].name, "existing");
        assert_eq!(listeners[1].name, "http-1");
    }

    #[test]
    fn test_translation_is_repeatable() {
        let base = base_gateway();
        let proxies = vec![
            http_proxy("a", "a.example.com", "/", "a-svc"),
            tcp_proxy("b", "b.example.com", "b-tls", "b-svc"),
        ];

        let first = translate(Some(&base), &proxies, &mut Diagnostics::default()).unwrap();
        let second = translate(Some(&base), &proxies, &mut Diagnostics::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_fqdn_has_no_hostname() {
        let proxies = vec![http_proxy("a", "", "/", "a-svc")];
        let out = translate(Some(&base_gateway()), &proxies, &mut Diagnostics::default()).unwrap();

        assert_eq!(out.gateway.unwrap().spec.listeners[0].hostname, None);
    }

    #[test]
    fn test_missing_tls_secret_warns() {
        let mut proxy = tcp_proxy("t", "t.example.com", "", "svc");
        proxy.spec.virtualhost.as_mut().unwrap().tls = None;

        let mut diagnostics = Diagnostics::default();
        let out = translate(Some(&base_gateway()), &[proxy], &mut diagnostics).unwrap();

        let listener = &out.gateway.unwrap().spec.listeners[0];
        assert_eq!(
            listener.tls.as_ref().unwrap().certificate_refs,
            vec![SecretObjectReference::named("")]
        );
        assert_eq!(diagnostics.warning_count(), 1);
        assert!(diagnostics.warnings[0].message.contains("no TLS secret"));
    }

    #[test]
    fn test_passthrough_maps_to_terminate_with_warning() {
        let mut proxy = tcp_proxy("pt", "pt.example.com", "", "svc");
        proxy.spec.virtualhost.as_mut().unwrap().tls = Some(VirtualHostTls {
            secret_name: String::new(),
            passthrough: true,
        });

        let mut diagnostics = Diagnostics::default();
        let out = translate(Some(&base_gateway()), &[proxy], &mut diagnostics).unwrap();

        let tls = out.gateway.unwrap().spec.listeners[0].tls.clone().unwrap();
        assert_eq!(tls.mode, Some(TlsModeType::Terminate));
        assert_eq!(tls.certificate_refs, vec![SecretObjectReference::named("")]);
        assert_eq!(out.tls_routes.len(), 1);

        assert_eq!(diagnostics.warning_count(), 1);
        let warning = &diagnostics.warnings[0];
        assert_eq!(warning.resource, "default/pt");
        assert!(warning.message.contains("passthrough"));
        assert!(!warning.message.contains("no TLS secret"));
    }

    #[test]
    fn test_http_route_rule_shape() {
        let proxies = vec![http_proxy("echo", "echo.example.com", "/", "echo-svc")];
        let out = translate(Some(&base_gateway()), &proxies, &mut Diagnostics::default()).unwrap();

        let route = &out.http_routes[0];
        assert_eq!(route.metadata, ObjectMeta::new("echo", "default"));
        assert_eq!(route.spec.rules.len(), 1);
        let rule = &route.spec.rules[0];
        assert_eq!(rule.matches.len(), 1);
        assert_eq!(rule.matches[0].path, Some(HttpPathMatch::prefix("/")));
        assert_eq!(rule.backend_refs, vec![BackendRef::service("echo-svc", 80)]);
    }
}
