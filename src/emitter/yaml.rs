//! YAML output generation

use crate::translate::Translation;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("failed to serialize {kind} {name}: {source}")]
    Serialize {
        kind: &'static str,
        name: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// YAML emitter writing one document per resource
pub struct YamlEmitter {
    options: EmitterOptions,
}

/// Options for YAML emission
#[derive(Debug, Clone)]
pub struct EmitterOptions {
    /// Emit the Gateway document; routes are always emitted
    pub include_gateway: bool,
}

impl Default for EmitterOptions {
    fn default() -> Self {
        Self {
            include_gateway: true,
        }
    }
}

impl YamlEmitter {
    pub fn new(options: EmitterOptions) -> Self {
        Self { options }
    }

    /// Emit the translation as a `---` separated YAML stream: the Gateway
    /// first, then HTTPRoutes, then TLSRoutes.
    pub fn emit(&self, translation: &Translation) -> Result<String, EmitError> {
        let mut output = String::new();

        if self.options.include_gateway {
            if let Some(gateway) = &translation.gateway {
                emit_document(&mut output, "Gateway", &gateway.metadata.name, gateway)?;
            }
        }

        for route in &translation.http_routes {
            emit_document(&mut output, "HTTPRoute", &route.metadata.namespaced_name(), route)?;
        }
        for route in &translation.tls_routes {
            emit_document(&mut output, "TLSRoute", &route.metadata.namespaced_name(), route)?;
        }

        Ok(output)
    }
}

impl Default for YamlEmitter {
    fn default() -> Self {
        Self::new(EmitterOptions::default())
    }
}

fn emit_document<T: Serialize>(
    output: &mut String,
    kind: &'static str,
    name: &str,
    value: &T,
) -> Result<(), EmitError> {
    let yaml = serde_yaml::to_string(value).map_err(|source| EmitError::Serialize {
        kind,
        name: name.to_string(),
        source,
    })?;
    output.push_str("---\n");
    output.push_str(&yaml);
    Ok(())
}
