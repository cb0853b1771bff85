//! proxy2gateway
//!
//! Convert Contour HTTPProxy resources to Gateway API resources: a Gateway
//! with one listener per distinct host binding, plus an HTTPRoute or
//! TLSRoute per HTTPProxy.

pub mod cli;
pub mod contour;
pub mod decode;
pub mod diagnostics;
pub mod emitter;
pub mod gateway;
pub mod translate;

pub use diagnostics::{Diagnostics, Severity};
pub use emitter::EmitterOptions;
pub use translate::{translate, TranslateError, Translation};

use decode::DecodeError;
use emitter::{EmitError, YamlEmitter};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Translate(#[from] TranslateError),

    #[error("Emission error: {0}")]
    Emission(#[from] EmitError),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Complete conversion result
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// Generated resources
    pub translation: Translation,
    /// Generated YAML stream
    pub yaml_output: String,
    /// Conversion diagnostics
    pub diagnostics: Diagnostics,
}

/// Options for conversion
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Emitter options
    pub emitter_options: EmitterOptions,
}

/// Convert an HTTPProxy file, optionally merging into a base Gateway file
pub fn convert(
    http_proxies: &Path,
    base_gateway: Option<&Path>,
    options: ConvertOptions,
) -> Result<ConversionResult> {
    let proxies_content = read_file(http_proxies)?;
    let gateway_content = base_gateway.map(read_file).transpose()?;

    convert_documents(
        (&proxies_content, http_proxies),
        gateway_content.as_deref().zip(base_gateway),
        options,
    )
}

/// Convert in-memory YAML streams
pub fn convert_string(
    http_proxies: &str,
    base_gateway: Option<&str>,
    options: ConvertOptions,
) -> Result<ConversionResult> {
    convert_documents(
        (http_proxies, Path::new("http-proxies.yaml")),
        base_gateway.map(|content| (content, Path::new("base-gateway.yaml"))),
        options,
    )
}

fn convert_documents(
    (proxies_content, proxies_path): (&str, &Path),
    base_gateway: Option<(&str, &Path)>,
    options: ConvertOptions,
) -> Result<ConversionResult> {
    let proxies = decode::decode_proxies(proxies_content, proxies_path)?;
    let base = match base_gateway {
        Some((content, path)) => decode::decode_gateway(content, path)?,
        None => None,
    };
    debug!(
        proxies = proxies.len(),
        base_gateway = base.is_some(),
        "decoded input resources"
    );

    let mut diagnostics = Diagnostics::default();
    let translation = translate(base.as_ref(), &proxies, &mut diagnostics)?;

    let yaml_output = YamlEmitter::new(options.emitter_options).emit(&translation)?;

    Ok(ConversionResult {
        translation,
        yaml_output,
        diagnostics,
    })
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ConvertError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}
