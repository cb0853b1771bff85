//! YAML decoding of input resources

use crate::contour::{HttpProxy, HTTP_PROXY_KIND};
use crate::gateway::{Gateway, GATEWAY_KIND};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Parse error at {file}:{line}: {message}")]
    Syntax {
        file: PathBuf,
        line: usize,
        column: Option<usize>,
        message: String,
    },

    /// `index` is the zero-based position of the document in the stream,
    /// counting empty documents.
    #[error("{file}: document {index} has kind {kind}, expected {expected}")]
    UnexpectedKind {
        file: PathBuf,
        index: usize,
        kind: String,
        expected: &'static str,
    },
}

/// Decode every HTTPProxy document in a YAML stream.
///
/// Empty documents are ignored. A document whose `kind` is set to anything
/// other than `HTTPProxy` is an error.
pub fn decode_proxies(content: &str, file: &Path) -> Result<Vec<HttpProxy>, DecodeError> {
    let mut proxies = Vec::new();
    for (index, proxy) in documents::<HttpProxy>(content, file)? {
        check_kind(proxy.kind.as_deref(), HTTP_PROXY_KIND, index, file)?;
        proxies.push(proxy);
    }
    Ok(proxies)
}

/// Decode the first non-empty document of a YAML stream as a Gateway.
///
/// Returns `None` when the stream holds no documents.
pub fn decode_gateway(content: &str, file: &Path) -> Result<Option<Gateway>, DecodeError> {
    let Some((index, gateway)) = documents::<Gateway>(content, file)?.into_iter().next() else {
        return Ok(None);
    };
    check_kind(gateway.kind.as_deref(), GATEWAY_KIND, index, file)?;
    Ok(Some(gateway))
}

/// Decode the non-empty documents of a stream, paired with their position
fn documents<T: DeserializeOwned>(
    content: &str,
    file: &Path,
) -> Result<Vec<(usize, T)>, DecodeError> {
    let mut values = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
        let value = Option::<T>::deserialize(document).map_err(|e| syntax_error(e, file))?;
        if let Some(value) = value {
            values.push((index, value));
        }
    }
    Ok(values)
}

/// Documents without a `kind` are accepted
fn check_kind(
    kind: Option<&str>,
    expected: &'static str,
    index: usize,
    file: &Path,
) -> Result<(), DecodeError> {
    match kind {
        Some(kind) if kind != expected => Err(DecodeError::UnexpectedKind {
            file: file.to_path_buf(),
            index,
            kind: kind.to_string(),
            expected,
        }),
        _ => Ok(()),
    }
}

fn syntax_error(e: serde_yaml::Error, file: &Path) -> DecodeError {
    DecodeError::Syntax {
        file: file.to_path_buf(),
        line: e.location().map(|l| l.line()).unwrap_or(0),
        column: e.location().map(|l| l.column()),
        message: e.to_string(),
    }
}
