//! WebAssembly bindings for proxy2gateway
//!
//! Enables running the HTTPProxy converter in the browser.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use proxy2gateway::{convert_string, ConvertOptions, EmitterOptions};

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Result of conversion
#[derive(Serialize)]
struct ConvertResult {
    success: bool,
    yaml: Option<String>,
    error: Option<String>,
    warnings: Vec<Warning>,
    skipped: Vec<String>,
}

/// Warning from conversion
#[derive(Serialize)]
struct Warning {
    severity: String,
    resource: String,
    message: String,
    suggestion: Option<String>,
}

/// Convert HTTPProxy YAML to Gateway API YAML
///
/// # Arguments
/// * `http_proxies` - One or more HTTPProxy documents
/// * `base_gateway` - Optional base Gateway document
/// * `routes_only` - Leave the Gateway out of the output
///
/// # Returns
/// A JavaScript object with:
/// - `success`: boolean indicating if conversion succeeded
/// - `yaml`: the generated YAML stream (if successful)
/// - `error`: error message (if failed)
/// - `warnings`: array of warnings from conversion
/// - `skipped`: HTTPProxies that produced no output
#[wasm_bindgen]
pub fn convert(http_proxies: &str, base_gateway: Option<String>, routes_only: bool) -> JsValue {
    let options = ConvertOptions {
        emitter_options: EmitterOptions {
            include_gateway: !routes_only,
        },
    };

    let base_gateway = base_gateway.filter(|g| !g.trim().is_empty());
    let result = match convert_string(http_proxies, base_gateway.as_deref(), options) {
        Ok(result) => {
            let warnings = result
                .diagnostics
                .warnings
                .iter()
                .map(|w| Warning {
                    severity: format!("{:?}", w.severity).to_lowercase(),
                    resource: w.resource.clone(),
                    message: w.message.clone(),
                    suggestion: w.suggestion.clone(),
                })
                .collect();

            let skipped = result
                .diagnostics
                .skipped
                .iter()
                .map(|s| s.resource.clone())
                .collect();

            ConvertResult {
                success: true,
                yaml: Some(result.yaml_output),
                error: None,
                warnings,
                skipped,
            }
        }
        Err(e) => ConvertResult {
            success: false,
            yaml: None,
            error: Some(e.to_string()),
            warnings: vec![],
            skipped: vec![],
        },
    };

    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        let version = get_version();
        assert!(!version.is_empty());
    }
}
