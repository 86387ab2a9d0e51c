//! WASM bindings for wide-layout.
//!
//! Exposes `layout` and `layoutWithConfig` to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::config::{LayoutConfig, OutputFormat};

fn format_of(name: &str) -> Result<OutputFormat, JsError> {
    match name {
        "" | "json" => Ok(OutputFormat::Json),
        "svg" => Ok(OutputFormat::Svg),
        other => Err(JsError::new(&format!("unknown output format '{other}'"))),
    }
}

/// Lay out a graph document with default settings and return the JSON report.
#[wasm_bindgen]
pub fn layout(src: &str) -> Result<String, JsError> {
    crate::layout_text(src, &LayoutConfig::default(), OutputFormat::Json)
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Lay out a graph document with full control over options.
///
/// - `config_json`: a `LayoutConfig` JSON object, or empty for defaults
/// - `format`: "json", "svg", or empty string for JSON
#[wasm_bindgen(js_name = "layoutWithConfig")]
pub fn layout_with_config(src: &str, config_json: &str, format: &str) -> Result<String, JsError> {
    let config = if config_json.trim().is_empty() {
        LayoutConfig::default()
    } else {
        LayoutConfig::from_json(config_json).map_err(|e| JsError::new(&e.to_string()))?
    };
    crate::layout_text(src, &config, format_of(format)?).map_err(|e| JsError::new(&e.to_string()))
}
