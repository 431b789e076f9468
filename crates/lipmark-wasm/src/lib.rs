use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderOptions {
    text_color: Option<String>,
    id_prefix: Option<String>,
    sanitized: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderResult {
    html: String,
    diagnostics: Vec<JsDiagnostic>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsDiagnostic {
    code: String,
    message: String,
}

#[wasm_bindgen]
pub fn render_html(source: &str) -> Result<JsValue, JsValue> {
    render_html_with_options(source, JsValue::UNDEFINED)
}

/// Renders `source` for injection into a page; the host runs
/// `lipmark.init()` afterwards to wire collapsibles and tooltips.
#[wasm_bindgen]
pub fn render_html_with_options(source: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let (core_options, sanitized) = options_from_js(options)?;
    let rendered = lipmark_core::render(source, &core_options);
    let html = if sanitized {
        lipmark_core::sanitize_html(&rendered.html)
    } else {
        rendered.html
    };

    let diagnostics = rendered
        .diagnostics
        .into_iter()
        .map(|diag| JsDiagnostic {
            code: diag.code.to_string(),
            message: diag.message,
        })
        .collect();

    let result = RenderResult { html, diagnostics };
    serde_wasm_bindgen::to_value(&result).map_err(|err| JsValue::from_str(&err.to_string()))
}

#[wasm_bindgen]
pub fn escape_html(text: &str) -> String {
    lipmark_core::escape_html(text)
}

fn options_from_js(value: JsValue) -> Result<(lipmark_core::RenderOptions, bool), JsValue> {
    if value.is_null() || value.is_undefined() {
        return Ok((lipmark_core::RenderOptions::default(), false));
    }
    let parsed: RenderOptions =
        serde_wasm_bindgen::from_value(value).map_err(|err| JsValue::from_str(&err.to_string()))?;
    let mut out = lipmark_core::RenderOptions::default();
    if let Some(text_color) = parsed.text_color {
        out.text_color = Some(text_color);
    }
    if let Some(id_prefix) = parsed.id_prefix {
        out.id_prefix = id_prefix;
    }
    Ok((out, parsed.sanitized.unwrap_or(false)))
}
