//! Guard configuration sources in the browser.
//!
//! The page can embed its configuration as JSON:
//!
//! ```html
//! <script type="application/json" id="upload-guard-config">{ ... }</script>
//! ```
//!
//! or pass a plain JS object to `install`. Missing fields take the
//! defaults of [`GuardConfig`].

use upload_guard::{GuardConfig, GuardError, GuardResult, CONFIG_ELEMENT_ID};
use wasm_bindgen::JsValue;

/// Configuration embedded in the page, if any.
pub fn page_config() -> GuardResult<Option<GuardConfig>> {
    let Some(element) = gloo_utils::document().get_element_by_id(CONFIG_ELEMENT_ID) else {
        return Ok(None);
    };

    let json = element.text_content().unwrap_or_default();
    GuardConfig::from_json(&json).map(Some)
}

/// Configuration from a JS object; `undefined` and `null` mean defaults.
pub fn config_from_js(value: JsValue) -> GuardResult<GuardConfig> {
    if value.is_undefined() || value.is_null() {
        return Ok(GuardConfig::default());
    }

    let config: GuardConfig = serde_wasm_bindgen::from_value(value)
        .map_err(|e| GuardError::invalid("config", e.to_string()))?;
    config.validate()?;
    Ok(config)
}
