//! Guard configuration.
//!
//! The host page describes its layout with selectors: which elements are
//! navigation controls, which element is the upload tab and which regions
//! hold upload lists. Every field has a default so a page only needs to
//! override what differs.
//!
//! # Example
//!
//! ```json
//! {
//!   "uploadTab": "#upload-tab",
//!   "controls": [{ "selector": "#next-button", "role": "button" }],
//!   "uploadZones": ["#dataset-upload"],
//!   "pollIntervalMs": 100
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::controls::{ControlRole, NavControl};
use crate::error::{GuardError, GuardResult};

/// Id of the `<script type="application/json">` element holding the page
/// configuration.
pub const CONFIG_ELEMENT_ID: &str = "upload-guard-config";

/// Delay between two readiness checks.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 100;

/// Upload list rendered inside each upload zone (Ant Design uploader).
pub const DEFAULT_UPLOAD_LIST_SELECTOR: &str = ".ant-upload-list";

/// Class carried by the tab currently shown.
pub const DEFAULT_SELECTED_TAB_CLASS: &str = "tab--selected";

/// Class added to tabs while navigation is locked.
pub const DEFAULT_DISABLED_TAB_CLASS: &str = "tab--disabled";

/// Selectors and class names the guard works with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuardConfig {
    /// Tab whose selection switches upload tracking on and off
    pub upload_tab: String,
    /// Controls locked while an upload is active
    pub controls: Vec<NavControl>,
    /// One selector per upload zone
    pub upload_zones: Vec<String>,
    /// Upload list looked up inside each zone
    pub upload_list_selector: String,
    /// Class marking the selected tab
    pub selected_tab_class: String,
    /// Class added to locked tabs
    pub disabled_tab_class: String,
    /// Readiness polling period
    pub poll_interval_ms: u32,
    /// Stop polling after this many attempts (`None` polls forever)
    pub max_poll_attempts: Option<u32>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        let upload_tab = "#upload-tab".to_string();
        Self {
            controls: vec![
                NavControl::new("#navbar-tabs", ControlRole::TabBar),
                NavControl::new("#welcome-tab", ControlRole::Tab),
                NavControl::new(upload_tab.clone(), ControlRole::CurrentTab),
                NavControl::new("#analyze-tab", ControlRole::Tab),
                NavControl::new("#go-to-analyze-button", ControlRole::Button),
            ],
            upload_tab,
            upload_zones: vec![
                "#compare-set-upload".to_string(),
                "#golden-set-upload".to_string(),
                "#metadata-upload".to_string(),
                "#regions-upload".to_string(),
            ],
            upload_list_selector: DEFAULT_UPLOAD_LIST_SELECTOR.to_string(),
            selected_tab_class: DEFAULT_SELECTED_TAB_CLASS.to_string(),
            disabled_tab_class: DEFAULT_DISABLED_TAB_CLASS.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_poll_attempts: None,
        }
    }
}

impl GuardConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> GuardResult<Self> {
        let config: GuardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> GuardResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Pretty JSON rendering, the format accepted by [`GuardConfig::from_json`].
    pub fn to_json_pretty(&self) -> GuardResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every selector and class name is usable.
    pub fn validate(&self) -> GuardResult<()> {
        require_selector("uploadTab", &self.upload_tab)?;
        require_selector("uploadListSelector", &self.upload_list_selector)?;
        require_class_name("selectedTabClass", &self.selected_tab_class)?;
        require_class_name("disabledTabClass", &self.disabled_tab_class)?;

        if self.poll_interval_ms == 0 {
            return Err(GuardError::invalid("pollIntervalMs", "must be greater than zero"));
        }
        if self.max_poll_attempts == Some(0) {
            return Err(GuardError::invalid("maxPollAttempts", "must be greater than zero when set"));
        }

        if self.upload_zones.is_empty() {
            return Err(GuardError::invalid("uploadZones", "at least one upload zone is required"));
        }
        for (i, zone) in self.upload_zones.iter().enumerate() {
            require_selector(&format!("uploadZones[{}]", i), zone)?;
        }

        let mut seen = HashSet::new();
        for (i, control) in self.controls.iter().enumerate() {
            let field = format!("controls[{}].selector", i);
            require_selector(&field, &control.selector)?;
            if !seen.insert(control.selector.as_str()) {
                return Err(GuardError::invalid(
                    field,
                    format!("duplicate control selector '{}'", control.selector),
                ));
            }
        }

        Ok(())
    }

    /// Every element that must exist before the guard can be wired:
    /// controls, the upload tab and the upload zones, without duplicates.
    pub fn required_selectors(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.controls
            .iter()
            .map(|c| c.selector.as_str())
            .chain(std::iter::once(self.upload_tab.as_str()))
            .chain(self.upload_zones.iter().map(String::as_str))
            .filter(|s| seen.insert(*s))
            .map(str::to_string)
            .collect()
    }

    /// Upload list selector for each zone, in zone order.
    pub fn upload_list_selectors(&self) -> Vec<String> {
        self.upload_zones
            .iter()
            .map(|zone| format!("{} {}", zone, self.upload_list_selector))
            .collect()
    }

    /// `<script>` tag embedding this configuration into a page.
    pub fn embed_tag(&self) -> GuardResult<String> {
        // "</" would close the script element early
        let json = serde_json::to_string(self)?.replace("</", "<\\/");
        Ok(format!(
            r#"<script type="application/json" id="{}">{}</script>"#,
            CONFIG_ELEMENT_ID, json
        ))
    }
}

fn require_selector(field: &str, selector: &str) -> GuardResult<()> {
    if selector.trim().is_empty() {
        return Err(GuardError::invalid(field, "selector must not be empty"));
    }
    Ok(())
}

fn require_class_name(field: &str, class: &str) -> GuardResult<()> {
    if class.is_empty() {
        return Err(GuardError::invalid(field, "class name must not be empty"));
    }
    if class.chars().any(char::is_whitespace) {
        return Err(GuardError::invalid(field, "class name must not contain whitespace"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_is_valid() {
        assert!(GuardConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = GuardConfig::from_json(r##"{"uploadZones": ["#only-zone"]}"##).unwrap();
        assert_eq!(config.upload_zones, vec!["#only-zone"]);
        assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        assert_eq!(config.upload_list_selector, ".ant-upload-list");
        assert_eq!(config.controls.len(), 5);
    }

    #[test]
    fn test_roles_deserialize_kebab_case() {
        let json = r##"{
            "controls": [
                {"selector": "#bar", "role": "tab-bar"},
                {"selector": "#here", "role": "current-tab"}
            ]
        }"##;
        let config = GuardConfig::from_json(json).unwrap();
        assert_eq!(config.controls[0].role, ControlRole::TabBar);
        assert_eq!(config.controls[1].role, ControlRole::CurrentTab);
    }

    #[test]
    fn test_rejects_zero_poll_interval() {
        let err = GuardConfig::from_json(r#"{"pollIntervalMs": 0}"#).unwrap_err();
        assert!(err.to_string().contains("pollIntervalMs"));
    }

    #[test]
    fn test_rejects_empty_zones() {
        let err = GuardConfig::from_json(r#"{"uploadZones": []}"#).unwrap_err();
        assert!(err.to_string().contains("uploadZones"));
    }

    #[test]
    fn test_rejects_blank_zone_selector() {
        let err = GuardConfig::from_json(r##"{"uploadZones": ["#a", "  "]}"##).unwrap_err();
        assert!(err.to_string().contains("uploadZones[1]"));
    }

    #[test]
    fn test_rejects_duplicate_controls() {
        let json = r##"{
            "controls": [
                {"selector": "#x", "role": "tab"},
                {"selector": "#x", "role": "button"}
            ]
        }"##;
        let err = GuardConfig::from_json(json).unwrap_err();
        assert!(err.to_string().contains("controls[1].selector"));
    }

    #[test]
    fn test_rejects_class_with_space() {
        let err = GuardConfig::from_json(r#"{"disabledTabClass": "tab disabled"}"#).unwrap_err();
        assert!(err.to_string().contains("disabledTabClass"));
    }

    #[test]
    fn test_required_selectors_dedup() {
        let config = GuardConfig::default();
        let required = config.required_selectors();

        // upload tab is also a control, listed once
        assert_eq!(required.iter().filter(|s| *s == "#upload-tab").count(), 1);
        assert_eq!(required.len(), 5 + 4);
        assert_eq!(required[0], "#navbar-tabs");
        assert_eq!(required.last().unwrap(), "#regions-upload");
    }

    #[test]
    fn test_upload_list_selectors() {
        let config = GuardConfig::default();
        let lists = config.upload_list_selectors();
        assert_eq!(lists[0], "#compare-set-upload .ant-upload-list");
        assert_eq!(lists.len(), config.upload_zones.len());
    }

    #[test]
    fn test_embed_tag_escapes_script_close() {
        let mut config = GuardConfig::default();
        config.upload_tab = "div[title='</script>']".to_string();
        let tag = config.embed_tag().unwrap();
        assert!(tag.starts_with(r#"<script type="application/json" id="upload-guard-config">"#));
        assert_eq!(tag.matches("</script>").count(), 1);
        assert!(tag.ends_with("</script>"));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"pollIntervalMs": 250}}"#).unwrap();

        let config = GuardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.poll_interval_ms, 250);
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GuardConfig::from_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, GuardError::Io(_)));
    }

    #[test]
    fn test_pretty_json_reparses() {
        let config = GuardConfig::default();
        let json = config.to_json_pretty().unwrap();
        assert!(json.contains("\"uploadListSelector\""));
        assert_eq!(GuardConfig::from_json(&json).unwrap(), config);
    }
}
