//! Upload Guard - Frontend WebAssembly module
//!
//! Loaded into a page that hosts file uploaders. While any upload list shows
//! files, the page's navigation controls are locked so the user cannot leave
//! the upload view and cancel the transfers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      start / install                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Readiness gate (poll until every selector matches)          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Installation                                                │
//! │  ├── TabObserver   (upload tab class → attach / detach)      │
//! │  ├── ZoneObservers (upload list height → zone activity)      │
//! │  └── Leptos memo + effect → NavigationToggler → DomSurface   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`] - Page and JS configuration sources
//! - [`dom`] - DOM lookups and the control surface
//! - [`observers`] - Resize and mutation observers
//! - [`guard`] - Installation lifecycle

use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod dom;
pub mod observers;
pub mod guard;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{config_from_js, page_config};
pub use dom::DomSurface;
pub use observers::{TabObserver, ZoneObservers};
pub use upload_guard::{GuardConfig, GuardError, GuardResult};

// =============================================================================
// JavaScript API
// =============================================================================

/// WASM entry point - installs the guard when the page embeds a
/// configuration. Otherwise the page calls `install` itself.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Upload Guard - Starting");

    let config = match page_config() {
        Ok(Some(config)) => config,
        Ok(None) => {
            log::info!("No embedded configuration, waiting for install()");
            return;
        }
        Err(e) => {
            log::error!("❌ Invalid embedded configuration, guard not installed: {}", e);
            return;
        }
    };

    if let Err(e) = guard::install(config) {
        log::error!("❌ Upload guard not installed: {}", e);
    }
}

/// Install the guard with `config` (defaults when omitted), replacing the
/// current installation.
#[wasm_bindgen]
pub fn install(config: JsValue) -> Result<(), JsValue> {
    let config = config_from_js(config).map_err(dom::to_js_error)?;
    guard::install(config).map_err(dom::to_js_error)
}

/// Remove the guard and unlock navigation.
#[wasm_bindgen]
pub fn uninstall() -> bool {
    guard::uninstall()
}

/// Whether navigation is currently locked by an active upload.
#[wasm_bindgen(js_name = isNavigationLocked)]
pub fn is_navigation_locked() -> bool {
    guard::is_navigation_locked()
}

/// Number of upload zones currently holding files.
#[wasm_bindgen(js_name = activeUploadZones)]
pub fn active_upload_zones() -> usize {
    guard::active_upload_zones()
}
