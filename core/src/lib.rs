//! # Upload Guard - keep users on the upload view while uploads run
//!
//! Leaving the upload view cancels in-flight uploads. The guard watches the
//! upload lists of a page and locks the navigation controls while any of
//! them holds files.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Readiness   │────▶│  Tab tracker │────▶│ Upload zones │────▶│  Navigation  │
//! │  (polling)   │     │ (attach/det.)│     │ (any active) │     │   toggler    │
//! └──────────────┘     └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! This crate holds the platform-independent part; the browser bindings live
//! in the `upload-guard-frontend` crate.
//!
//! ## Modules
//!
//! - [`error`] - Error type
//! - [`config`] - Selector configuration
//! - [`controls`] - Control roles and the navigation toggler
//! - [`zones`] - Upload zone activity
//! - [`readiness`] - Poll-until-ready gate
//! - [`tab`] - Upload tab selection tracking

pub mod error;
pub mod config;
pub mod controls;
pub mod zones;
pub mod readiness;
pub mod tab;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{GuardError, GuardResult};

pub use config::{
    GuardConfig,
    CONFIG_ELEMENT_ID,
    DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_UPLOAD_LIST_SELECTOR,
    DEFAULT_SELECTED_TAB_CLASS,
    DEFAULT_DISABLED_TAB_CLASS,
};

pub use controls::{
    ControlPatch,
    ControlRole,
    NavControl,
    NavigationSurface,
    NavigationToggler,
    StyleValue,
};

pub use zones::UploadZones;
pub use readiness::{Readiness, ReadinessGate};
pub use tab::{ObserverAction, TabTracker};
