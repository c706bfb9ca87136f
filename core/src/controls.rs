//! Navigation controls and the idempotent navigation toggler.
//!
//! Each control has a [`ControlRole`] deciding how it looks while locked.
//! [`NavigationToggler`] applies the per-role [`ControlPatch`] through a
//! [`NavigationSurface`], which the browser crate implements on top of the
//! DOM and tests implement in memory.

use serde::{Deserialize, Serialize};

use crate::error::GuardResult;

/// How a navigation control is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlRole {
    /// Form button moving to another view; gets the `disabled` flag.
    Button,
    /// Tab strip container; only shows a forbidden cursor.
    TabBar,
    /// Tab leading away from uploads; greyed out and unclickable.
    Tab,
    /// The upload tab itself; keeps a plain cursor.
    CurrentTab,
}

/// A selector and the role of the element it designates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavControl {
    pub selector: String,
    pub role: ControlRole,
}

impl NavControl {
    pub fn new(selector: impl Into<String>, role: ControlRole) -> Self {
        Self {
            selector: selector.into(),
            role,
        }
    }
}

/// Inline style change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleValue {
    Set(&'static str),
    /// Remove the inline property, restoring the stylesheet value.
    Clear,
}

/// Changes to apply to one control. `None` leaves the aspect untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlPatch {
    /// `disabled` attribute
    pub disabled: Option<bool>,
    /// `cursor` style
    pub cursor: Option<StyleValue>,
    /// `pointer-events` style
    pub pointer_events: Option<StyleValue>,
    /// `true` adds the disabled tab class, `false` removes it
    pub disabled_class: Option<bool>,
}

impl ControlRole {
    /// Patch putting a control of this role in the locked or unlocked state.
    pub fn patch(self, locked: bool) -> ControlPatch {
        let style = |value: &'static str| {
            if locked {
                StyleValue::Set(value)
            } else {
                StyleValue::Clear
            }
        };

        match self {
            ControlRole::Button => ControlPatch {
                disabled: Some(locked),
                cursor: Some(style("not-allowed")),
                ..ControlPatch::default()
            },
            ControlRole::TabBar => ControlPatch {
                cursor: Some(style("not-allowed")),
                ..ControlPatch::default()
            },
            ControlRole::Tab => ControlPatch {
                pointer_events: Some(style("none")),
                disabled_class: Some(locked),
                ..ControlPatch::default()
            },
            ControlRole::CurrentTab => ControlPatch {
                cursor: Some(style("default")),
                ..ControlPatch::default()
            },
        }
    }
}

/// Where control patches land.
pub trait NavigationSurface {
    /// Apply `patch` to the element designated by `control`.
    fn apply(&mut self, control: &NavControl, patch: &ControlPatch) -> GuardResult<()>;
}

/// Switches every navigation control between locked and unlocked.
///
/// Both directions are guarded by the current state, so repeated calls are
/// no-ops.
pub struct NavigationToggler<S> {
    controls: Vec<NavControl>,
    surface: S,
    disabled: bool,
}

impl<S: NavigationSurface> NavigationToggler<S> {
    /// Toggler starting in the unlocked state.
    pub fn new(controls: Vec<NavControl>, surface: S) -> Self {
        Self {
            controls,
            surface,
            disabled: false,
        }
    }

    /// Whether navigation is currently locked.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Lock navigation. Returns `Ok(false)` when it already was.
    pub fn disable(&mut self) -> GuardResult<bool> {
        if self.disabled {
            return Ok(false);
        }
        self.disabled = true;
        self.apply_all(true)?;
        Ok(true)
    }

    /// Unlock navigation. Returns `Ok(false)` when it already was.
    pub fn enable(&mut self) -> GuardResult<bool> {
        if !self.disabled {
            return Ok(false);
        }
        self.disabled = false;
        self.apply_all(false)?;
        Ok(true)
    }

    /// Lock when `locked`, unlock otherwise.
    pub fn sync(&mut self, locked: bool) -> GuardResult<bool> {
        if locked {
            self.disable()
        } else {
            self.enable()
        }
    }

    /// Visit every control even when one fails; report the first failure.
    fn apply_all(&mut self, locked: bool) -> GuardResult<()> {
        let mut first_error = None;
        for control in &self.controls {
            let patch = control.role.patch(locked);
            if let Err(e) = self.surface.apply(control, &patch) {
                log::warn!("Could not update '{}': {}", control.selector, e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
