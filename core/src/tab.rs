//! Upload tab selection tracking.
//!
//! Upload activity only matters while the upload tab is shown. The tab's
//! class list is watched; selection transitions attach or detach the
//! upload zone observers.

/// What to do with the zone observers after a class change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverAction {
    Attach,
    Detach,
    /// Still selected: look the upload lists up again, the page may have
    /// re-rendered them.
    Refresh,
    /// Still deselected.
    Keep,
}

/// Remembers whether zone observers are attached.
#[derive(Debug, Clone)]
pub struct TabTracker {
    selected_class: String,
    tracking: bool,
}

impl TabTracker {
    /// Tracker for a tab marked selected by `selected_class`, starting
    /// detached.
    pub fn new(selected_class: impl Into<String>) -> Self {
        Self {
            selected_class: selected_class.into(),
            tracking: false,
        }
    }

    /// Whether zone observers are currently attached.
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Whether a `class` attribute value contains the selected class.
    pub fn is_selected(&self, class_attr: &str) -> bool {
        class_attr
            .split_whitespace()
            .any(|class| class == self.selected_class)
    }

    /// Feed the tab's current `class` attribute.
    pub fn on_class_change(&mut self, class_attr: &str) -> ObserverAction {
        self.on_selection(self.is_selected(class_attr))
    }

    /// Feed the tab's current selection state.
    pub fn on_selection(&mut self, selected: bool) -> ObserverAction {
        match (self.tracking, selected) {
            (false, true) => {
                self.tracking = true;
                ObserverAction::Attach
            }
            (true, false) => {
                self.tracking = false;
                ObserverAction::Detach
            }
            (true, true) => ObserverAction::Refresh,
            (false, false) => ObserverAction::Keep,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_class_matching() {
        let tracker = TabTracker::new("tab--selected");
        assert!(tracker.is_selected("tab tab--selected"));
        assert!(tracker.is_selected("  tab--selected\ttab "));
        assert!(!tracker.is_selected("tab tab--selected-not"));
        assert!(!tracker.is_selected(""));
    }

    #[test]
    fn test_selection_transitions() {
        let mut tracker = TabTracker::new("tab--selected");
        assert!(!tracker.is_tracking());

        assert_eq!(tracker.on_class_change("tab tab--selected"), ObserverAction::Attach);
        assert!(tracker.is_tracking());

        assert_eq!(tracker.on_class_change("tab"), ObserverAction::Detach);
        assert!(!tracker.is_tracking());

        assert_eq!(tracker.on_class_change("tab tab--selected"), ObserverAction::Attach);
    }

    #[test]
    fn test_deselected_churn_is_kept() {
        let mut tracker = TabTracker::new("tab--selected");

        assert_eq!(tracker.on_class_change("tab"), ObserverAction::Keep);
        assert_eq!(tracker.on_class_change("tab tab--disabled"), ObserverAction::Keep);
        assert!(!tracker.is_tracking());
    }

    #[test]
    fn test_selected_churn_refreshes() {
        let mut tracker = TabTracker::new("tab--selected");
        tracker.on_selection(true);

        // unrelated class churn while selected
        assert_eq!(
            tracker.on_class_change("tab tab--selected tab--disabled"),
            ObserverAction::Refresh
        );
        assert!(tracker.is_tracking());
        assert_eq!(tracker.on_class_change("tab"), ObserverAction::Detach);
    }
}
