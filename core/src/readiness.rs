//! Readiness gate.
//!
//! The host page renders its widgets asynchronously, so the guard polls
//! until every element it needs exists before wiring observers.

use crate::error::GuardError;

/// Attempts between two warnings about missing elements.
pub const WARN_EVERY_ATTEMPTS: u32 = 50;

/// Outcome of one readiness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// Every required element exists.
    Ready,
    /// Some elements are still missing; poll again.
    Pending { missing: Vec<String> },
    /// The attempt budget is spent.
    Exhausted { attempts: u32, missing: Vec<String> },
}

/// Tracks polling attempts against a fixed list of selectors.
#[derive(Debug, Clone)]
pub struct ReadinessGate {
    required: Vec<String>,
    max_attempts: Option<u32>,
    attempts: u32,
}

impl ReadinessGate {
    pub fn new(required: Vec<String>, max_attempts: Option<u32>) -> Self {
        Self {
            required,
            max_attempts,
            attempts: 0,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Run one check. `present` tells whether a selector matches an element.
    pub fn check(&mut self, present: impl Fn(&str) -> bool) -> Readiness {
        self.attempts += 1;

        let missing: Vec<String> = self
            .required
            .iter()
            .filter(|selector| !present(selector.as_str()))
            .cloned()
            .collect();

        if missing.is_empty() {
            log::debug!("Page ready after {} attempt(s)", self.attempts);
            return Readiness::Ready;
        }

        if self.max_attempts.is_some_and(|max| self.attempts >= max) {
            return Readiness::Exhausted {
                attempts: self.attempts,
                missing,
            };
        }

        if self.attempts % WARN_EVERY_ATTEMPTS == 0 {
            log::warn!(
                "Still waiting for {} element(s) after {} attempts: {:?}",
                missing.len(),
                self.attempts,
                missing
            );
        } else {
            log::trace!("Waiting for {:?}", missing);
        }

        Readiness::Pending { missing }
    }
}

impl Readiness {
    /// Error describing an exhausted gate, if that is the outcome.
    pub fn into_error(self) -> Option<GuardError> {
        match self {
            Readiness::Exhausted { attempts, missing } => {
                Some(GuardError::NotReady { attempts, missing })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;

    fn gate(max: Option<u32>) -> ReadinessGate {
        ReadinessGate::new(vec!["#tab".into(), "#zone".into()], max)
    }

    #[test]
    fn test_ready_when_all_present() {
        let mut gate = gate(None);
        assert_eq!(gate.check(|_| true), Readiness::Ready);
        assert_eq!(gate.attempts(), 1);
    }

    #[test]
    fn test_pending_lists_missing() {
        let mut gate = gate(None);
        let outcome = gate.check(|s| s == "#tab");
        assert_eq!(
            outcome,
            Readiness::Pending {
                missing: vec!["#zone".to_string()]
            }
        );
    }

    #[test]
    fn test_becomes_ready_once_rendered() {
        let rendered = RefCell::new(HashSet::<String>::new());
        let mut gate = gate(None);

        assert!(matches!(gate.check(|s| rendered.borrow().contains(s)), Readiness::Pending { .. }));
        rendered.borrow_mut().insert("#tab".to_string());
        assert!(matches!(gate.check(|s| rendered.borrow().contains(s)), Readiness::Pending { .. }));
        rendered.borrow_mut().insert("#zone".to_string());
        assert_eq!(gate.check(|s| rendered.borrow().contains(s)), Readiness::Ready);
        assert_eq!(gate.attempts(), 3);
    }

    #[test]
    fn test_unbounded_gate_keeps_polling() {
        let mut gate = gate(None);
        for _ in 0..(WARN_EVERY_ATTEMPTS * 3) {
            assert!(matches!(gate.check(|_| false), Readiness::Pending { .. }));
        }
    }

    #[test]
    fn test_bounded_gate_exhausts() {
        let mut gate = gate(Some(2));
        assert!(matches!(gate.check(|_| false), Readiness::Pending { .. }));

        let outcome = gate.check(|_| false);
        assert_eq!(
            outcome,
            Readiness::Exhausted {
                attempts: 2,
                missing: vec!["#tab".to_string(), "#zone".to_string()]
            }
        );
        let err = outcome.into_error().unwrap();
        assert!(err.to_string().contains("#zone"));
    }

    #[test]
    fn test_ready_on_last_attempt_wins() {
        let mut gate = gate(Some(1));
        assert_eq!(gate.check(|_| true), Readiness::Ready);
    }
}
