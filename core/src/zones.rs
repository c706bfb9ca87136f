//! Upload zone activity.
//!
//! A zone is active while its upload list takes vertical space, i.e. while
//! at least one file is queued or uploading in it. Navigation stays locked
//! as long as any zone is active.

/// Activity flag of every upload zone, indexed like the configured zones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadZones {
    active: Vec<bool>,
}

impl UploadZones {
    /// `count` zones, all inactive.
    pub fn new(count: usize) -> Self {
        Self {
            active: vec![false; count],
        }
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Record the rendered height of zone `index`'s upload list.
    ///
    /// Returns `true` when the zone's activity changed. Unknown indexes are
    /// ignored.
    pub fn record_height(&mut self, index: usize, height: f64) -> bool {
        self.set_active(index, height > 0.0)
    }

    /// Set zone `index`'s flag directly. Returns `true` on change.
    pub fn set_active(&mut self, index: usize, active: bool) -> bool {
        match self.active.get_mut(index) {
            Some(flag) if *flag != active => {
                *flag = active;
                true
            }
            Some(_) => false,
            None => {
                log::warn!("Ignoring activity for unknown upload zone {}", index);
                false
            }
        }
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active.get(index).copied().unwrap_or(false)
    }

    /// Navigation must be locked iff this is true.
    pub fn any_active(&self) -> bool {
        self.active.iter().any(|a| *a)
    }

    /// Number of zones currently holding uploads.
    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|a| **a).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_inactive() {
        let zones = UploadZones::new(4);
        assert_eq!(zones.len(), 4);
        assert!(!zones.any_active());
        assert_eq!(zones.active_count(), 0);
    }

    #[test]
    fn test_any_active_tracks_every_zone() {
        let mut zones = UploadZones::new(3);

        assert!(zones.record_height(1, 48.0));
        assert!(zones.any_active());

        assert!(zones.record_height(2, 12.5));
        assert!(!zones.record_height(1, 96.0));
        assert_eq!(zones.active_count(), 2);

        assert!(zones.record_height(1, 0.0));
        assert!(zones.any_active(), "zone 2 still uploading");

        assert!(zones.record_height(2, 0.0));
        assert!(!zones.any_active());
    }

    #[test]
    fn test_nan_height_is_inactive() {
        let mut zones = UploadZones::new(1);
        assert!(!zones.record_height(0, f64::NAN));
        assert!(!zones.is_active(0));
    }

    #[test]
    fn test_unknown_index_ignored() {
        let mut zones = UploadZones::new(2);
        assert!(!zones.record_height(7, 30.0));
        assert!(!zones.any_active());
        assert!(!zones.is_active(7));
    }
}
