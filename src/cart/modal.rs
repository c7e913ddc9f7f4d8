//! Transient detail-view selection: at most one activity is open for
//! viewing/adding at a time, independent of the cart contents. Nothing is
//! persisted; the state resets with the page.

use crate::domain::activity::Activity;

#[derive(Debug, Default)]
pub struct ActivityModal {
    selected: Option<Activity>,
    open: bool,
}

impl ActivityModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, activity: Activity) {
        self.selected = Some(activity);
        self.open = true;
    }

    pub fn close(&mut self) {
        self.selected = None;
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selected(&self) -> Option<&Activity> {
        self.selected.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::stub::sample_activity;

    #[test]
    fn open_tracks_one_activity_at_a_time() {
        let mut modal = ActivityModal::new();
        assert!(!modal.is_open());

        modal.open(sample_activity(1, "5.00"));
        modal.open(sample_activity(2, "0.00"));
        assert!(modal.is_open());
        assert_eq!(modal.selected().unwrap().id.get(), 2);
    }

    #[test]
    fn close_clears_the_selection() {
        let mut modal = ActivityModal::new();
        modal.open(sample_activity(1, "5.00"));
        modal.close();

        assert!(!modal.is_open());
        assert!(modal.selected().is_none());
    }
}
