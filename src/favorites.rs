//! Optimistic favorite toggling.
//!
//! The button flips immediately, the backend call is awaited, and a
//! failure rolls the flip back. Every flip is tagged with an epoch;
//! resolutions carrying a stale epoch are dropped, so a slow response to
//! an earlier toggle can never overwrite the outcome of a later one.

/// Two-phase optimistic state for one listing's favorite flag.
#[derive(Clone, Debug)]
pub struct FavoriteToggle {
    is_favorite: bool,
    /// Last committed or rolled-back state, restored on failure.
    settled: bool,
    epoch: u64,
    in_flight: Option<u64>,
}

/// What the caller should do after beginning a toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingToggle {
    /// State to request from the backend (`true` = favorite).
    pub target: bool,
    /// Tag to hand back to [`FavoriteToggle::resolve`].
    pub epoch: u64,
}

impl FavoriteToggle {
    pub fn new(is_favorite: bool) -> Self {
        Self {
            is_favorite,
            settled: is_favorite,
            epoch: 0,
            in_flight: None,
        }
    }

    /// Displayed state, including any optimistic flip.
    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    /// Applies the speculative flip and returns what to send.
    pub fn begin(&mut self) -> PendingToggle {
        self.epoch += 1;
        self.is_favorite = !self.is_favorite;
        self.in_flight = Some(self.epoch);
        PendingToggle {
            target: self.is_favorite,
            epoch: self.epoch,
        }
    }

    /// Commits or reverts the flip tagged `epoch`. Resolutions for
    /// superseded toggles are ignored.
    pub fn resolve(&mut self, epoch: u64, success: bool) {
        if self.in_flight != Some(epoch) {
            return;
        }
        self.in_flight = None;
        if success {
            self.settled = self.is_favorite;
        } else {
            self.is_favorite = self.settled;
        }
    }
}
