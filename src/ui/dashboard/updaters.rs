//! Dashboard state update logic
//!
//! Contains all methods for updating dashboard state from queued updates and events

use super::state::DashboardState;

use crate::location::LocationUpdate;

impl DashboardState {
    /// Apply everything queued since the last frame and advance the animation.
    pub fn update(&mut self) {
        self.tick += 1;

        // Readings first, in arrival order
        while let Some(update) = self.pending_updates.pop_front() {
            self.apply_update(update);
        }

        while let Some(event) = self.pending_events.pop_front() {
            self.add_to_activity_log(event);
        }

        self.heading.ease();
    }

    /// Feed one update through the shell. A reading without a heading leaves
    /// the needle where it is.
    fn apply_update(&mut self, update: LocationUpdate) {
        self.shell.apply(update);
        if let Some(heading) = self.shell.reading().heading {
            self.heading.update(heading);
        }
    }

    /// True until the first reading or error arrives.
    pub fn waiting_for_fix(&self) -> bool {
        self.shell.error().is_none() && self.shell.reading().latitude.is_none()
    }
}
