// src/accessibility/mod.rs
//
// Spoken feedback for screen-reader users.

pub mod announcer;
pub mod center;
pub mod speech;

pub use announcer::{AccessibilityAnnouncer, ANNOUNCEMENT_NUDGE_DELAY};
pub use center::{
    AnnouncementCenter, AnnouncementService, FinishedListener, SubscriptionId, POSTED_HISTORY_LIMIT,
};
pub use speech::SpeechSimulator;

use std::cell::Cell;

/// Whether the host wants spoken feedback instead of motion.
pub trait AccessibilityStatus {
    fn prefers_spoken_feedback(&self) -> bool;
}

impl AccessibilityStatus for bool {
    fn prefers_spoken_feedback(&self) -> bool {
        *self
    }
}

impl AccessibilityStatus for Cell<bool> {
    fn prefers_spoken_feedback(&self) -> bool {
        self.get()
    }
}
