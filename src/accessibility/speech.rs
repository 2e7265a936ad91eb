// src/accessibility/speech.rs
//
// Stand-in for a screen reader: "speaks" whatever the center is holding
// for a fixed time, then fires the finished event.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tracing::info;

use super::center::AnnouncementCenter;
use crate::services::Scheduler;

pub struct SpeechSimulator<Q> {
    center: Rc<AnnouncementCenter>,
    scheduler: Rc<Q>,
    speech_duration: Duration,
    speaking: Rc<Cell<bool>>,
}

impl<Q: Scheduler> SpeechSimulator<Q> {
    pub fn new(center: Rc<AnnouncementCenter>, scheduler: Rc<Q>, speech_duration: Duration) -> Self {
        Self {
            center,
            scheduler,
            speech_duration,
            speaking: Rc::new(Cell::new(false)),
        }
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking.get()
    }

    /// Call once per frame. Starts on the next queued announcement if idle.
    pub fn update(&self) {
        if self.speaking.get() {
            return;
        }
        let Some(text) = self.center.current() else {
            return;
        };
        info!(text = %text, "speaking");
        self.speaking.set(true);

        let center = Rc::downgrade(&self.center);
        let speaking = Rc::clone(&self.speaking);
        self.scheduler.schedule_after(
            self.speech_duration,
            Box::new(move || {
                speaking.set(false);
                if let Some(center) = center.upgrade() {
                    center.finish_current();
                }
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessibility::{AccessibilityAnnouncer, AnnouncementService};
    use crate::services::DeferredQueue;

    #[test]
    fn test_finishes_each_announcement_after_speaking() {
        let center = Rc::new(AnnouncementCenter::new());
        let queue = Rc::new(DeferredQueue::new());
        let speech = SpeechSimulator::new(
            Rc::clone(&center),
            Rc::clone(&queue),
            Duration::from_millis(100),
        );

        center.post("hello");
        speech.update();
        assert!(speech.is_speaking());
        speech.update();

        queue.advance(Duration::from_millis(99));
        assert_eq!(center.current().as_deref(), Some("hello"));
        queue.advance(Duration::from_millis(1));
        assert!(!speech.is_speaking());
        assert_eq!(center.current(), None);
    }

    #[test]
    fn test_drives_announcer_end_to_end() {
        let center = Rc::new(AnnouncementCenter::new());
        let queue = Rc::new(DeferredQueue::new());
        let speech = SpeechSimulator::new(
            Rc::clone(&center),
            Rc::clone(&queue),
            Duration::from_millis(50),
        );
        let announcer = AccessibilityAnnouncer::new(Rc::clone(&center), Rc::clone(&queue));

        announcer.announce("Saved");
        for _ in 0..20 {
            queue.advance(Duration::from_millis(10));
            speech.update();
        }

        assert_eq!(center.posted(), vec![" ", "Saved"]);
        assert_eq!(center.current(), None);
    }
}
