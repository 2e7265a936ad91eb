// src/accessibility/announcer.rs
//
// Posts a spoken announcement once the screen reader has finished whatever
// it is currently reading.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use super::center::{AnnouncementService, SubscriptionId};
use crate::services::Scheduler;

/// Delay before the blank nudge announcement. Text posted straight from a
/// user action is often dropped by the screen reader; a blank announcement
/// shortly after gets the queue moving.
pub const ANNOUNCEMENT_NUDGE_DELAY: Duration = Duration::from_millis(10);

pub struct AccessibilityAnnouncer<S, Q> {
    service: Rc<S>,
    scheduler: Rc<Q>,
    nudge_delay: Duration,
}

impl<S, Q> AccessibilityAnnouncer<S, Q>
where
    S: AnnouncementService + 'static,
    Q: Scheduler,
{
    pub fn new(service: Rc<S>, scheduler: Rc<Q>) -> Self {
        Self::with_nudge_delay(service, scheduler, ANNOUNCEMENT_NUDGE_DELAY)
    }

    pub fn with_nudge_delay(service: Rc<S>, scheduler: Rc<Q>, nudge_delay: Duration) -> Self {
        Self {
            service,
            scheduler,
            nudge_delay,
        }
    }

    /// Speak `text` after the next "announcement finished" event, once.
    /// Returns the listener subscription, which removes itself after firing.
    pub fn announce(&self, text: &str) -> SubscriptionId {
        let handled = Rc::new(Cell::new(false));
        let own_subscription: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));

        let service = Rc::downgrade(&self.service);
        let subscription = Rc::clone(&own_subscription);
        let message = text.to_string();
        let id = self.service.on_finished(Box::new(move |finished: &str| {
            if handled.get() {
                return;
            }
            let Some(service) = service.upgrade() else {
                return;
            };
            debug!(after = %finished, text = %message, "delivering announcement");
            service.post(&message);
            handled.set(true);
            if let Some(id) = subscription.take() {
                service.remove_listener(id);
            }
        }));
        own_subscription.set(Some(id));

        let service = Rc::downgrade(&self.service);
        self.scheduler.schedule_after(
            self.nudge_delay,
            Box::new(move || {
                if let Some(service) = service.upgrade() {
                    service.post(" ");
                }
            }),
        );
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessibility::AnnouncementCenter;
    use crate::services::DeferredQueue;

    fn announcer() -> (
        Rc<AnnouncementCenter>,
        Rc<DeferredQueue>,
        AccessibilityAnnouncer<AnnouncementCenter, DeferredQueue>,
    ) {
        let center = Rc::new(AnnouncementCenter::new());
        let queue = Rc::new(DeferredQueue::new());
        let announcer = AccessibilityAnnouncer::new(Rc::clone(&center), Rc::clone(&queue));
        (center, queue, announcer)
    }

    fn count(posted: &[String], text: &str) -> usize {
        posted.iter().filter(|p| p.as_str() == text).count()
    }

    #[test]
    fn test_nudge_then_message() {
        let (center, queue, announcer) = announcer();
        announcer.announce("Saved");
        assert!(center.posted().is_empty());

        queue.advance(Duration::from_millis(5));
        assert!(center.posted().is_empty());
        queue.advance(Duration::from_millis(5));
        assert_eq!(center.posted(), vec![" "]);

        // finishing the nudge delivers the real text
        center.finish_current();
        assert_eq!(center.posted(), vec![" ", "Saved"]);

        center.finish_current();
        queue.advance(Duration::from_secs(1));
        assert_eq!(center.posted(), vec![" ", "Saved"]);
        assert_eq!(center.listener_count(), 0);
    }

    #[test]
    fn test_earlier_finish_event_delivers_before_nudge() {
        let (center, queue, announcer) = announcer();
        center.post("already speaking");
        announcer.announce("Saved");

        center.finish_current();
        queue.advance(ANNOUNCEMENT_NUDGE_DELAY);
        while center.finish_current().is_some() {}

        let posted = center.posted();
        assert_eq!(posted, vec!["already speaking", "Saved", " "]);
        assert_eq!(count(&posted, "Saved"), 1);
        assert_eq!(count(&posted, " "), 1);
    }

    #[test]
    fn test_repeated_finish_events_post_once() {
        let (center, _queue, announcer) = announcer();
        for _ in 0..3 {
            center.post("noise");
        }
        announcer.announce("Done");
        while center.finish_current().is_some() {}

        assert_eq!(count(&center.posted(), "Done"), 1);
    }

    #[test]
    fn test_custom_nudge_delay() {
        let center = Rc::new(AnnouncementCenter::new());
        let queue = Rc::new(DeferredQueue::new());
        let announcer = AccessibilityAnnouncer::with_nudge_delay(
            Rc::clone(&center),
            Rc::clone(&queue),
            Duration::from_millis(40),
        );
        announcer.announce("Hi");

        queue.advance(Duration::from_millis(39));
        assert!(center.posted().is_empty());
        queue.advance(Duration::from_millis(1));
        assert_eq!(center.posted(), vec![" "]);
    }
}
