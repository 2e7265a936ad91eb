// src/accessibility/center.rs
//
// In-process announcement service: a speech queue plus "finished" listeners.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::{debug, info};

pub type FinishedListener = Box<dyn FnMut(&str)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Host service that speaks announcements.
pub trait AnnouncementService {
    fn post(&self, text: &str);

    /// Listen for "announcement finished". The listener receives the text
    /// that just finished and stays registered until removed.
    fn on_finished(&self, listener: FinishedListener) -> SubscriptionId;

    fn remove_listener(&self, id: SubscriptionId);
}

type SharedListener = Rc<RefCell<FinishedListener>>;

/// How many posted announcements the center remembers.
pub const POSTED_HISTORY_LIMIT: usize = 64;

#[derive(Default)]
pub struct AnnouncementCenter {
    posted: RefCell<VecDeque<String>>,
    speaking: RefCell<VecDeque<String>>,
    listeners: RefCell<Vec<(SubscriptionId, SharedListener)>>,
    next_id: Cell<u64>,
}

impl AnnouncementCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent announcements, oldest first, at most
    /// `POSTED_HISTORY_LIMIT` of them.
    pub fn posted(&self) -> Vec<String> {
        self.posted.borrow().iter().cloned().collect()
    }

    pub fn current(&self) -> Option<String> {
        self.speaking.borrow().front().cloned()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Finish the announcement being spoken and notify listeners. Listeners
    /// may post or unsubscribe while being notified.
    pub fn finish_current(&self) -> Option<String> {
        let text = self.speaking.borrow_mut().pop_front()?;
        debug!(text = %text, "announcement finished");

        let snapshot: Vec<(SubscriptionId, SharedListener)> = self.listeners.borrow().clone();
        for (id, listener) in snapshot {
            if !self.is_subscribed(id) {
                continue;
            }
            let mut callback = listener.borrow_mut();
            (*callback)(&text);
        }
        Some(text)
    }

    fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.listeners
            .borrow()
            .iter()
            .any(|(existing, _)| *existing == id)
    }
}

impl AnnouncementService for AnnouncementCenter {
    fn post(&self, text: &str) {
        info!(text = %text, "announcement posted");
        let mut posted = self.posted.borrow_mut();
        if posted.len() == POSTED_HISTORY_LIMIT {
            posted.pop_front();
        }
        posted.push_back(text.to_string());
        drop(posted);
        self.speaking.borrow_mut().push_back(text.to_string());
    }

    fn on_finished(&self, listener: FinishedListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(listener))));
        id
    }

    fn remove_listener(&self, id: SubscriptionId) {
        self.listeners
            .borrow_mut()
            .retain(|(existing, _)| *existing != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posts_are_spoken_in_order() {
        let center = AnnouncementCenter::new();
        center.post("one");
        center.post("two");

        assert_eq!(center.current().as_deref(), Some("one"));
        assert_eq!(center.finish_current().as_deref(), Some("one"));
        assert_eq!(center.finish_current().as_deref(), Some("two"));
        assert_eq!(center.finish_current(), None);
        assert_eq!(center.posted(), vec!["one", "two"]);
    }

    #[test]
    fn test_listener_sees_finished_text_until_removed() {
        let center = AnnouncementCenter::new();
        let heard = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&heard);
        let id = center.on_finished(Box::new(move |text: &str| {
            sink.borrow_mut().push(text.to_string())
        }));

        center.post("a");
        center.finish_current();
        center.remove_listener(id);
        center.post("b");
        center.finish_current();

        assert_eq!(*heard.borrow(), vec!["a"]);
        assert_eq!(center.listener_count(), 0);
    }

    #[test]
    fn test_listener_can_remove_itself_while_notified() {
        let center = Rc::new(AnnouncementCenter::new());
        let calls = Rc::new(Cell::new(0));
        let slot: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));

        let weak = Rc::downgrade(&center);
        let counter = Rc::clone(&calls);
        let own_id = Rc::clone(&slot);
        let id = center.on_finished(Box::new(move |_: &str| {
            counter.set(counter.get() + 1);
            if let (Some(center), Some(id)) = (weak.upgrade(), own_id.take()) {
                center.remove_listener(id);
                center.post("follow-up");
            }
        }));
        slot.set(Some(id));

        center.post("first");
        center.finish_current();
        center.finish_current();

        assert_eq!(calls.get(), 1);
        assert_eq!(center.posted(), vec!["first", "follow-up"]);
    }

    #[test]
    fn test_history_keeps_only_recent_posts() {
        let center = AnnouncementCenter::new();
        for i in 0..POSTED_HISTORY_LIMIT + 10 {
            center.post(&format!("message {i}"));
        }

        let posted = center.posted();
        assert_eq!(posted.len(), POSTED_HISTORY_LIMIT);
        assert_eq!(posted[0], "message 10");
        assert_eq!(
            posted.last().map(String::as_str),
            Some(format!("message {}", POSTED_HISTORY_LIMIT + 9).as_str())
        );

        // the speech queue is not trimmed
        assert_eq!(center.current().as_deref(), Some("message 0"));
    }
}
