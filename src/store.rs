use chrono::NaiveDate;
use uuid::Uuid;

use crate::schedule::{CalendarEvent, EventTag};

/// In-memory event collection. Events are never edited in place; the UI
/// deletes and re-adds. Dates arrive here already parsed, so a malformed
/// date cannot enter the collection.
#[derive(Default)]
pub struct EventStore {
    events: Vec<CalendarEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new event and returns its store-assigned id.
    pub fn add(&mut self, date: NaiveDate, time: String, title: String, tag: EventTag) -> String {
        let id = Uuid::new_v4().to_string();
        self.events.push(CalendarEvent {
            id: id.clone(),
            date,
            time,
            title,
            tag,
        });
        id
    }

    /// Removes the event with the given id; false if no such event.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.events.iter().position(|e| e.id == id) {
            Some(idx) => {
                self.events.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }
}
