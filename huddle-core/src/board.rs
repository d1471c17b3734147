//! Client-side list of the current profile's events.
//!
//! Edits are applied locally first. The server's answer then replaces the
//! local copy, or the previous value is put back if the request failed.

use std::collections::HashMap;

use tracing::debug;

use crate::draft::EventEdit;
use crate::error::{HuddleError, HuddleResult};
use crate::model::{Event, EventId, Profile, ProfileId};

/// Previous value of an event, kept until its update settles.
#[derive(Debug, Clone)]
#[must_use = "a staged edit must be committed or rolled back"]
pub struct Staged {
    previous: Event,
}

impl Staged {
    pub fn event_id(&self) -> &EventId {
        &self.previous.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventBoard {
    events: Vec<Event>,
}

impl EventBoard {
    pub fn new(events: Vec<Event>) -> Self {
        EventBoard { events }
    }

    /// Keep only events `profile` takes part in, preserving server order.
    pub fn for_profile(events: Vec<Event>, profile: &ProfileId) -> Self {
        EventBoard {
            events: events
                .into_iter()
                .filter(|e| e.has_participant(profile))
                .collect(),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn find(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    /// Apply `edit` to the local copy ahead of the server.
    ///
    /// `known` supplies names for newly added participants.
    pub fn stage(&mut self, edit: &EventEdit, known: &[Profile]) -> HuddleResult<Staged> {
        let slot = self
            .events
            .iter_mut()
            .find(|e| e.id == edit.event_id)
            .ok_or_else(|| HuddleError::NotFound(format!("event {}", edit.event_id)))?;

        let (start, end) = edit.instants()?;

        let mut lookup: HashMap<&ProfileId, &Profile> = known.iter().map(|p| (&p.id, p)).collect();
        for p in &slot.profiles {
            lookup.insert(&p.id, p);
        }
        let profiles = edit
            .participants
            .picked()
            .iter()
            .map(|id| match lookup.get(id) {
                Some(p) => (*p).clone(),
                None => Profile {
                    id: id.clone(),
                    name: id.to_string(),
                    timezone: crate::timezone::UTC_LABEL.to_string(),
                },
            })
            .collect();

        let next = Event {
            id: slot.id.clone(),
            profiles,
            start,
            end,
            timezone: edit.timezone.clone(),
        };
        let previous = std::mem::replace(slot, next);

        debug!(event = %previous.id, "staged local edit");
        Ok(Staged { previous })
    }

    /// Replace the local copy with what the server returned.
    pub fn commit(&mut self, staged: Staged, confirmed: Event) {
        debug!(event = %confirmed.id, "committed edit");
        match self.events.iter_mut().find(|e| e.id == staged.previous.id) {
            Some(slot) => *slot = confirmed,
            None => self.events.push(confirmed),
        }
    }

    /// Restore the value the event had before [`EventBoard::stage`].
    pub fn rollback(&mut self, staged: Staged) {
        debug!(event = %staged.previous.id, "rolled back local edit");
        if let Some(slot) = self.events.iter_mut().find(|e| e.id == staged.previous.id) {
            *slot = staged.previous;
        }
    }
}
