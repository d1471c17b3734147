//! Event forms: collecting inputs and validating them before submission.
//!
//! Nothing here talks to the network. A form that fails validation must
//! never produce a request.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::error::{HuddleError, HuddleResult};
use crate::format::{self, LOCAL_INPUT_FORMAT};
use crate::membership::{self, Selection};
use crate::model::{Event, EventId, ProfileId};
use crate::protocol::{CreateEventRequest, UpdateEventRequest};
use crate::timezone;

/// Parse a wall-clock date-time such as `2025-03-20T15:00`.
///
/// Seconds and a space separator are tolerated.
pub fn parse_local(input: &str) -> HuddleResult<NaiveDateTime> {
    let input = input.trim();
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .ok_or_else(|| {
            HuddleError::Validation(format!(
                "Invalid date/time '{}'. Expected YYYY-MM-DDTHH:MM",
                input
            ))
        })
}

/// Combine separate date (`YYYY-MM-DD`) and time (`HH:MM`) inputs.
pub fn combine(date: &str, time: &str) -> HuddleResult<NaiveDateTime> {
    let d = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
        HuddleError::Validation(format!("Invalid date '{}'. Expected YYYY-MM-DD", date))
    })?;
    let t = NaiveTime::parse_from_str(time.trim(), "%H:%M").map_err(|_| {
        HuddleError::Validation(format!("Invalid time '{}'. Expected HH:MM", time))
    })?;
    Ok(d.and_time(t))
}

/// Interpret a wall-clock time in `label`'s zone.
///
/// Ambiguous times (clocks going back) take the earlier instant; times
/// skipped by a DST jump are rejected.
pub fn local_to_instant(local: &NaiveDateTime, label: &str) -> HuddleResult<DateTime<Utc>> {
    let tz = timezone::zone(label)?;
    tz.from_local_datetime(local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            HuddleError::Validation(format!("{} does not exist in {}", wire(local), label))
        })
}

fn wire(local: &NaiveDateTime) -> String {
    local.format(LOCAL_INPUT_FORMAT).to_string()
}

/// Start and end checks shared by creation and editing.
fn check_times(
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    label: &str,
) -> HuddleResult<(NaiveDateTime, NaiveDateTime)> {
    if label.trim().is_empty() {
        return Err(HuddleError::Validation("Select a timezone".into()));
    }
    timezone::zone(label)?;

    let start = start.ok_or_else(|| HuddleError::Validation("Start date and time are required".into()))?;
    let end = end.ok_or_else(|| HuddleError::Validation("End date and time are required".into()))?;

    if local_to_instant(&end, label)? < local_to_instant(&start, label)? {
        return Err(HuddleError::Validation(format!(
            "End ({}) is before start ({})",
            wire(&end),
            wire(&start)
        )));
    }

    Ok((start, end))
}

/// Inputs for a new event.
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub participants: Selection,
    pub timezone: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl EventDraft {
    pub fn new(timezone: impl Into<String>) -> Self {
        EventDraft {
            timezone: timezone.into(),
            ..Default::default()
        }
    }

    /// Validate the draft and build the creation request.
    pub fn validate(&self) -> HuddleResult<CreateEventRequest> {
        if self.participants.is_empty() {
            return Err(HuddleError::Validation("Select at least one participant".into()));
        }
        let (start, end) = check_times(self.start, self.end, &self.timezone)?;

        Ok(CreateEventRequest {
            profile_ids: self.participants.picked().to_vec(),
            timezone: self.timezone.clone(),
            start: wire(&start),
            end: wire(&end),
        })
    }
}

/// An edit form seeded from an existing event.
#[derive(Debug, Clone)]
pub struct EventEdit {
    pub event_id: EventId,
    pub original: Event,
    pub participants: Selection,
    pub timezone: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl EventEdit {
    /// Seed the form with the event's participants, zone and times.
    ///
    /// Times are shown as wall-clock in the event's own zone so that
    /// saving without changes sends back the same instants. An event whose
    /// label no longer resolves is seeded in UTC.
    pub fn from_event(event: &Event) -> Self {
        let timezone = match timezone::zone(&event.timezone) {
            Ok(_) => event.timezone.clone(),
            Err(_) => timezone::UTC_LABEL.to_string(),
        };
        let wall_clock = |instant: &DateTime<Utc>| {
            format::to_local_input(instant, &timezone)
                .and_then(|input| parse_local(&input))
                .ok()
        };
        let start = wall_clock(&event.start);
        let end = wall_clock(&event.end);

        EventEdit {
            event_id: event.id.clone(),
            original: event.clone(),
            participants: event.profiles.iter().map(|p| p.id.clone()).collect(),
            timezone,
            start,
            end,
        }
    }

    pub fn toggle(&mut self, id: ProfileId) {
        self.participants.toggle(id);
    }

    /// Validate the form and build the update request.
    ///
    /// `acting` is the current profile, recorded by the server in the log.
    pub fn validate(&self, acting: Option<&ProfileId>) -> HuddleResult<UpdateEventRequest> {
        if self.participants.is_empty() {
            return Err(HuddleError::Validation(
                "An event needs at least one participant".into(),
            ));
        }
        let (start, end) = check_times(self.start, self.end, &self.timezone)?;
        let delta = membership::reconcile(&self.original.participant_ids(), &self.participants.ids());

        Ok(UpdateEventRequest {
            start: wire(&start),
            end: wire(&end),
            timezone: self.timezone.clone(),
            add_profiles: delta.to_add,
            remove_profiles: delta.to_remove,
            profile_id: acting.cloned(),
        })
    }

    /// Start and end instants described by the form.
    ///
    /// A time still showing its seeded value maps back to the event's own
    /// instant, so the second pass through a repeated DST hour is kept.
    pub fn instants(&self) -> HuddleResult<(DateTime<Utc>, DateTime<Utc>)> {
        let (start, end) = check_times(self.start, self.end, &self.timezone)?;
        Ok((
            self.instant(&start, &self.original.start)?,
            self.instant(&end, &self.original.end)?,
        ))
    }

    fn instant(&self, local: &NaiveDateTime, seeded_from: &DateTime<Utc>) -> HuddleResult<DateTime<Utc>> {
        match format::to_local_input(seeded_from, &self.timezone) {
            Ok(seeded) if seeded == wire(local) => Ok(*seeded_from),
            _ => local_to_instant(local, &self.timezone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn local(s: &str) -> NaiveDateTime {
        parse_local(s).unwrap()
    }

    fn event() -> Event {
        serde_json::from_value(serde_json::json!({
            "_id": "ev1",
            "profiles": [
                {"_id": "p1", "name": "Ada", "timezone": "UTC"},
                {"_id": "p2", "name": "Grace", "timezone": "UTC"}
            ],
            "startDateTime": "2024-01-15T17:30:00Z",
            "endDateTime": "2024-01-15T18:30:00Z",
            "timezone": "India Standard Time (IST)"
        }))
        .unwrap()
    }

    fn complete_draft() -> EventDraft {
        let mut draft = EventDraft::new("Tokyo");
        draft.participants.toggle("p1".into());
        draft.start = Some(local("2024-01-15T09:00"));
        draft.end = Some(local("2024-01-15T10:00"));
        draft
    }

    #[test]
    fn parse_local_accepts_common_shapes() {
        assert_eq!(local("2024-01-15T09:00"), local("2024-01-15 09:00"));
        assert_eq!(local("2024-01-15T09:00:00"), local("2024-01-15T09:00"));
        assert!(parse_local("15/01/2024 9am").is_err());
    }

    #[test]
    fn combine_date_and_time() {
        assert_eq!(combine("2024-01-15", "09:30").unwrap(), local("2024-01-15T09:30"));
        assert!(combine("2024-01-15", "").is_err());
        assert!(combine("", "09:30").is_err());
    }

    #[test]
    fn valid_draft_builds_request() {
        let req = complete_draft().validate().unwrap();
        assert_eq!(req.profile_ids, vec![ProfileId::from("p1")]);
        assert_eq!(req.timezone, "Tokyo");
        assert_eq!(req.start, "2024-01-15T09:00");
        assert_eq!(req.end, "2024-01-15T10:00");
    }

    #[test]
    fn draft_without_participants_is_rejected() {
        let mut draft = complete_draft();
        draft.participants = Selection::new();
        let err = draft.validate().unwrap_err();
        assert!(matches!(err, HuddleError::Validation(_)));
    }

    #[test]
    fn draft_with_missing_times_is_rejected() {
        let mut draft = complete_draft();
        draft.end = None;
        assert!(matches!(draft.validate(), Err(HuddleError::Validation(_))));

        let mut draft = complete_draft();
        draft.start = None;
        assert!(matches!(draft.validate(), Err(HuddleError::Validation(_))));
    }

    #[test]
    fn draft_ending_before_start_is_rejected() {
        let mut draft = complete_draft();
        draft.end = Some(local("2024-01-15T08:59"));
        assert!(matches!(draft.validate(), Err(HuddleError::Validation(_))));
    }

    #[test]
    fn zero_length_event_is_allowed() {
        let mut draft = complete_draft();
        draft.end = draft.start;
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn draft_with_unknown_zone_is_rejected() {
        let mut draft = complete_draft();
        draft.timezone = "Eastern Time (ET)".to_string();
        assert!(matches!(draft.validate(), Err(HuddleError::UnknownTimezone(_))));

        draft.timezone = String::new();
        assert!(matches!(draft.validate(), Err(HuddleError::Validation(_))));
    }

    #[test]
    fn skipped_local_time_is_rejected() {
        // 02:30 does not exist in New York on 2024-03-10
        let err = local_to_instant(&local("2024-03-10T02:30"), "Eastern Time (US & Canada)").unwrap_err();
        assert!(matches!(err, HuddleError::Validation(_)));
    }

    #[test]
    fn local_to_instant_applies_offset() {
        let instant = local_to_instant(&local("2024-01-15T23:00"), "India Standard Time (IST)").unwrap();
        assert_eq!(instant.to_rfc3339(), "2024-01-15T17:30:00+00:00");
    }

    #[test]
    fn edit_is_seeded_in_event_zone() {
        let edit = EventEdit::from_event(&event());
        assert_eq!(edit.timezone, "India Standard Time (IST)");
        assert_eq!(edit.start, Some(local("2024-01-15T23:00")));
        assert_eq!(edit.end, Some(local("2024-01-16T00:00")));
        assert_eq!(edit.participants.ids(), BTreeSet::from([ProfileId::from("p1"), ProfileId::from("p2")]));
    }

    #[test]
    fn edit_with_broken_zone_falls_back_to_utc() {
        let mut ev = event();
        ev.timezone = "Eastern Time (ET)".to_string();
        let edit = EventEdit::from_event(&ev);
        assert_eq!(edit.timezone, "UTC");
        assert_eq!(edit.start, Some(local("2024-01-15T17:30")));
    }

    #[test]
    fn unchanged_edit_round_trips_times() {
        let edit = EventEdit::from_event(&event());
        let req = edit.validate(None).unwrap();
        assert_eq!(req.start, "2024-01-15T23:00");
        assert!(req.add_profiles.is_empty());
        assert!(req.remove_profiles.is_empty());
        assert_eq!(
            local_to_instant(&local(&req.start), &req.timezone).unwrap(),
            event().start
        );
    }

    #[test]
    fn unchanged_times_in_repeated_hour_keep_their_instant() {
        // 06:30Z is the second 01:30 in New York on 2024-11-03
        let mut ev = event();
        ev.timezone = "Eastern Time (US & Canada)".to_string();
        ev.start = "2024-11-03T06:30:00Z".parse().unwrap();
        ev.end = "2024-11-03T06:45:00Z".parse().unwrap();

        let edit = EventEdit::from_event(&ev);
        assert_eq!(edit.start, Some(local("2024-11-03T01:30")));
        assert_eq!(edit.instants().unwrap(), (ev.start, ev.end));

        let mut moved = edit.clone();
        moved.start = Some(local("2024-11-03T01:00"));
        let (start, _) = moved.instants().unwrap();
        assert_eq!(start.to_rfc3339(), "2024-11-03T05:00:00+00:00");
    }

    #[test]
    fn edit_sends_membership_delta() {
        let mut edit = EventEdit::from_event(&event());
        edit.toggle("p1".into());
        edit.toggle("p3".into());

        let acting = ProfileId::from("p2");
        let req = edit.validate(Some(&acting)).unwrap();
        assert_eq!(req.add_profiles, BTreeSet::from([ProfileId::from("p3")]));
        assert_eq!(req.remove_profiles, BTreeSet::from([ProfileId::from("p1")]));
        assert_eq!(req.profile_id, Some(acting));
    }

    #[test]
    fn edit_removing_everyone_is_rejected() {
        let mut edit = EventEdit::from_event(&event());
        edit.toggle("p1".into());
        edit.toggle("p2".into());
        assert!(matches!(edit.validate(None), Err(HuddleError::Validation(_))));
    }
}
