//! Profiles, events and log entries as the scheduling API returns them.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::timezone::UTC_LABEL;

/// Opaque profile identifier assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(String);

/// Opaque event identifier assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }
    };
}

string_id!(ProfileId);
string_id!(EventId);

fn default_timezone() -> String {
    UTC_LABEL.to_string()
}

/// A person that can take part in events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: ProfileId,
    pub name: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Profile {
    /// Case-insensitive substring match on the name. An empty query matches.
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.trim().to_lowercase())
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A scheduled event.
///
/// `start` and `end` are absolute instants. `timezone` is the label of the
/// zone the event was created in and only matters for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: EventId,
    #[serde(default, deserialize_with = "deserialize_participants")]
    pub profiles: Vec<Profile>,
    #[serde(rename = "startDateTime")]
    pub start: DateTime<Utc>,
    #[serde(rename = "endDateTime")]
    pub end: DateTime<Utc>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Event {
    pub fn participant_ids(&self) -> BTreeSet<ProfileId> {
        self.profiles.iter().map(|p| p.id.clone()).collect()
    }

    pub fn has_participant(&self, id: &ProfileId) -> bool {
        self.profiles.iter().any(|p| &p.id == id)
    }

    /// Participant names joined for display, e.g. `Ada, Grace`.
    pub fn participant_names(&self) -> String {
        self.profiles
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One line of an event's audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

/// Participants arrive populated (`{_id, name, timezone}`) from list
/// endpoints, but some write endpoints answer with bare ids.
#[derive(Deserialize)]
#[serde(untagged)]
enum Participant {
    Populated(Profile),
    Bare(ProfileId),
}

fn deserialize_participants<'de, D>(deserializer: D) -> Result<Vec<Profile>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Participant>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|p| match p {
            Participant::Populated(profile) => profile,
            Participant::Bare(id) => Profile {
                name: id.to_string(),
                id,
                timezone: default_timezone(),
            },
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn event_from_server_json() {
        let json = r#"{
            "_id": "ev1",
            "profiles": [
                {"_id": "p1", "name": "Ada", "timezone": "UTC"},
                {"_id": "p2", "name": "Grace", "timezone": "Tokyo", "__v": 0}
            ],
            "startDateTime": "2024-01-15T17:30:00.000Z",
            "endDateTime": "2024-01-15T18:30:00.000Z",
            "timezone": "India Standard Time (IST)",
            "createdAt": "2024-01-10T08:00:00.000Z"
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.id.as_str(), "ev1");
        assert_eq!(event.participant_names(), "Ada, Grace");
        assert_eq!(event.start, Utc.with_ymd_and_hms(2024, 1, 15, 17, 30, 0).unwrap());
        assert_eq!(event.timezone, "India Standard Time (IST)");
        assert!(event.has_participant(&"p2".into()));
        assert!(!event.has_participant(&"p3".into()));
    }

    #[test]
    fn bare_participant_ids_are_accepted() {
        let json = r#"{
            "_id": "ev1",
            "profiles": ["p1", {"_id": "p2", "name": "Grace"}],
            "startDateTime": "2024-01-15T17:30:00Z",
            "endDateTime": "2024-01-15T18:30:00Z",
            "timezone": "UTC"
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.profiles[0].id.as_str(), "p1");
        assert_eq!(event.profiles[0].name, "p1");
        assert_eq!(event.profiles[1].timezone, "UTC");
        assert_eq!(
            event.participant_ids(),
            BTreeSet::from([ProfileId::from("p1"), ProfileId::from("p2")])
        );
    }

    #[test]
    fn profile_search_is_case_insensitive() {
        let profile = Profile {
            id: "p1".into(),
            name: "Grace Hopper".to_string(),
            timezone: "UTC".to_string(),
        };
        assert!(profile.matches(""));
        assert!(profile.matches("hop"));
        assert!(profile.matches("GRACE"));
        assert!(!profile.matches("ada"));
    }

    #[test]
    fn log_entry_from_server_json() {
        let entry: LogEntry =
            serde_json::from_str(r#"{"action": "Event created", "timestamp": "2024-01-15T17:30:00Z"}"#)
                .unwrap();
        assert_eq!(entry.action, "Event created");
    }
}
