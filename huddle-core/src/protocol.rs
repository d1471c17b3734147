//! Request and error bodies exchanged with the scheduling API.
//!
//! Start and end times travel as naive `YYYY-MM-DDTHH:MM` wall-clock
//! strings next to the timezone label; the server resolves them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::ProfileId;

/// POST /api/profiles
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateProfileRequest {
    pub name: String,
    pub timezone: String,
}

/// POST /api/events
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateEventRequest {
    #[serde(rename = "profiles")]
    pub profile_ids: Vec<ProfileId>,
    pub timezone: String,
    #[serde(rename = "startDateTime")]
    pub start: String,
    #[serde(rename = "endDateTime")]
    pub end: String,
}

/// PUT /api/events/{id}
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[serde(rename = "startDateTime")]
    pub start: String,
    #[serde(rename = "endDateTime")]
    pub end: String,
    pub timezone: String,
    pub add_profiles: BTreeSet<ProfileId>,
    pub remove_profiles: BTreeSet<ProfileId>,
    /// Profile acting on the event, recorded in the audit log.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<ProfileId>,
}

/// Body of a non-2xx response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}
