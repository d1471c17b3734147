//! Rendering stored instants in a chosen display zone.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::HuddleResult;
use crate::timezone;

/// `Jan 15, 2024, 11:00 PM`
const DISPLAY_FORMAT: &str = "%b %-d, %Y, %-I:%M %p";

/// Wall-clock form used by edit forms and sent on the wire.
pub const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Format `instant` as seen from the zone behind `label`.
///
/// Fails with [`crate::HuddleError::UnknownTimezone`] when the label
/// neither names a directory entry nor parses as an IANA identifier.
pub fn format(instant: &DateTime<Utc>, label: &str) -> HuddleResult<String> {
    let tz = timezone::zone(label)?;
    Ok(render(instant, &tz))
}

/// Like [`format`], but falls back to UTC for an unusable label.
///
/// The fallback is visible: the output carries a trailing `UTC` marker.
/// Nothing is logged here; callers check the label once per listing.
pub fn format_or_utc(instant: &DateTime<Utc>, label: &str) -> String {
    match format(instant, label) {
        Ok(s) => s,
        Err(_) => format!("{} UTC", render(instant, &Tz::UTC)),
    }
}

/// Format `instant` in the machine's own zone (UTC if it can't be detected).
pub fn format_local(instant: &DateTime<Utc>) -> String {
    render(instant, &local_zone())
}

/// Render `instant` as a naive `YYYY-MM-DDTHH:MM` wall-clock time in `label`'s zone.
pub fn to_local_input(instant: &DateTime<Utc>, label: &str) -> HuddleResult<String> {
    let tz = timezone::zone(label)?;
    Ok(instant.with_timezone(&tz).format(LOCAL_INPUT_FORMAT).to_string())
}

fn render(instant: &DateTime<Utc>, tz: &Tz) -> String {
    instant.with_timezone(tz).format(DISPLAY_FORMAT).to_string()
}

fn local_zone() -> Tz {
    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse::<Tz>().ok())
        .unwrap_or(Tz::UTC)
}
