//! Human-friendly timezone labels and their IANA identifiers.
//!
//! The table is fixed at build time. Its order is the order labels are
//! offered in pickers; lookups don't depend on it.

use chrono_tz::Tz;

use crate::error::{HuddleError, HuddleResult};

/// Label used when nothing else is configured.
pub const UTC_LABEL: &str = "UTC";

static TIMEZONES: &[(&str, &str)] = &[
    ("UTC", "Etc/UTC"),
    ("Eastern Time (US & Canada)", "America/New_York"),
    ("Central Time (US & Canada)", "America/Chicago"),
    ("Mountain Time (US & Canada)", "America/Denver"),
    ("Pacific Time (US & Canada)", "America/Los_Angeles"),
    ("Alaska Time", "America/Anchorage"),
    ("Hawaii Time", "Pacific/Honolulu"),
    ("Mexico City", "America/Mexico_City"),
    ("Bogotá", "America/Bogota"),
    ("Buenos Aires", "America/Argentina/Buenos_Aires"),
    ("Santiago", "America/Santiago"),
    ("São Paulo", "America/Sao_Paulo"),
    ("London (GMT/BST)", "Europe/London"),
    ("Paris / Berlin / Rome (CET/CEST)", "Europe/Paris"),
    ("Istanbul", "Europe/Istanbul"),
    ("Moscow", "Europe/Moscow"),
    ("Athens", "Europe/Athens"),
    ("Warsaw", "Europe/Warsaw"),
    ("Cairo", "Africa/Cairo"),
    ("Johannesburg", "Africa/Johannesburg"),
    ("Nairobi", "Africa/Nairobi"),
    ("Lagos", "Africa/Lagos"),
    ("Dubai", "Asia/Dubai"),
    ("Tehran", "Asia/Tehran"),
    ("Karachi", "Asia/Karachi"),
    ("Kathmandu", "Asia/Kathmandu"),
    ("India Standard Time (IST)", "Asia/Kolkata"),
    ("Dhaka", "Asia/Dhaka"),
    ("Bangkok", "Asia/Bangkok"),
    ("Hong Kong", "Asia/Hong_Kong"),
    ("Tokyo", "Asia/Tokyo"),
    ("Seoul", "Asia/Seoul"),
    ("Jakarta", "Asia/Jakarta"),
    ("Sydney", "Australia/Sydney"),
    ("Melbourne", "Australia/Melbourne"),
    ("Brisbane", "Australia/Brisbane"),
    ("Adelaide", "Australia/Adelaide"),
    ("Perth", "Australia/Perth"),
    ("Auckland", "Pacific/Auckland"),
    ("Fiji", "Pacific/Fiji"),
];

/// All (label, IANA identifier) pairs in display order.
pub fn entries() -> &'static [(&'static str, &'static str)] {
    TIMEZONES
}

/// Labels in display order, for populating pickers.
pub fn labels() -> Vec<&'static str> {
    TIMEZONES.iter().map(|(label, _)| *label).collect()
}

/// Whether `label` is one of the directory's labels.
pub fn is_known(label: &str) -> bool {
    TIMEZONES.iter().any(|(l, _)| *l == label)
}

/// Map a label to its IANA identifier.
///
/// Unknown labels are passed through unchanged, so a raw identifier such
/// as `Europe/Oslo` resolves to itself. Whether the result is a real zone
/// is checked later by [`zone`].
pub fn resolve(label: &str) -> &str {
    TIMEZONES
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, iana)| *iana)
        .unwrap_or(label)
}

/// Resolve `label` and parse it into a zone usable for offset computation.
pub fn zone(label: &str) -> HuddleResult<Tz> {
    resolve(label)
        .parse::<Tz>()
        .map_err(|_| HuddleError::UnknownTimezone(label.to_string()))
}
