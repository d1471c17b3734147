pub mod config;
pub mod edit;
pub mod events;
pub mod logs;
pub mod new;
pub mod profiles;
pub mod select;
pub mod timezones;

use anyhow::Result;
use chrono::NaiveDateTime;
use huddle_core::draft::{combine, parse_local};
use huddle_core::{Profile, ProfileId};

/// Parse a `--start`/`--end` value.
///
/// With `--date`, a bare `HH:MM` is taken on that day; full date-times
/// are accepted either way.
pub fn parse_time_arg(value: &str, date: Option<&str>) -> Result<NaiveDateTime> {
    let parsed = match date {
        Some(day) => parse_local(value).or_else(|_| combine(day, value)),
        None => parse_local(value),
    };
    Ok(parsed?)
}

/// Find a profile by id, or by name when no id matches.
///
/// Names are compared case-insensitively and must be unambiguous.
pub fn resolve_profile<'a>(profiles: &'a [Profile], input: &str) -> Result<&'a Profile> {
    let input = input.trim();
    if let Some(p) = profiles.iter().find(|p| p.id.as_str() == input) {
        return Ok(p);
    }

    let wanted = input.to_lowercase();
    let by_name: Vec<&Profile> = profiles
        .iter()
        .filter(|p| p.name.to_lowercase() == wanted)
        .collect();

    match by_name.as_slice() {
        [single] => Ok(*single),
        [] => {
            let available: Vec<_> = profiles.iter().map(|p| p.name.as_str()).collect();
            anyhow::bail!(
                "Profile '{}' not found. Available: {}",
                input,
                available.join(", ")
            )
        }
        many => {
            let ids: Vec<_> = many.iter().map(|p| p.id.as_str()).collect();
            anyhow::bail!(
                "Several profiles are named '{}'. Use an id instead: {}",
                input,
                ids.join(", ")
            )
        }
    }
}

/// Resolve each of `inputs`, keeping their order.
pub fn resolve_profiles(profiles: &[Profile], inputs: &[String]) -> Result<Vec<ProfileId>> {
    inputs
        .iter()
        .map(|i| resolve_profile(profiles, i).map(|p| p.id.clone()))
        .collect()
}
