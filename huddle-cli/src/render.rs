//! TUI rendering traits for huddle types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to huddle-core types using owo_colors.

use chrono::Utc;
use owo_colors::OwoColorize;

use huddle_core::format::{format_local, format_or_utc};
use huddle_core::{Event, LogEntry, Profile, ProfileId, timezone};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Profile {
    fn render(&self) -> String {
        format!(
            "{} {}",
            self.name.bold(),
            format!("({}, {})", self.id, self.timezone).dimmed()
        )
    }
}

impl Render for LogEntry {
    fn render(&self) -> String {
        format!(
            "{} {}",
            self.action,
            format!("({})", format_local(&self.timestamp)).dimmed()
        )
    }
}

/// Events depend on the zone they are viewed in.
pub trait EventRender {
    fn render_in(&self, view_timezone: &str) -> String;
}

impl EventRender for Event {
    fn render_in(&self, view_timezone: &str) -> String {
        let participants = if self.profiles.is_empty() {
            "(no participants)".dimmed().to_string()
        } else {
            self.participant_names().purple().bold().to_string()
        };

        let mut lines = vec![format!("👥 {}", participants)];
        lines.push(format!(
            "   {} {}",
            "Start:".bold(),
            format_or_utc(&self.start, view_timezone)
        ));
        lines.push(format!(
            "   {}   {}",
            "End:".bold(),
            format_or_utc(&self.end, view_timezone)
        ));
        lines.push(
            format!("   Original timezone: {}  id: {}", self.timezone, self.id)
                .dimmed()
                .to_string(),
        );
        lines.join("\n")
    }
}

/// Warn once when `label` can't be used to view events; they show in UTC.
pub fn check_view_zone(label: &str) {
    if let Err(e) = timezone::zone(label) {
        tracing::warn!(label, error = %e, "falling back to UTC for display");
    }
}

/// One line per profile, marking the one currently in use.
pub fn render_profile_list(profiles: &[&Profile], current: Option<&ProfileId>) -> String {
    if profiles.is_empty() {
        return "No profiles found.".dimmed().to_string();
    }

    profiles
        .iter()
        .map(|p| {
            let marker = if Some(&p.id) == current { "●".green().to_string() } else { " ".to_string() };
            format!("{} {}", marker, p.render())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per directory entry with the zone's current UTC offset.
pub fn render_timezones() -> String {
    let now = Utc::now();
    timezone::entries()
        .iter()
        .map(|(label, iana)| {
            let offset = timezone::zone(label)
                .map(|tz| now.with_timezone(&tz).format("%:z").to_string())
                .unwrap_or_else(|_| "?".to_string());
            format!("{:<34} {} {}", label, format!("UTC{}", offset).dimmed(), iana.dimmed())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
