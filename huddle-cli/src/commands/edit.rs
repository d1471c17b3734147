use anyhow::Result;
use owo_colors::OwoColorize;

use huddle_core::board::EventBoard;
use huddle_core::config::HuddleConfig;
use huddle_core::draft::EventEdit;
use huddle_core::{Event, EventId, HuddleError};

use crate::client::Client;
use crate::commands::{parse_time_arg, resolve_profile};
use crate::render::{EventRender, check_view_zone};
use crate::utils::prompt;
use crate::utils::tui::with_spinner;

#[derive(Debug, Default)]
pub struct EditArgs {
    pub event: String,
    /// Participants to add, by id or name
    pub add: Vec<String>,
    /// Participants to remove, by id or name
    pub remove: Vec<String>,
    pub timezone: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    /// Day for `start`/`end` given as `HH:MM`
    pub date: Option<String>,
}

impl EditArgs {
    fn has_changes(&self) -> bool {
        !self.add.is_empty()
            || !self.remove.is_empty()
            || self.timezone.is_some()
            || self.start.is_some()
            || self.end.is_some()
    }
}

pub async fn run(client: &Client, config: &HuddleConfig, args: EditArgs, interactive: bool) -> Result<Event> {
    if !args.has_changes() && !interactive {
        anyhow::bail!(
            "Nothing to change.\n\n\
            Pass at least one of --add, --remove, --tz, --start or --end"
        );
    }

    let (profiles, events) = with_spinner("Fetching events...", async {
        tokio::try_join!(client.list_profiles(), client.list_events())
    })
    .await?;

    let mut board = match &config.current_profile {
        Some(id) => EventBoard::for_profile(events, id),
        None => EventBoard::new(events),
    };

    let event_id = EventId::from(args.event.trim());
    let event = board
        .find(&event_id)
        .ok_or_else(|| HuddleError::NotFound(format!("event {}", event_id)))?;
    let mut edit = EventEdit::from_event(event);

    for input in &args.add {
        let id = &resolve_profile(&profiles, input)?.id;
        if !edit.participants.contains(id) {
            edit.toggle(id.clone());
        }
    }
    for input in &args.remove {
        let id = &resolve_profile(&profiles, input)?.id;
        if edit.participants.contains(id) {
            edit.toggle(id.clone());
        }
    }
    if let Some(zone) = &args.timezone {
        edit.timezone = zone.clone();
    }
    let date = args.date.as_deref();
    if let Some(start) = &args.start {
        edit.start = Some(parse_time_arg(start, date)?);
    }
    if let Some(end) = &args.end {
        edit.end = Some(parse_time_arg(end, date)?);
    }

    if interactive && !args.has_changes() {
        edit.participants = prompt::participants("  Participants", &profiles, &edit.participants)?;
        edit.timezone = prompt::zone("  Timezone", &edit.timezone)?;
        edit.start = Some(prompt::datetime("  Start (YYYY-MM-DDTHH:MM)", edit.start)?);
        edit.end = Some(prompt::datetime("  End (YYYY-MM-DDTHH:MM)", edit.end)?);
    }

    let req = edit.validate(config.current_profile.as_ref())?;
    let staged = board.stage(&edit, &profiles)?;

    let result = with_spinner("Updating event...", client.update_event(staged.event_id(), &req)).await;
    match result {
        Ok(confirmed) => {
            tracing::info!(id = %event_id, "event updated");
            board.commit(staged, confirmed);
        }
        Err(e) => {
            tracing::error!(id = %event_id, kind = e.kind(), error = %e, "event update failed");
            board.rollback(staged);
            return Err(e.into());
        }
    }

    let updated = board
        .find(&event_id)
        .cloned()
        .ok_or_else(|| HuddleError::NotFound(format!("event {}", event_id)))?;

    check_view_zone(&config.view_timezone);
    println!("{}", "Event updated successfully!".green());
    println!("{}", updated.render_in(&config.view_timezone));
    Ok(updated)
}
