use anyhow::Result;
use chrono::Duration;
use owo_colors::OwoColorize;

use huddle_core::config::HuddleConfig;
use huddle_core::draft::EventDraft;
use huddle_core::{Event, ProfileId};

use crate::client::Client;
use crate::commands::{parse_time_arg, resolve_profiles};
use crate::render::EventRender;
use crate::utils::prompt;
use crate::utils::tui::with_spinner;

/// Inputs given on the command line; anything missing is prompted for.
#[derive(Debug, Default)]
pub struct NewArgs {
    /// Participants, by id or name
    pub with: Vec<String>,
    pub timezone: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    /// Day for `start`/`end` given as `HH:MM`
    pub date: Option<String>,
}

pub async fn run(client: &Client, config: &HuddleConfig, args: NewArgs, interactive: bool) -> Result<Event> {
    let mut draft = EventDraft::new(
        args.timezone
            .clone()
            .unwrap_or_else(|| config.default_timezone.clone()),
    );
    let date = args.date.as_deref();
    draft.start = args.start.as_deref().map(|s| parse_time_arg(s, date)).transpose()?;
    draft.end = args.end.as_deref().map(|e| parse_time_arg(e, date)).transpose()?;
    draft.participants = args.with.iter().map(|w| ProfileId::from(w.as_str())).collect();

    // Without prompts the form must already be complete
    if !interactive {
        draft.validate()?;
    }

    let profiles = with_spinner("Fetching profiles...", client.list_profiles()).await?;
    draft.participants = resolve_profiles(&profiles, &args.with)?.into_iter().collect();

    if interactive {
        if args.with.is_empty() {
            draft.participants = prompt::participants("  Participants", &profiles, &draft.participants)?;
        }
        if args.timezone.is_none() {
            draft.timezone = prompt::zone("  Timezone", &draft.timezone)?;
        }
        if draft.start.is_none() {
            draft.start = Some(prompt::datetime("  Start (YYYY-MM-DDTHH:MM)", None)?);
        }
        if draft.end.is_none() {
            let suggested = draft.start.map(|s| s + Duration::hours(1));
            draft.end = Some(prompt::datetime("  End (YYYY-MM-DDTHH:MM)", suggested)?);
        }
    }

    let req = draft.validate()?;
    let event = with_spinner("Creating event...", client.create_event(&req))
        .await
        .inspect_err(|e| tracing::error!(kind = e.kind(), error = %e, "event creation failed"))?;

    tracing::info!(id = %event.id, "event created");
    println!("{}", "Event created successfully!".green());
    println!("{}", event.render_in(&event.timezone));
    Ok(event)
}
