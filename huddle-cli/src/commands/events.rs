use anyhow::Result;
use owo_colors::OwoColorize;

use huddle_core::board::EventBoard;
use huddle_core::config::HuddleConfig;
use huddle_core::timezone;

use crate::client::Client;
use crate::render::{EventRender, check_view_zone};
use crate::utils::tui::with_spinner;

/// List events of the current profile (or all of them) in a viewing zone.
pub async fn run(client: &Client, config: &HuddleConfig, zone: Option<&str>, all: bool) -> Result<()> {
    // An explicit zone must be valid; the configured one falls back to UTC
    if let Some(label) = zone {
        timezone::zone(label)?;
    }
    let view = zone.unwrap_or(config.view_timezone.as_str());
    check_view_zone(view);

    let current = match (&config.current_profile, all) {
        (_, true) => None,
        (Some(id), false) => Some(id),
        (None, false) => anyhow::bail!(
            "No current profile.\n\n\
            Choose one with:\n  \
            huddle use <PROFILE>\n\n\
            Or list every event with:\n  \
            huddle events --all"
        ),
    };

    let events = with_spinner("Fetching events...", client.list_events()).await?;
    let board = match current {
        Some(id) => EventBoard::for_profile(events, id),
        None => EventBoard::new(events),
    };
    tracing::debug!(count = board.len(), "events loaded");

    println!("{}", render_board(&board, view));
    Ok(())
}

pub fn render_board(board: &EventBoard, view: &str) -> String {
    let header = format!("🌐 Viewing timezone: {}", view).dimmed().to_string();
    if board.is_empty() {
        return format!("{}\n\n{}", header, "No events scheduled yet.".dimmed());
    }

    let body = board
        .events()
        .iter()
        .map(|e| e.render_in(view))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("{}\n\n{}", header, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use huddle_core::Event;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::{Context, SubscriberExt};

    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn event() -> Event {
        serde_json::from_value(json!({
            "_id": "ev1",
            "profiles": [{"_id": "p1", "name": "Ada", "timezone": "UTC"}],
            "startDateTime": "2024-01-15T17:30:00Z",
            "endDateTime": "2024-01-15T18:30:00Z",
            "timezone": "UTC"
        }))
        .unwrap()
    }

    #[test]
    fn renders_in_viewing_zone() {
        let board = EventBoard::new(vec![event()]);
        let out = render_board(&board, "India Standard Time (IST)");
        assert!(out.contains("Jan 15, 2024, 11:00 PM"));
        assert!(out.contains("Jan 16, 2024, 12:00 AM"));
        assert!(out.contains("Ada"));
    }

    #[test]
    fn empty_board_says_so() {
        let out = render_board(&EventBoard::default(), "UTC");
        assert!(out.contains("No events scheduled yet."));
    }

    #[test]
    fn broken_view_zone_falls_back_to_utc() {
        let board = EventBoard::new(vec![event()]);
        let out = render_board(&board, "Eastern Time (ET)");
        assert!(out.contains("Jan 15, 2024, 5:30 PM UTC"));
    }

    #[test]
    fn broken_view_zone_warns_once_per_listing() {
        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(warnings.clone()));

        let mut second = event();
        second.id = "ev2".into();
        let board = EventBoard::new(vec![event(), second]);

        tracing::subscriber::with_default(subscriber, || {
            check_view_zone("Eastern Time (ET)");
            render_board(&board, "Eastern Time (ET)");
        });
        assert_eq!(warnings.load(Ordering::SeqCst), 1);
    }
}
