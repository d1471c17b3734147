use anyhow::Result;
use owo_colors::OwoColorize;

use huddle_core::{EventId, LogEntry};

use crate::client::Client;
use crate::render::Render;
use crate::utils::tui::with_spinner;

pub async fn run(client: &Client, event: &str) -> Result<()> {
    let id = EventId::from(event.trim());
    let logs = with_spinner("Fetching logs...", client.event_logs(&id)).await?;

    println!("{}", format!("Event logs for {}", id).bold());
    println!("{}", render_logs(&logs));
    Ok(())
}

fn render_logs(logs: &[LogEntry]) -> String {
    if logs.is_empty() {
        return "No historical logs found for this event.".dimmed().italic().to_string();
    }
    logs.iter()
        .map(|l| format!("  • {}", l.render()))
        .collect::<Vec<_>>()
        .join("\n")
}
