use anyhow::Result;
use owo_colors::OwoColorize;

use huddle_core::config::HuddleConfig;
use huddle_core::protocol::CreateProfileRequest;
use huddle_core::{HuddleError, Profile, timezone};

use crate::client::Client;
use crate::render::{Render, render_profile_list};
use crate::utils::tui::with_spinner;

pub async fn list(client: &Client, config: &HuddleConfig, search: Option<&str>) -> Result<()> {
    let profiles = with_spinner("Fetching profiles...", client.list_profiles()).await?;
    let query = search.unwrap_or_default();
    let matching: Vec<&Profile> = profiles.iter().filter(|p| p.matches(query)).collect();

    println!("{}", render_profile_list(&matching, config.current_profile.as_ref()));
    Ok(())
}

pub async fn add(client: &Client, name: &str, zone: Option<&str>) -> Result<Profile> {
    let req = build_request(name, zone)?;
    let profile = with_spinner("Adding profile...", client.create_profile(&req)).await?;

    tracing::info!(id = %profile.id, "profile created");
    println!("{}", format!("Added profile: {}", profile.render()).green());
    Ok(profile)
}

fn build_request(name: &str, zone: Option<&str>) -> Result<CreateProfileRequest, HuddleError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(HuddleError::Validation("Enter a profile name".into()));
    }
    let zone = zone.unwrap_or(timezone::UTC_LABEL);
    timezone::zone(zone)?;

    Ok(CreateProfileRequest {
        name: name.to_string(),
        timezone: zone.to_string(),
    })
}
