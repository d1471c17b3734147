use anyhow::Result;
use owo_colors::OwoColorize;

use huddle_core::Profile;

use crate::client::Client;
use crate::commands::resolve_profile;
use crate::utils::prompt;
use crate::utils::tui::with_spinner;

/// Choose the profile to act as, by id or name, or from a picker.
///
/// `search` narrows the picker the same way `profiles --search` does.
pub async fn run(
    client: &Client,
    profile: Option<&str>,
    search: Option<&str>,
    interactive: bool,
) -> Result<Profile> {
    let profiles = with_spinner("Fetching profiles...", client.list_profiles()).await?;

    let chosen = match profile {
        Some(input) => resolve_profile(&profiles, input)?.clone(),
        None if interactive => {
            let query = search.unwrap_or_default();
            let matching: Vec<Profile> =
                profiles.into_iter().filter(|p| p.matches(query)).collect();
            prompt::profile("  Current profile", &matching)?.clone()
        }
        None => anyhow::bail!("Specify a profile: huddle use <PROFILE>"),
    };

    println!("{}", format!("Now acting as {}", chosen.name).green());
    Ok(chosen)
}
