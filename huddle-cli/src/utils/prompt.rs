//! Interactive prompts standing in for the pickers of a form.

use std::collections::HashSet;

use anyhow::Result;
use chrono::NaiveDateTime;
use dialoguer::{Input, MultiSelect, Select};
use owo_colors::OwoColorize;

use huddle_core::draft::parse_local;
use huddle_core::format::LOCAL_INPUT_FORMAT;
use huddle_core::membership::Selection;
use huddle_core::{Profile, ProfileId, timezone};

/// Prompt for a `YYYY-MM-DDTHH:MM` date/time, asking again on parse errors.
pub fn datetime(prompt: &str, default: Option<NaiveDateTime>) -> Result<NaiveDateTime> {
    loop {
        let mut input = Input::<String>::new().with_prompt(prompt);
        if let Some(d) = default {
            input = input.default(d.format(LOCAL_INPUT_FORMAT).to_string());
        }
        let value = input.interact_text()?;
        match parse_local(&value) {
            Ok(dt) => return Ok(dt),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

/// Pick a timezone label, starting on `current`.
pub fn zone(prompt: &str, current: &str) -> Result<String> {
    let (items, default) = zone_choices(current);
    let idx = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(default)
        .interact()?;
    Ok(items[idx].clone())
}

/// Picker items and the index to start on.
///
/// A valid zone outside the directory (a raw IANA name) is offered first so
/// accepting the default keeps it. An unusable one starts on UTC.
fn zone_choices(current: &str) -> (Vec<String>, usize) {
    let mut items: Vec<String> = timezone::labels().into_iter().map(String::from).collect();
    if !timezone::is_known(current) && timezone::zone(current).is_ok() {
        items.insert(0, current.to_string());
        return (items, 0);
    }

    let default = items
        .iter()
        .position(|l| l == current)
        .or_else(|| items.iter().position(|l| l == timezone::UTC_LABEL))
        .unwrap_or(0);
    (items, default)
}

/// Pick one profile.
pub fn profile<'a>(prompt: &str, profiles: &'a [Profile]) -> Result<&'a Profile> {
    if profiles.is_empty() {
        anyhow::bail!("No profiles found. Add one with: huddle profiles add <NAME>");
    }
    let items: Vec<String> = profiles.iter().map(|p| p.name.clone()).collect();
    let idx = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;
    Ok(&profiles[idx])
}

/// Tick participants from `profiles`, starting from `current`.
///
/// Previously picked ids keep their position; ids not offered in the list
/// are left untouched.
pub fn participants(prompt: &str, profiles: &[Profile], current: &Selection) -> Result<Selection> {
    if profiles.is_empty() {
        anyhow::bail!("No profiles found. Add one with: huddle profiles add <NAME>");
    }
    let items: Vec<String> = profiles.iter().map(|p| p.name.clone()).collect();
    let defaults: Vec<bool> = profiles.iter().map(|p| current.contains(&p.id)).collect();

    let chosen = MultiSelect::new()
        .with_prompt(prompt)
        .items(&items)
        .defaults(&defaults)
        .interact()?;

    Ok(merge_choice(profiles, current, &chosen))
}

fn merge_choice(profiles: &[Profile], current: &Selection, chosen: &[usize]) -> Selection {
    let offered: HashSet<&ProfileId> = profiles.iter().map(|p| &p.id).collect();
    let ticked: HashSet<&ProfileId> = chosen.iter().map(|&i| &profiles[i].id).collect();

    let mut selection: Selection = current
        .picked()
        .iter()
        .filter(|id| ticked.contains(id) || !offered.contains(id))
        .cloned()
        .collect();

    for &i in chosen {
        let id = &profiles[i].id;
        if !selection.contains(id) {
            selection.toggle(id.clone());
        }
    }
    selection
}
