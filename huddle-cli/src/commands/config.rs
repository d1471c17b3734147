use anyhow::Result;
use owo_colors::OwoColorize;

use huddle_core::config::HuddleConfig;

pub fn run(config: &HuddleConfig) -> Result<()> {
    let config_path = HuddleConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:            {}", config_path.display());
    println!();
    println!("{}", "Settings".bold());
    println!("  API:               {}", config.api_url);
    println!("  Viewing timezone:  {}", config.view_timezone);
    println!("  Default timezone:  {}", config.default_timezone);
    println!(
        "  Current profile:   {}",
        config
            .current_profile
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "(none)".dimmed().to_string())
    );
    println!("  Timeout:           {}s", config.timeout_secs);

    Ok(())
}
