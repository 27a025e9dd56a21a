use anyhow::Result;
use owo_colors::OwoColorize;
use taskcal_core::config::TaskcalConfig;

pub fn run() -> Result<()> {
    let config_path = TaskcalConfig::config_path()?;
    let config = TaskcalConfig::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!(
        "  Providers:  {}",
        config_path
            .parent()
            .map(|p| p.join("providers"))
            .unwrap_or_default()
            .display()
    );

    println!();
    println!("{}", "Settings".bold());
    println!("  Task command:  {}", config.task_command);
    println!("  Task filter:   {}", config.task_filter);
    println!("  Timezone:      {}", config.time_zone()?);
    println!(
        "  Window:        {} days back, {} days ahead",
        config.past_days, config.future_days
    );

    match &config.remote {
        Some(remote) => println!(
            "  Remote:        {} ({})",
            remote.provider.name(),
            remote.account_identifier().unwrap_or("no account")
        ),
        None => println!("  Remote:        {}", "not configured".yellow()),
    }

    Ok(())
}
