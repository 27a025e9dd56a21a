pub mod config;
pub mod status;
pub mod sync;

use anyhow::Result;
use taskcal_core::config::TaskcalConfig;
use taskcal_core::mapper::EventMapper;
use taskcal_core::remote::Remote;
use taskcal_core::sync::Reconciler;
use taskcal_core::taskwarrior::Taskwarrior;

pub use crate::utils::tui::create_spinner;

/// Wire Taskwarrior and the configured remote into a reconciler.
pub fn reconciler(config: &TaskcalConfig) -> Result<Reconciler<Taskwarrior, Remote>> {
    let remote = config.remote()?.clone();
    let mapper = EventMapper::new(config.time_zone()?);

    Ok(
        Reconciler::new(Taskwarrior::new(&config.task_command), remote, mapper)
            .with_window(config.past_days, config.future_days),
    )
}

/// Filter from the command line if given, else the configured one
pub fn effective_filter<'a>(config: &'a TaskcalConfig, filter: Option<&'a str>) -> &'a str {
    filter.unwrap_or(config.task_filter.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_override() {
        let config = TaskcalConfig::default();
        assert_eq!(
            effective_filter(&config, None),
            "status:pending or status:completed"
        );
        assert_eq!(effective_filter(&config, Some("+work")), "+work");
    }
}
