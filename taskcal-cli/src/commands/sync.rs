use anyhow::Result;
use owo_colors::OwoColorize;
use taskcal_core::config::TaskcalConfig;
use tokio_util::sync::CancellationToken;

use super::{create_spinner, effective_filter, reconciler};
use crate::lock::acquire_lock;
use crate::render::Render;

pub async fn run(
    config: &TaskcalConfig,
    filter: Option<&str>,
    cancel: CancellationToken,
) -> Result<()> {
    let _lock = acquire_lock()?;
    let reconciler = reconciler(config)?;
    let filter = effective_filter(config, filter);

    let spinner = create_spinner(format!("Syncing {}", filter.dimmed()));
    let result = reconciler.sync(filter, &cancel).await;
    spinner.finish_and_clear();

    let report = result?;
    println!("{}", report.render());

    if report.cancelled {
        anyhow::bail!("Sync interrupted. Run again to finish.");
    }

    if report.failed > 0 {
        anyhow::bail!(
            "{} of {} tasks could not be written. Run again to retry.",
            report.failed,
            report.total
        );
    }

    Ok(())
}
