use anyhow::Result;
use owo_colors::OwoColorize;
use taskcal_core::config::TaskcalConfig;
use tokio_util::sync::CancellationToken;

use super::{create_spinner, effective_filter, reconciler};
use crate::render::PlanRender;

pub async fn run(
    config: &TaskcalConfig,
    filter: Option<&str>,
    verbose: bool,
    cancel: CancellationToken,
) -> Result<()> {
    let reconciler = reconciler(config)?;
    let filter = effective_filter(config, filter);

    let spinner = create_spinner(format!("Checking {}", filter.dimmed()));
    let result = reconciler.plan(filter, &cancel).await;
    spinner.finish_and_clear();

    let plan = result?;
    println!("{}", plan.render(verbose));

    Ok(())
}
