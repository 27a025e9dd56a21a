use anyhow::{Context, Result};
use google_calendar::types::SendUpdates;
use taskcal_core::remote::protocol::DeleteEvent;

use crate::remote_config::GoogleRemoteConfig;
use crate::session::Session;

pub async fn handle(cmd: DeleteEvent) -> Result<()> {
    let config = GoogleRemoteConfig::try_from(&cmd.remote_config)?;
    let account_email = &config.google_account;
    let calendar_id = &config.google_calendar_id;

    let client = Session::load_valid(account_email).await?.client()?;

    let result = client
        .events()
        .delete(calendar_id, &cmd.event_id, false, SendUpdates::None)
        .await;

    match result {
        Ok(_) => Ok(()),
        Err(e) => {
            // Already gone counts as deleted
            let error_str = e.to_string();
            if error_str.contains("410") || error_str.contains("Gone") {
                tracing::debug!(event_id = %cmd.event_id, "event already deleted");
                Ok(())
            } else {
                Err(e).with_context(|| format!("Failed to delete event: {}", cmd.event_id))
            }
        }
    }
}
