use anyhow::{Context, Result};
use google_calendar::types::OrderBy;
use taskcal_core::event::Event;
use taskcal_core::remote::protocol::ListEvents;

use crate::google_event::FromGoogle;
use crate::remote_config::GoogleRemoteConfig;
use crate::session::Session;

pub async fn handle(cmd: ListEvents) -> Result<Vec<Event>> {
    let config = GoogleRemoteConfig::try_from(&cmd.remote_config)?;
    let account_email = &config.google_account;
    let calendar_id = &config.google_calendar_id;

    let client = Session::load_valid(account_email).await?.client()?;

    let response = client
        .events()
        .list_all(
            calendar_id,
            "",
            0,
            OrderBy::default(),
            &[],
            "", // search query
            &[],
            false, // show_deleted
            false, // show_hidden_invitations
            true,  // single_events
            &cmd.to,
            &cmd.from,
            "",
            "",
        )
        .await
        .with_context(|| format!("Failed to fetch events from calendar {}", calendar_id))?;

    let mut events = Vec::new();
    for google_event in response.body {
        if google_event.status == "cancelled" || google_event.id.is_empty() {
            continue;
        }
        match Event::from_google(google_event) {
            Ok(event) => events.push(event),
            Err(e) => tracing::warn!(error = %e, "skipping unreadable event"),
        }
    }

    tracing::debug!(count = events.len(), calendar = %calendar_id, "listed events");

    Ok(events)
}
