use anyhow::{Context, Result};
use google_calendar::types::SendUpdates;
use taskcal_core::event::Event;
use taskcal_core::remote::protocol::UpdateEvent;

use crate::google_event::{FromGoogle, ToGoogle};
use crate::remote_config::GoogleRemoteConfig;
use crate::session::Session;

pub async fn handle(cmd: UpdateEvent) -> Result<Event> {
    let config = GoogleRemoteConfig::try_from(&cmd.remote_config)?;
    let account_email = &config.google_account;
    let calendar_id = &config.google_calendar_id;

    let client = Session::load_valid(account_email).await?.client()?;

    let mut google_event = cmd.event.to_google();
    google_event.id = cmd.event_id.clone();

    let response = client
        .events()
        .update(
            calendar_id,
            &cmd.event_id,
            0,
            0,
            false,
            SendUpdates::None,
            false,
            &google_event,
        )
        .await
        .with_context(|| format!("Failed to update event: {}", cmd.event_id))?;

    Event::from_google(response.body)
}
