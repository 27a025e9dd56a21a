pub mod protocol;
pub mod provider;

use std::collections::HashMap;

use crate::date_range::DateRange;
use crate::error::TaskCalResult;
use crate::event::Event;
use crate::remote::protocol::{CreateEvent, DeleteEvent, ListEvents, UpdateEvent};
use crate::remote::provider::Provider;
use crate::store::CalendarStore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct RemoteConfig(pub HashMap<String, toml::Value>);

impl From<&RemoteConfig> for serde_json::Map<String, serde_json::Value> {
    fn from(config: &RemoteConfig) -> Self {
        config
            .0
            .iter()
            .filter_map(|(k, v)| serde_json::to_value(v).ok().map(|v| (k.clone(), v)))
            .collect()
    }
}

/// Remote provider configuration (e.g., Google Calendar settings)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Remote {
    pub provider: Provider,
    #[serde(flatten)]
    pub config: RemoteConfig,
}

impl Remote {
    fn remote_config(&self) -> serde_json::Map<String, serde_json::Value> {
        serde_json::Map::from(&self.config)
    }

    pub fn new(provider: Provider, config: RemoteConfig) -> Self {
        Remote { provider, config }
    }

    /// Returns the account identifier for this remote, if present.
    ///
    /// Looks for a `{provider}_account` field in the config (e.g.,
    /// `google_account`).
    pub fn account_identifier(&self) -> Option<&str> {
        let key = format!("{}_account", self.provider.name());
        self.config.0.get(&key).and_then(|v| v.as_str())
    }
}

impl CalendarStore for Remote {
    async fn list_events(&self, range: &DateRange) -> TaskCalResult<Vec<Event>> {
        self.provider
            .call(ListEvents {
                remote_config: self.remote_config(),
                from: range.from_rfc3339(),
                to: range.to_rfc3339(),
            })
            .await
    }

    async fn insert_event(&self, event: &Event) -> TaskCalResult<Event> {
        self.provider
            .call(CreateEvent {
                remote_config: self.remote_config(),
                event: event.clone(),
            })
            .await
    }

    async fn update_event(&self, event_id: &str, event: &Event) -> TaskCalResult<Event> {
        self.provider
            .call(UpdateEvent {
                remote_config: self.remote_config(),
                event_id: event_id.to_string(),
                event: event.clone(),
            })
            .await
    }

    async fn delete_event(&self, event_id: &str) -> TaskCalResult<()> {
        self.provider
            .call(DeleteEvent {
                remote_config: self.remote_config(),
                event_id: event_id.to_string(),
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_from_toml() {
        let remote: Remote = toml::from_str(
            r#"
            provider = "google"
            google_account = "me@example.com"
            google_calendar_id = "primary"
            "#,
        )
        .unwrap();

        assert_eq!(remote.provider.name(), "google");
        assert_eq!(remote.provider.binary_name(), "taskcal-provider-google");
        assert_eq!(remote.account_identifier(), Some("me@example.com"));

        let params = remote.remote_config();
        assert_eq!(params.get("google_calendar_id").and_then(|v| v.as_str()), Some("primary"));
        assert!(!params.contains_key("provider"));
    }
}
