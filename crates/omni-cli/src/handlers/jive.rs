use std::time::Duration;

use async_trait::async_trait;
use omni_core::{DisplayRow, Handler, Icon, Result};

use super::FIVE_MINUTES;
use crate::clients::JiveClient;
use crate::clients::jive::JiveActivity;

/// The user's activity stream, minus likes and task chatter.
pub struct ActivityHandler {
    client: JiveClient,
}

impl ActivityHandler {
    pub const fn new(client: JiveClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Handler for ActivityHandler {
    type Item = JiveActivity;

    fn cache_key(&self) -> String {
        "my_jive_activities".to_string()
    }

    fn ttl(&self) -> Duration {
        FIVE_MINUTES
    }

    async fn fetch(&self) -> Result<Vec<JiveActivity>> {
        self.client.activity().await
    }

    fn match_text(&self, item: &JiveActivity) -> String {
        format!("{} {}", item.actor_name, item.summary)
    }

    fn suppress(&self, item: &JiveActivity) -> bool {
        item.verb.contains("liked") || item.object_type.contains("task")
    }

    fn render(&self, item: &JiveActivity) -> DisplayRow {
        DisplayRow::new(
            &item.title,
            format!(
                "[{}:{}] {}: {}",
                item.object_type, item.verb, item.actor_name, item.summary
            ),
            &item.url,
        )
        .with_icon(Icon::Web)
    }
}
