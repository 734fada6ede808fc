use std::time::Duration;

use async_trait::async_trait;
use omni_core::{DisplayRow, Handler, Result};

use super::FIVE_MINUTES;
use crate::clients::HackpadClient;
use crate::clients::hackpad::Pad;

pub struct PadsHandler {
    client: HackpadClient,
}

impl PadsHandler {
    pub const fn new(client: HackpadClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Handler for PadsHandler {
    type Item = Pad;

    fn cache_key(&self) -> String {
        "all_hackpads".to_string()
    }

    fn ttl(&self) -> Duration {
        FIVE_MINUTES
    }

    async fn fetch(&self) -> Result<Vec<Pad>> {
        self.client.all_pads().await
    }

    fn match_text(&self, item: &Pad) -> String {
        item.title.clone()
    }

    fn render(&self, item: &Pad) -> DisplayRow {
        DisplayRow::new(
            &item.title,
            &item.id,
            format!("{}/{}", self.client.base_url().trim_end_matches('/'), item.id),
        )
    }
}
