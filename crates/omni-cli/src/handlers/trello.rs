use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use omni_core::{DisplayRow, Handler, Result};

use super::{FIVE_MINUTES, key_part};
use crate::clients::TrelloClient;
use crate::clients::trello::Board;

/// Open boards of one member.
pub struct BoardsHandler {
    client: Arc<TrelloClient>,
    member_id: String,
}

impl BoardsHandler {
    pub fn new(client: Arc<TrelloClient>, member_id: impl Into<String>) -> Self {
        Self {
            client,
            member_id: member_id.into(),
        }
    }
}

#[async_trait]
impl Handler for BoardsHandler {
    type Item = Board;

    fn cache_key(&self) -> String {
        format!("trello_boards_{}", key_part(&self.member_id))
    }

    fn ttl(&self) -> Duration {
        FIVE_MINUTES
    }

    async fn fetch(&self) -> Result<Vec<Board>> {
        self.client.boards(&self.member_id).await
    }

    fn match_text(&self, item: &Board) -> String {
        item.name.clone()
    }

    fn render(&self, item: &Board) -> DisplayRow {
        DisplayRow::new(&item.name, &item.id, &item.short_url)
    }
}
