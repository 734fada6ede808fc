use std::time::Duration;

use async_trait::async_trait;
use omni_core::{DisplayRow, Handler, Icon, Result, age_since};

use super::{FIVE_MINUTES, key_part};
use crate::clients::JiraClient;
use crate::clients::jira::JiraIssue;

/// Unresolved issues assigned to the current user.
pub struct MyIssuesHandler {
    client: JiraClient,
    browse_base: String,
}

impl MyIssuesHandler {
    /// `jira_url` is the instance root; issue links are built from it.
    pub fn new(client: JiraClient, jira_url: &str) -> Self {
        Self {
            client,
            browse_base: jira_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Handler for MyIssuesHandler {
    type Item = JiraIssue;

    fn cache_key(&self) -> String {
        format!("my_tix_{}", key_part(&self.browse_base))
    }

    fn ttl(&self) -> Duration {
        FIVE_MINUTES
    }

    async fn fetch(&self) -> Result<Vec<JiraIssue>> {
        self.client.assigned_issues().await
    }

    fn match_text(&self, item: &JiraIssue) -> String {
        format!("{}{}", item.key, item.summary)
    }

    fn render(&self, item: &JiraIssue) -> DisplayRow {
        DisplayRow::new(
            format!("{}: {}", item.key, item.summary),
            format!("Updated {}", age_since(item.updated)),
            format!("{}/browse/{}", self.browse_base, item.key),
        )
        .with_icon(Icon::Web)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::clients::build_http_client;
    use chrono::{TimeDelta, Utc};
    use omni_core::MemoryStore;
    use std::sync::Arc;

    fn handler(jira_url: &str) -> MyIssuesHandler {
        let client = JiraClient::new(
            build_http_client().unwrap(),
            jira_url.to_string(),
            Arc::new(MemoryStore::new()),
        );
        MyIssuesHandler::new(client, jira_url)
    }

    #[test]
    fn renders_browse_link_without_double_slash() {
        let issue = JiraIssue {
            key: "OPS-7".to_string(),
            summary: "Rotate certificates".to_string(),
            updated: Utc::now() - TimeDelta::minutes(5),
        };

        let row = handler("https://jira.example.com/").render(&issue);
        assert_eq!(row.title, "OPS-7: Rotate certificates");
        assert_eq!(row.subtitle, "Updated 5 minutes ago");
        assert_eq!(row.action_value, "https://jira.example.com/browse/OPS-7");
        assert_eq!(row.icon, Icon::Web);
    }

    #[test]
    fn matches_on_key_and_summary() {
        let issue = JiraIssue {
            key: "OPS-7".to_string(),
            summary: "Rotate".to_string(),
            updated: Utc::now(),
        };
        assert_eq!(handler("https://j").match_text(&issue), "OPS-7Rotate");
    }

    #[test]
    fn cache_key_follows_the_instance() {
        assert_eq!(handler("https://jira.example.com/").cache_key(), "my_tix_jira_example_com");
        assert_ne!(
            handler("https://jira.example.com").cache_key(),
            handler("https://jira.other.org").cache_key()
        );
    }
}
