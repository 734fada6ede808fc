use std::sync::Arc;

use omni_core::credentials::{TRELLO_API_KEY, TRELLO_TOKEN};
use omni_core::{CredentialStore, Result};
use reqwest::{Client, Method, RequestBuilder};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use super::{endpoint, ensure_success};

pub const DEFAULT_API_URL: &str = "https://api.trello.com/1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(alias = "shortUrl")]
    pub short_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(alias = "shortUrl")]
    pub short_url: String,
}

pub struct TrelloClient {
    http: Client,
    api_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl TrelloClient {
    pub fn new(http: Client, api_url: String, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            http,
            api_url,
            credentials,
        }
    }

    /// Trello authenticates with `key` and `token` query parameters.
    async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let key = self.credentials.get(TRELLO_API_KEY).await?;
        let token = self.credentials.get(TRELLO_TOKEN).await?;
        Ok(self
            .http
            .request(method, endpoint(&self.api_url, path))
            .query(&[("key", key.expose_secret()), ("token", token.expose_secret())]))
    }

    /// The member the token belongs to.
    pub async fn me(&self) -> Result<Member> {
        let response = self.request(Method::GET, "members/me").await?.send().await?;
        Ok(ensure_success("trello", response).await?.json().await?)
    }

    /// Open boards of `member_id`.
    pub async fn boards(&self, member_id: &str) -> Result<Vec<Board>> {
        let response = self
            .request(Method::GET, &format!("members/{member_id}/boards"))
            .await?
            .query(&[("filter", "open"), ("fields", "name,shortUrl")])
            .send()
            .await?;
        Ok(ensure_success("trello", response).await?.json().await?)
    }

    /// Create a card named `name` at the bottom of `list_id`.
    pub async fn create_card(&self, list_id: &str, name: &str) -> Result<Card> {
        let response = self
            .request(Method::POST, "cards")
            .await?
            .query(&[("idList", list_id), ("name", name), ("pos", "bottom")])
            .send()
            .await?;
        Ok(ensure_success("trello", response).await?.json().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::clients::build_http_client;
    use omni_core::MemoryStore;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> TrelloClient {
        let credentials = MemoryStore::new()
            .with(TRELLO_API_KEY, "k")
            .with(TRELLO_TOKEN, "t");
        TrelloClient::new(build_http_client().unwrap(), server.uri(), Arc::new(credentials))
    }

    #[tokio::test]
    async fn boards_are_read_for_member() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/members/m1/boards"))
            .and(query_param("key", "k"))
            .and(query_param("token", "t"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "b1", "name": "Roadmap", "shortUrl": "https://trello.com/b/b1" }
            ])))
            .mount(&server)
            .await;

        let boards = client(&server).boards("m1").await.unwrap();
        assert_eq!(
            boards,
            vec![Board {
                id: "b1".to_string(),
                name: "Roadmap".to_string(),
                short_url: "https://trello.com/b/b1".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn create_card_posts_to_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cards"))
            .and(query_param("idList", "l1"))
            .and(query_param("name", "Call the bank"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "c1",
                "name": "Call the bank",
                "shortUrl": "https://trello.com/c/c1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let card = client(&server).create_card("l1", "Call the bank").await.unwrap();
        assert_eq!(card.short_url, "https://trello.com/c/c1");
    }

    #[tokio::test]
    async fn me_returns_member_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/members/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "m1",
                "username": "ada",
                "fullName": "Ada Lovelace"
            })))
            .mount(&server)
            .await;

        assert_eq!(client(&server).me().await.unwrap().id, "m1");
    }
}
