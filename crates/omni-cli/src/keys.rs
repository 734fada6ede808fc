//! Configuration keys kept in the state file.

pub const JIRA_URL: &str = "jira_url";
pub const JIVE_URL: &str = "jive_url";
pub const TRELLO_MEMBER_ID: &str = "trello_member_id";
pub const TRELLO_BOARD_ID: &str = "trello_board_id";
pub const TRELLO_LIST_ID: &str = "trello_list_id";
pub const GITHUB_API_URL: &str = "github_api_url";
pub const TRELLO_API_URL: &str = "trello_api_url";
pub const HACKPAD_URL: &str = "hackpad_url";

/// Keys `config set` accepts.
pub const KNOWN: [&str; 8] = [
    JIRA_URL,
    JIVE_URL,
    TRELLO_MEMBER_ID,
    TRELLO_BOARD_ID,
    TRELLO_LIST_ID,
    GITHUB_API_URL,
    TRELLO_API_URL,
    HACKPAD_URL,
];

/// Prefixes of entries managed by the cache and the throttle guard.
pub const INTERNAL_PREFIXES: [&str; 2] = [omni_core::cache::CACHE_KEY_PREFIX, "called_"];

pub fn is_internal(key: &str) -> bool {
    INTERNAL_PREFIXES.iter().any(|prefix| key.starts_with(prefix))
}
