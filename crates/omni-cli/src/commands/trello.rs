use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use omni_core::{DisplayRow, Icon, ThrottleGuard, Throttled};
use tracing::{debug, info};

use crate::cli::TrelloArgs;
use crate::clients::trello::{Card, Member};
use crate::context::AppContext;
use crate::error::CliError;
use crate::handlers::BoardsHandler;
use crate::keys;

const ME_CACHE_KEY: &str = "trello_me";
const ME_TTL: Duration = Duration::from_secs(10 * 60);

/// Throttle name for card creation; the timestamp lives under `called_<name>`.
pub const CREATE_CARD_ACTION: &str = "trello_create_card";

/// `trello --boards`. The member id comes from config, or is looked up once
/// through `members/me` and written back so later runs skip the request.
pub async fn list_boards(ctx: &AppContext, args: &TrelloArgs) -> Result<Vec<DisplayRow>> {
    let client = Arc::new(ctx.trello_client()?);

    let member_id = if let Some(id) = ctx.store.get_str_optional(keys::TRELLO_MEMBER_ID) {
        id
    } else {
        let me: Member = ctx
            .dispatcher
            .cache()
            .get_or_fetch(ME_CACHE_KEY, ME_TTL, || client.me())
            .await?;
        debug!(member = %me.username, "resolved trello member");
        ctx.store.set_value(keys::TRELLO_MEMBER_ID, me.id.clone())?;
        me.id
    };

    let handler = BoardsHandler::new(client, member_id);
    Ok(ctx.dispatcher.run(&handler, args.query.as_str()).await?)
}

/// `trello --createcard`: add a card named after the query to the configured
/// list. Launchers re-run the command on every keystroke, so the request is
/// debounced: the first invocation to stamp the throttle timestamp creates the
/// card and later ones that see the stamp change during their wait skip.
pub async fn create_card(ctx: &AppContext, args: &TrelloArgs) -> Result<Vec<DisplayRow>> {
    let name = args.query.as_str().trim();
    if name.is_empty() {
        return Err(CliError::usage(anyhow!("--createcard needs a card name in --query")).into());
    }

    let list_id = ctx.store.get_str(keys::TRELLO_LIST_ID)?;
    let client = ctx.trello_client()?;
    let guard = ThrottleGuard::new(ctx.store.clone());

    let outcome = guard
        .guard(CREATE_CARD_ACTION, || client.create_card(&list_id, name))
        .await?;

    let row = match outcome {
        Throttled::Ran(card) => {
            info!(card = %card.id, "created trello card");
            created_row(card)
        },
        Throttled::Skipped => skipped_row(),
    };
    Ok(vec![row])
}

fn created_row(card: Card) -> DisplayRow {
    DisplayRow::new(
        format!("Created card: {}", card.name),
        card.short_url.clone(),
        card.short_url,
    )
    .with_icon(Icon::Web)
}

/// The guard lets the first invocation through; this one lost the race.
fn skipped_row() -> DisplayRow {
    DisplayRow::new("Card not created", "Another request is already creating a card", "")
        .informational()
}
