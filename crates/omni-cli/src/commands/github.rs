use std::sync::Arc;

use anyhow::{Result, anyhow};
use omni_core::DisplayRow;

use crate::cli::GithubArgs;
use crate::context::AppContext;
use crate::error::CliError;
use crate::handlers::{CommitsHandler, EmojiHandler, PullRequestsHandler};

/// Dispatch whichever of `--prs`, `--commits` or `--emoji` was given.
pub async fn execute(ctx: &AppContext, args: &GithubArgs) -> Result<Vec<DisplayRow>> {
    let client = Arc::new(ctx.github_client()?);
    let query = args.query.as_str();

    if args.emoji {
        return Ok(ctx.dispatcher.run(&EmojiHandler::new(client), query).await?);
    }

    // clap enforces `requires = "repo"`; this only guards direct callers
    let repo = args
        .repo
        .as_deref()
        .ok_or_else(|| CliError::usage(anyhow!("--repo OWNER/NAME is required")))?;

    let rows = if args.prs {
        ctx.dispatcher
            .run(&PullRequestsHandler::new(client, repo), query)
            .await?
    } else {
        ctx.dispatcher
            .run(&CommitsHandler::new(client, repo), query)
            .await?
    };
    Ok(rows)
}
