use anyhow::Result;
use omni_core::DisplayRow;

use crate::cli::JiraArgs;
use crate::context::AppContext;
use crate::handlers::MyIssuesHandler;
use crate::keys;

/// `jira --me`: assigned issues, linked into the configured instance.
pub async fn execute(ctx: &AppContext, args: &JiraArgs) -> Result<Vec<DisplayRow>> {
    let jira_url = ctx.required_url(keys::JIRA_URL)?;
    let handler = MyIssuesHandler::new(ctx.jira_client(jira_url.clone()), &jira_url);
    Ok(ctx.dispatcher.run(&handler, args.query.as_str()).await?)
}
