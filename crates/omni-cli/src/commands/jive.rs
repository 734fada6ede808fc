use anyhow::Result;
use omni_core::DisplayRow;

use crate::cli::JiveArgs;
use crate::context::AppContext;
use crate::handlers::ActivityHandler;

pub async fn execute(ctx: &AppContext, args: &JiveArgs) -> Result<Vec<DisplayRow>> {
    let handler = ActivityHandler::new(ctx.jive_client()?);
    Ok(ctx.dispatcher.run(&handler, args.query.as_str()).await?)
}
