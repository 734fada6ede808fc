use anyhow::Result;
use omni_core::DisplayRow;

use crate::cli::HackpadArgs;
use crate::context::AppContext;
use crate::handlers::PadsHandler;

pub async fn execute(ctx: &AppContext, args: &HackpadArgs) -> Result<Vec<DisplayRow>> {
    let handler = PadsHandler::new(ctx.hackpad_client()?);
    Ok(ctx.dispatcher.run(&handler, args.query.as_str()).await?)
}
