use anyhow::Result;
use omni_core::DisplayRow;

pub fn render(rows: &[DisplayRow]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}
