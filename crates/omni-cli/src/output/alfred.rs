use anyhow::Result;
use omni_core::{DisplayRow, Icon};
use serde::Serialize;

/// Bookmark icon shipped with macOS, used for rows that open a web page.
pub const WEB_ICON_PATH: &str =
    "/System/Library/CoreServices/CoreTypes.bundle/Contents/Resources/BookmarkIcon.icns";

#[derive(Serialize)]
struct Feedback<'a> {
    items: Vec<Item<'a>>,
}

#[derive(Serialize)]
struct Item<'a> {
    title: &'a str,
    subtitle: &'a str,
    arg: &'a str,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<IconRef>,
}

#[derive(Serialize)]
struct IconRef {
    path: &'static str,
}

pub fn render(rows: &[DisplayRow]) -> Result<String> {
    let items = rows
        .iter()
        .map(|row| Item {
            title: &row.title,
            subtitle: &row.subtitle,
            arg: &row.action_value,
            valid: row.selectable,
            icon: match row.icon {
                Icon::Web => Some(IconRef {
                    path: WEB_ICON_PATH,
                }),
                Icon::None => None,
            },
        })
        .collect();

    Ok(serde_json::to_string(&Feedback { items })?)
}
