use std::fmt::Write as _;

use colored::Colorize;
use omni_core::DisplayRow;

pub fn render(rows: &[DisplayRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let title = if row.selectable {
            row.title.bold()
        } else {
            row.title.italic()
        };
        if row.subtitle.is_empty() {
            let _ = writeln!(out, "{title}");
        } else {
            let _ = writeln!(out, "{title}  {}", row.subtitle.dimmed());
        }
    }
    out
}
