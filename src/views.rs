//! Tree Views
//!
//! Flattens a forest snapshot into the rows a renderer draws. Only children of
//! expanded containers are visible. Renderers never touch controller state;
//! they work from the rows alone.

use crate::controller::ExpansionState;
use crate::tree::Record;
use serde::Serialize;

/// Marker shown in front of a row title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowMarker {
    Leaf,
    Collapsed,
    Expanded,
    Loading,
    Failed,
}

impl RowMarker {
    pub fn glyph(self) -> &'static str {
        match self {
            RowMarker::Leaf => "•",
            RowMarker::Collapsed => "▶",
            RowMarker::Expanded => "▼",
            RowMarker::Loading => "…",
            RowMarker::Failed => "!",
        }
    }

    fn for_container(state: ExpansionState) -> Self {
        match state {
            ExpansionState::Collapsed => RowMarker::Collapsed,
            ExpansionState::Expanding => RowMarker::Loading,
            ExpansionState::Expanded => RowMarker::Expanded,
            ExpansionState::ExpandFailed => RowMarker::Failed,
        }
    }
}

/// One visible line of the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeRow {
    pub depth: usize,
    pub id: String,
    pub title: String,
    pub path: String,
    pub marker: RowMarker,
    pub selected: bool,
}

/// Visible rows of `forest` in pre-order.
pub fn visible_rows<E>(forest: &[Record], expansion: E, selected: Option<&str>) -> Vec<TreeRow>
where
    E: Fn(&str) -> ExpansionState,
{
    let mut rows = Vec::new();
    collect_rows(forest, 0, &expansion, selected, &mut rows);
    rows
}

fn collect_rows<E>(
    records: &[Record],
    depth: usize,
    expansion: &E,
    selected: Option<&str>,
    rows: &mut Vec<TreeRow>,
) where
    E: Fn(&str) -> ExpansionState,
{
    for record in records {
        let state = expansion(&record.path);
        let marker = if record.is_container() {
            RowMarker::for_container(state)
        } else {
            RowMarker::Leaf
        };
        rows.push(TreeRow {
            depth,
            id: record.id.clone(),
            title: record.title.clone(),
            path: record.path.clone(),
            marker,
            selected: selected == Some(record.id.as_str()),
        });
        if marker == RowMarker::Expanded {
            collect_rows(&record.children, depth + 1, expansion, selected, rows);
        }
    }
}

/// Render rows as indented text, one row per line.
pub fn render_text(rows: &[TreeRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let cursor = if row.selected { "> " } else { "  " };
        out.push_str(&format!(
            "{}{}{} {}\n",
            cursor,
            "  ".repeat(row.depth),
            row.marker.glyph(),
            row.title
        ));
    }
    out
}
