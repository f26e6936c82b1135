use serde_json::Value;

use crate::domain::{ClassScheme, HeaderDescriptor, Row, SortState, TableConfig};
use crate::model::Model;

const INDENT: &str = "  ";

#[derive(Debug)]
pub struct TableUI {
    classes: ClassScheme,
}

impl TableUI {
    pub fn new(config: &TableConfig) -> Self {
        Self {
            classes: config.classes.clone(),
        }
    }

    pub fn draw(&self, model: &Model) -> String {
        render_table(
            model.headers(),
            model.visible_rows(),
            model.sort_state(),
            &self.classes,
        )
    }
}

/// Renders the table markup. Reads its inputs only.
pub fn render_table<'a>(
    headers: &[HeaderDescriptor],
    rows: impl IntoIterator<Item = &'a Row>,
    sort: &SortState,
    classes: &ClassScheme,
) -> String {
    let mut html = String::new();
    html.push_str(&format!("<table{}>\n", class_attr(&classes.table)));

    html.push_str(&format!("{INDENT}<thead>\n{INDENT}{INDENT}<tr>\n"));
    for header in headers {
        html.push_str(&format!(
            "{INDENT}{INDENT}{INDENT}<th{} data-sortable=\"{}\" data-column=\"{}\">{}</th>\n",
            class_attr(&header_classes(header, sort, classes)),
            header.sortable,
            escape(&header.value),
            escape(&header.text),
        ));
    }
    html.push_str(&format!("{INDENT}{INDENT}</tr>\n{INDENT}</thead>\n"));

    html.push_str(&format!("{INDENT}<tbody>\n"));
    for row in rows {
        html.push_str(&format!("{INDENT}{INDENT}<tr>\n"));
        for header in headers {
            html.push_str(&format!(
                "{INDENT}{INDENT}{INDENT}<td{}>{}</td>\n",
                class_attr(&cell_classes(header, classes)),
                escape(&cell_text(row.get(&header.value))),
            ));
        }
        html.push_str(&format!("{INDENT}{INDENT}</tr>\n"));
    }
    html.push_str(&format!("{INDENT}</tbody>\n</table>\n"));
    html
}

/// Class tokens of a header cell, in order: sortable, non-numeric, sort direction.
pub fn header_classes(
    header: &HeaderDescriptor,
    sort: &SortState,
    classes: &ClassScheme,
) -> String {
    let mut tokens: Vec<&str> = Vec::new();
    if header.sortable {
        tokens.push(&classes.sortable_header);
    }
    if header.is_left_aligned() {
        tokens.push(&classes.non_numeric);
    }
    if sort.is_sorted_by(&header.value) {
        if sort.ascending {
            tokens.push(&classes.sorted_ascending);
        } else {
            tokens.push(&classes.sorted_descending);
        }
    }
    join_tokens(&tokens)
}

pub fn cell_classes(header: &HeaderDescriptor, classes: &ClassScheme) -> String {
    if header.is_left_aligned() {
        classes.non_numeric.clone()
    } else {
        String::new()
    }
}

/// Displayed cell content. Null, booleans and missing keys render empty.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(_)) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn join_tokens(tokens: &[&str]) -> String {
    tokens
        .iter()
        .filter(|t| !t.is_empty())
        .copied()
        .collect::<Vec<&str>>()
        .join(" ")
}

fn class_attr(classes: &str) -> String {
    if classes.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", escape(classes))
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
