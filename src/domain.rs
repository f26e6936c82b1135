use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// One record of the dataset. Cells are looked up by header key, so the
/// row may carry more (or fewer) keys than there are columns.
pub type Row = Map<String, Value>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    #[default]
    Right,
}

/// Column metadata: the row key a column displays, its label, and how it
/// behaves and aligns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[setters(into)]
pub struct HeaderDescriptor {
    pub value: String,
    pub text: String,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub align: Align,
}

impl HeaderDescriptor {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            sortable: false,
            align: Align::default(),
        }
    }

    pub fn is_left_aligned(&self) -> bool {
        self.align == Align::Left
    }
}

/// Inputs arrive either as serialized JSON text (e.g. an HTML attribute) or
/// as an already structured sequence. The caller decides which.
#[derive(Debug, Clone, PartialEq)]
pub enum TableInput<T> {
    Raw(String),
    Structured(Vec<T>),
}

impl<T> TableInput<T> {
    pub fn raw(text: impl Into<String>) -> Self {
        TableInput::Raw(text.into())
    }
}

impl<T> From<Vec<T>> for TableInput<T> {
    fn from(values: Vec<T>) -> Self {
        TableInput::Structured(values)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<String>,
    pub ascending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: None,
            ascending: true,
        }
    }
}

impl SortState {
    pub fn is_sorted_by(&self, key: &str) -> bool {
        self.column.as_deref() == Some(key)
    }
}

/// How a descending order is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortPolicy {
    /// Sort ascending, then reverse the whole sequence. Rows with equal keys
    /// end up in reverse load order.
    #[default]
    ReverseAscending,
    /// Compare in descending order directly. Rows with equal keys keep their
    /// load order.
    DescendingComparator,
}

/// CSS class vocabulary used by the renderer. Defaults to Material Design Lite.
#[derive(Debug, Clone, PartialEq, Eq, Setters)]
#[setters(into)]
pub struct ClassScheme {
    pub table: String,
    pub sortable_header: String,
    pub non_numeric: String,
    pub sorted_ascending: String,
    pub sorted_descending: String,
}

impl Default for ClassScheme {
    fn default() -> Self {
        Self {
            table: "mdl-data-table mdl-js-data-table mdl-shadow--4dp mdl-data-table--selectable"
                .to_string(),
            sortable_header: "mdc-data-table__header-cell--with-sort".to_string(),
            non_numeric: "mdl-data-table__cell--non-numeric".to_string(),
            sorted_ascending: "mdl-data-table__header--sorted-ascending".to_string(),
            sorted_descending: "mdl-data-table__header--sorted-descending".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Setters)]
pub struct TableConfig {
    pub classes: ClassScheme,
    pub policy: SortPolicy,
}

/// Requests that change the widget state. Every state change goes through
/// `Model::update`.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    LoadHeaders(TableInput<HeaderDescriptor>),
    LoadItems(TableInput<Row>),
    SetSortColumn(Option<String>),
    SetSortAscending(bool),
    HeaderClicked(usize),
}

/// Things a host can do to the widget from the outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    HeaderActivated(String),
    SortColumnWritten(String),
    SortDirectionWritten(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Headers,
    Items,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Headers => write!(f, "headers"),
            InputKind::Items => write!(f, "items"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("{input} could not be parsed: {source}")]
    Parse {
        input: InputKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("{input}: {message}")]
    Validation { input: InputKind, message: String },
    #[error("sort column \"{0}\" does not match any header")]
    UnknownSortColumn(String),
    #[error("no header with key \"{0}\"")]
    UnknownHeader(String),
    #[error("header index {0} is out of range")]
    HeaderIndexOutOfRange(usize),
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),
    #[error("could not expand path: {0}")]
    PathExpansion(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TableError {
    pub(crate) fn not_a_sequence(input: InputKind) -> Self {
        TableError::Validation {
            input,
            message: format!("{input} must be a sequence"),
        }
    }
}
