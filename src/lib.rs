//! A sortable table widget.
//!
//! Headers and rows are loaded into a [`Model`], either as JSON text or as
//! structured values. The model keeps the sort state and display order, and
//! [`TableUI`] renders it as an HTML table whose header cells can be
//! activated to re-sort the rows.

pub mod controller;
pub mod domain;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod report;
pub mod sort;
pub mod ui;

pub use controller::Controller;
pub use domain::{
    Align, ClassScheme, HeaderDescriptor, InputKind, Message, Row, SortPolicy, SortState,
    TableConfig, TableError, TableEvent, TableInput,
};
pub use model::Model;
pub use report::{Diagnostic, MemoryReporter, Reporter, Severity, TracingReporter};
pub use ui::{TableUI, render_table};
