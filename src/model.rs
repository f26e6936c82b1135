use std::time::Instant;

use tracing::{debug, instrument, trace};

use crate::domain::{
    HeaderDescriptor, Message, Row, SortState, TableConfig, TableError, TableInput,
};
use crate::normalize;
use crate::report::{Diagnostic, Reporter, TracingReporter};
use crate::sort::sorted_indices;

/// State of one sortable table: the loaded headers and items, the sort state
/// and the order in which the items are currently displayed.
pub struct Model {
    config: TableConfig,
    headers: Vec<HeaderDescriptor>,
    items: Vec<Row>,
    rows: Vec<usize>, // Mapping of display position to index in `items`
    sort: SortState,
    reporter: Box<dyn Reporter>,
}

impl Model {
    pub fn new(config: TableConfig) -> Self {
        Self::with_reporter(config, TracingReporter)
    }

    pub fn with_reporter(config: TableConfig, reporter: impl Reporter + 'static) -> Self {
        Self {
            config,
            headers: Vec::new(),
            items: Vec::new(),
            rows: Vec::new(),
            sort: SortState::default(),
            reporter: Box::new(reporter),
        }
    }

    pub fn update(&mut self, message: Message) -> Result<(), TableError> {
        trace!("Update: {message:?}");
        let result = match message {
            Message::LoadHeaders(input) => self.load_headers(input),
            Message::LoadItems(input) => self.load_items(input),
            Message::SetSortColumn(column) => {
                self.sort.column = column.filter(|c| !c.is_empty());
                self.sort_table()
            }
            Message::SetSortAscending(ascending) => {
                self.sort.ascending = ascending;
                self.sort_table()
            }
            Message::HeaderClicked(idx) => self.trigger_sort(idx),
        };

        if let Err(err) = &result {
            self.reporter.report(&Diagnostic::from(err));
        }
        result
    }

    pub fn set_headers(
        &mut self,
        input: impl Into<TableInput<HeaderDescriptor>>,
    ) -> Result<(), TableError> {
        self.update(Message::LoadHeaders(input.into()))
    }

    pub fn set_items(&mut self, input: impl Into<TableInput<Row>>) -> Result<(), TableError> {
        self.update(Message::LoadItems(input.into()))
    }

    /// An empty column name clears the sort column. A column that matches no
    /// header is still stored, but leaves the row order untouched and returns
    /// `TableError::UnknownSortColumn`.
    pub fn set_sort_column(&mut self, column: impl Into<String>) -> Result<(), TableError> {
        self.update(Message::SetSortColumn(Some(column.into())))
    }

    pub fn clear_sort_column(&mut self) -> Result<(), TableError> {
        self.update(Message::SetSortColumn(None))
    }

    pub fn set_sort_ascending(&mut self, ascending: bool) -> Result<(), TableError> {
        self.update(Message::SetSortAscending(ascending))
    }

    pub fn click_header(&mut self, idx: usize) -> Result<(), TableError> {
        self.update(Message::HeaderClicked(idx))
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn headers(&self) -> &[HeaderDescriptor] {
        &self.headers
    }

    pub fn header_index(&self, key: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.value == key)
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn sort_column(&self) -> Option<&str> {
        self.sort.column.as_deref()
    }

    pub fn sort_ascending(&self) -> bool {
        self.sort.ascending
    }

    pub fn row_count(&self) -> usize {
        self.items.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Items in display order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.rows.iter().map(|&idx| &self.items[idx])
    }

    // -------------------- Update handlers ---------------------- //

    #[instrument(level = "debug", skip_all)]
    fn load_headers(&mut self, input: TableInput<HeaderDescriptor>) -> Result<(), TableError> {
        let headers = normalize::headers(input)?;
        debug!("Loaded {} headers", headers.len());
        self.headers = headers;
        self.resort_after_load();
        Ok(())
    }

    #[instrument(level = "debug", skip_all)]
    fn load_items(&mut self, input: TableInput<Row>) -> Result<(), TableError> {
        let items = normalize::items(input)?;
        debug!("Loaded {} items", items.len());
        // Reset to load order before the current sort state is reapplied
        self.rows = (0..items.len()).collect();
        self.items = items;
        self.resort_after_load();
        Ok(())
    }

    fn trigger_sort(&mut self, idx: usize) -> Result<(), TableError> {
        let header = self
            .headers
            .get(idx)
            .ok_or(TableError::HeaderIndexOutOfRange(idx))?;

        if !header.sortable {
            debug!("Header \"{}\" is not sortable", header.value);
            return Ok(());
        }

        if self.sort.is_sorted_by(&header.value) {
            self.sort.ascending = !self.sort.ascending;
        } else {
            self.sort.column = Some(header.value.clone());
        }
        self.sort_table()
    }

    /// A load that succeeded stays applied even when the stored sort column
    /// no longer matches a header, so that mismatch is only reported.
    fn resort_after_load(&mut self) {
        if let Err(err) = self.sort_table() {
            self.reporter.report(&Diagnostic::from(&err));
        }
    }

    fn sort_table(&mut self) -> Result<(), TableError> {
        let Some(column) = self.sort.column.as_deref() else {
            trace!("No sort column, keeping current order");
            return Ok(());
        };

        if self.headers.is_empty() {
            trace!("No headers loaded yet, not sorting by \"{column}\"");
            return Ok(());
        }

        if !self.headers.iter().any(|h| h.value == column) {
            return Err(TableError::UnknownSortColumn(column.to_string()));
        }

        let start_time = Instant::now();
        self.rows = sorted_indices(&self.items, column, self.sort.ascending, self.config.policy);
        debug!(
            "Sorted {} rows by \"{column}\" ({}) in {}us",
            self.rows.len(),
            if self.sort.ascending { "ascending" } else { "descending" },
            start_time.elapsed().as_micros()
        );
        Ok(())
    }
}
