use tracing::trace;

use crate::domain::{Message, TableError, TableEvent};
use crate::model::Model;

/// Maps events coming from the host onto model messages.
#[derive(Debug, Default)]
pub struct Controller;

impl Controller {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_event(
        &self,
        model: &Model,
        event: TableEvent,
    ) -> Result<Option<Message>, TableError> {
        let message = match event {
            TableEvent::HeaderActivated(key) => {
                let idx = model
                    .header_index(&key)
                    .ok_or(TableError::UnknownHeader(key))?;
                Some(Message::HeaderClicked(idx))
            }
            TableEvent::SortColumnWritten(column) => {
                let column = (!column.is_empty()).then_some(column);
                if column.as_deref() == model.sort_column() {
                    None
                } else {
                    Some(Message::SetSortColumn(column))
                }
            }
            TableEvent::SortDirectionWritten(ascending) => (ascending != model.sort_ascending())
                .then_some(Message::SetSortAscending(ascending)),
        };
        trace!("Mapped event => {message:?}");
        Ok(message)
    }
}
