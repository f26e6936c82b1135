use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::domain::{HeaderDescriptor, InputKind, Row, TableError, TableInput};

pub fn headers(input: TableInput<HeaderDescriptor>) -> Result<Vec<HeaderDescriptor>, TableError> {
    normalize(input, InputKind::Headers)
}

pub fn items(input: TableInput<Row>) -> Result<Vec<Row>, TableError> {
    normalize(input, InputKind::Items)
}

fn normalize<T: DeserializeOwned>(
    input: TableInput<T>,
    kind: InputKind,
) -> Result<Vec<T>, TableError> {
    match input {
        TableInput::Raw(text) => {
            debug!("{kind} received as text ({} bytes)", text.len());
            parse_sequence(&text, kind)
        }
        TableInput::Structured(values) => {
            debug!("{kind} received as a sequence of {}", values.len());
            Ok(values)
        }
    }
}

fn parse_sequence<T: DeserializeOwned>(text: &str, kind: InputKind) -> Result<Vec<T>, TableError> {
    let value: Value =
        serde_json::from_str(text).map_err(|source| TableError::Parse { input: kind, source })?;

    let Value::Array(elements) = value else {
        return Err(TableError::not_a_sequence(kind));
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(idx, element)| {
            serde_json::from_value(element).map_err(|e| TableError::Validation {
                input: kind,
                message: format!("element {idx}: {e}"),
            })
        })
        .collect()
}
