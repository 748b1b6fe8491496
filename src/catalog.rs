//! Filter choices derived from the protest table.
//!
//! Each configured categorical column becomes one selectable filter in the
//! widget column next to the map. Values are deduplicated and sorted, so
//! the catalog is deterministic no matter how the input rows are ordered.

use std::collections::BTreeSet;

use crate::config::InputConfig;
use crate::reader::ProtestRecord;
use crate::{ProtestMapError, Result};

/// Textual record attribute a filter can select on.
///
/// Filter columns are configured by their CSV header name; this enum is
/// the resolved binding to the record field, which downstream consumers
/// use to read values without repeating the header comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtestAttribute {
    Description,
    Location,
    EventType,
}

impl ProtestAttribute {
    /// Value of this attribute on one record.
    pub fn value_of<'a>(&self, record: &'a ProtestRecord) -> &'a str {
        match self {
            ProtestAttribute::Description => &record.description,
            ProtestAttribute::Location => &record.location,
            ProtestAttribute::EventType => &record.event_type,
        }
    }
}

/// One categorical column and its distinct values, ready to become a
/// selection widget.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    /// Column display name, as configured.
    pub column: String,
    /// Record attribute the column resolved to.
    pub attribute: ProtestAttribute,
    /// Distinct non-blank values, alphabetically sorted.
    pub values: Vec<String>,
}

/// Build one [`FilterSpec`] per configured filter column, in the configured
/// order.
///
/// A filter column must be one of the textual record columns (description,
/// location, event type); anything else is a data error. Blank cells
/// produce no choice, an empty string is not selectable.
pub fn collect_filters(
    protests: &[ProtestRecord],
    input: &InputConfig,
) -> Result<Vec<FilterSpec>> {
    input
        .filter_columns
        .iter()
        .map(|column| {
            let attribute = resolve_column(column, input)?;
            let distinct: BTreeSet<&str> = protests
                .iter()
                .map(|record| attribute.value_of(record))
                .filter(|value| !value.is_empty())
                .collect();
            Ok(FilterSpec {
                column: column.clone(),
                attribute,
                values: distinct.into_iter().map(str::to_string).collect(),
            })
        })
        .collect()
}

fn resolve_column(column: &str, input: &InputConfig) -> Result<ProtestAttribute> {
    if column == input.location_column {
        Ok(ProtestAttribute::Location)
    } else if column == input.event_type_column {
        Ok(ProtestAttribute::EventType)
    } else if column == input.description_column {
        Ok(ProtestAttribute::Description)
    } else {
        Err(ProtestMapError::DataError(format!(
            "Filter column '{}' is not a categorical protest column",
            column
        )))
    }
}
