//! Selection widgets built from the filter catalog.

use crate::catalog::{FilterSpec, ProtestAttribute};
use crate::naming;

/// One multi-select widget controlling marker visibility.
///
/// Every option starts selected so the initial map shows all records.
/// Deselecting options hides the markers whose attribute value is no
/// longer selected.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectWidget {
    /// Column the widget filters on, used as its visible label.
    pub column: String,
    /// Record attribute the column resolved to.
    pub attribute: ProtestAttribute,
    /// Stable DOM id derived from the column name.
    pub element_id: String,
    /// Selectable values, sorted.
    pub options: Vec<String>,
}

impl SelectWidget {
    pub fn from_spec(spec: &FilterSpec) -> Self {
        SelectWidget {
            column: spec.column.clone(),
            attribute: spec.attribute,
            element_id: naming::filter_id(&spec.column),
            options: spec.values.clone(),
        }
    }
}
