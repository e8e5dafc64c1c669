//! Row materialization: cell lists into keyed records

use crate::types::{CellValue, Record};

/// Header resolution state, fixed once the first retained line is seen
pub(crate) enum HeaderState {
    /// Waiting for the first retained line
    Pending,
    /// Headers disabled; columns keyed by position
    Positional,
    /// Resolved names; `None` marks a column dropped by the header hook
    Resolved(Vec<Option<String>>),
}

impl HeaderState {
    /// Resolved name for a column, if one exists and was not dropped
    pub fn name_at(&self, index: usize) -> Option<&str> {
        match self {
            HeaderState::Resolved(names) => names.get(index).and_then(|n| n.as_deref()),
            _ => None,
        }
    }

    /// Header count used for strict column validation
    pub fn len(&self) -> Option<usize> {
        match self {
            HeaderState::Resolved(names) => Some(names.len()),
            _ => None,
        }
    }
}

/// Build one record from a finished cell list.
///
/// Column keys follow the resolved headers: dropped columns are omitted,
/// blank or missing headers get a synthesized `_EMPTY_<n>` key, positional
/// mode uses the zero-based index. Values are always stored as trimmed text.
pub(crate) fn materialize(headers: &HeaderState, cells: Vec<CellValue>) -> Record {
    let mut record = Record::new();
    for (index, cell) in cells.into_iter().enumerate() {
        let value = cell.into_trimmed_text();
        match headers {
            HeaderState::Positional | HeaderState::Pending => {
                record.insert(index.to_string(), value);
            }
            HeaderState::Resolved(names) => match names.get(index) {
                Some(Some(name)) if !name.trim().is_empty() => {
                    record.insert(name.clone(), value);
                }
                Some(None) => {} // column dropped by the header hook
                _ => {
                    record.insert(format!("_EMPTY_{}", index + 1), value);
                }
            },
        }
    }
    record
}
