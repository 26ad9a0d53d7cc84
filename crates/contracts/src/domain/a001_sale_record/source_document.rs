use serde_json::Value;

use super::aggregate::{text_of, Year};

/// One static JSON file: a branch's sales for one month.
///
/// Two layouts exist in the data set:
/// - flat: `{ data: [...], branch, month, year }`
/// - nested: `{ branches: [{ data: [...], branch, month, year }] }`, only the
///   first block is used
///
/// Entries are kept as raw JSON so that document metadata can be merged
/// into them before they are read as `SaleRecord`s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceDocument {
    /// Top-level fields of the flat layout
    pub top: BranchBlock,
    /// `branches[0]` of the nested layout
    pub first_block: Option<BranchBlock>,
}

/// `data` plus metadata, found either at the top level or in a nested block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BranchBlock {
    pub data: Option<Vec<Value>>,
    pub branch: Option<String>,
    pub month: Option<String>,
    pub year: Option<Year>,
}

impl BranchBlock {
    /// Each field is read on its own; one of the wrong type is treated as absent.
    pub fn from_value(value: &Value) -> Self {
        Self {
            data: value.get("data").and_then(Value::as_array).cloned(),
            branch: value.get("branch").and_then(text_of),
            month: value.get("month").and_then(text_of),
            year: value.get("year").and_then(Year::from_value),
        }
    }
}

impl SourceDocument {
    pub fn from_value(value: &Value) -> Self {
        Self {
            top: BranchBlock::from_value(value),
            first_block: value
                .get("branches")
                .and_then(Value::as_array)
                .and_then(|blocks| blocks.first())
                .map(BranchBlock::from_value),
        }
    }
}
