use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rows per table page
pub const ITEMS_PER_PAGE: usize = 10;

/// Column the sales table can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Date,
    Expenses,
    Net,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Sort selection, written as "<field>-<order>" (e.g. "net-desc")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortOption {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    pub fn is_ascending(&self) -> bool {
        self.order == SortOrder::Asc
    }

    /// Label shown in the sort selector
    pub fn label(&self) -> &'static str {
        match (self.field, self.order) {
            (SortField::Date, SortOrder::Asc) => "Date (Oldest First)",
            (SortField::Date, SortOrder::Desc) => "Date (Newest First)",
            (SortField::Expenses, SortOrder::Asc) => "Expenses (Low to High)",
            (SortField::Expenses, SortOrder::Desc) => "Expenses (High to Low)",
            (SortField::Net, SortOrder::Asc) => "Net (Low to High)",
            (SortField::Net, SortOrder::Desc) => "Net (High to Low)",
        }
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, order) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid sort option: {}", s))?;
        let field = match field {
            "date" => SortField::Date,
            "expenses" => SortField::Expenses,
            "net" => SortField::Net,
            other => return Err(format!("Unknown sort field: {}", other)),
        };
        let order = match order {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            other => return Err(format!("Unknown sort order: {}", other)),
        };
        Ok(Self { field, order })
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self.field {
            SortField::Date => "date",
            SortField::Expenses => "expenses",
            SortField::Net => "net",
        };
        let order = match self.order {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        };
        write!(f, "{}-{}", field, order)
    }
}

/// Request for one page of the sales table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecordsListRequest {
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub sort: Option<SortOption>,
    /// 1-based
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_page() -> usize {
    1
}

impl Default for SalesRecordsListRequest {
    fn default() -> Self {
        Self {
            branch: None,
            sort: None,
            page: default_page(),
        }
    }
}

/// One table row, ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecordRowDto {
    /// "Jan 5, 2026"
    pub date: String,
    pub branch: String,
    pub gross: String,
    pub expenses: String,
    pub net: String,
    pub deposit: String,
    pub tank_27kg: i64,
    pub tank_11kg: i64,
    pub tank_22kg: i64,
    pub tank_50kg: i64,
    /// "27kg: 3, 11kg: 10, 22kg: 0, 50kg: 1" or "-"
    pub tank_summary: String,
}

/// One page of the sales table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecordsListResponse {
    pub items: Vec<SalesRecordRowDto>,
    /// Records matching the filter
    pub total_count: usize,
    /// All loaded records
    pub overall_count: usize,
    /// Page actually returned, after clamping
    pub page: usize,
    pub total_pages: usize,
    pub has_more: bool,
    /// "Showing 11 to 20 of 42 records for GULOD"
    pub range_label: String,
    /// Selector label of the applied sort, e.g. "Net (High to Low)"
    pub sort_label: Option<String>,
}
