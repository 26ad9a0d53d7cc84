pub mod aggregate;
pub mod source_document;

pub use aggregate::{
    abbreviate_month, month_ordinal, MoneyField, SaleRecord, TankSales, TankSize, Year,
    MONTH_ABBREVIATIONS, UNKNOWN_BRANCH,
};
pub use source_document::{BranchBlock, SourceDocument};
