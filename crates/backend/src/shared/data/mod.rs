pub mod normalizer;
pub mod sales_data;
pub mod source_loader;

pub use sales_data::{sum_field, unique_branches, LoadState, SalesData};
pub use source_loader::{FsSourceLoader, LoadError, SourceLoader, SOURCE_FILES};
