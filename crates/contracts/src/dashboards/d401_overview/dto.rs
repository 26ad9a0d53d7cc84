use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dashboards::d400_sales_analytics::SalesTotals;
use crate::shared::business_info::BusinessInfo;

/// Response for the overview (home) page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewResponse {
    pub business: BusinessInfo,
    /// One card per advertised branch
    pub branch_cards: Vec<BranchCard>,
    /// Number of loaded sale records
    pub record_count: usize,
    /// Branches present in the loaded data, sorted
    pub branches: Vec<String>,
    pub totals: SalesTotals,
    /// Totals formatted as peso amounts
    pub totals_display: TotalsDisplay,
    /// When the data set was loaded, `None` if not loaded yet
    pub loaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsDisplay {
    pub gross: String,
    pub net: String,
    pub deposit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchCard {
    pub name: String,
    pub blurb: String,
}
