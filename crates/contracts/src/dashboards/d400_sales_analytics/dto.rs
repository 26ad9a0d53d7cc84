use serde::{Deserialize, Serialize};

/// Filter selected on the analytics dashboard. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesAnalyticsRequest {
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub month: Option<String>,
}

/// Response for the sales analytics dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesAnalyticsResponse {
    /// Filter options, computed over the unfiltered data
    pub filter_options: FilterOptions,
    /// Sales per branch, in order of first appearance
    pub by_location: Vec<LocationSales>,
    /// Sales per month, in order of first appearance
    pub by_month: Vec<MonthSales>,
    pub totals: SalesTotals,
    /// Units per cylinder size: 11kg, 22kg, 27kg, 50kg
    pub tank_sales: Vec<TankTypeCount>,
    pub volume: VolumeTotals,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Sorted alphabetically
    pub branches: Vec<String>,
    /// Ascending
    pub years: Vec<i64>,
    /// Calendar order
    pub months: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSales {
    pub branch: String,
    /// Shortened branch name for chart axes
    pub label: String,
    pub gross: f64,
    pub net: f64,
    pub deposit: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSales {
    pub month: String,
    pub gross: f64,
    pub net: f64,
    pub deposit: f64,
    pub gcash: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesTotals {
    pub gross: f64,
    pub net: f64,
    pub deposit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankTypeCount {
    /// "11kg", "22kg", ...
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeTotals {
    pub kg: i64,
    pub tons: f64,
}
