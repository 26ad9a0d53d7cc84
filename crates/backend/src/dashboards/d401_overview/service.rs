use contracts::dashboards::d401_overview::{BranchCard, OverviewResponse, TotalsDisplay};
use contracts::shared::business_info::{BusinessInfo, BUSINESS_INFO};

use crate::dashboards::d400_sales_analytics::service::overall_totals;
use crate::shared::data::SalesData;
use crate::shared::format::format_currency;

/// Overview page: business profile plus totals of whatever is loaded
pub fn get_overview(sales: &SalesData) -> OverviewResponse {
    let records = sales.get_all();
    let totals = overall_totals(records);

    let branch_cards = BUSINESS_INFO
        .branches
        .iter()
        .map(|name| BranchCard {
            name: name.clone(),
            blurb: BusinessInfo::branch_blurb(name),
        })
        .collect();

    OverviewResponse {
        business: BUSINESS_INFO.clone(),
        branch_cards,
        record_count: records.len(),
        branches: sales.unique_branches(),
        totals,
        totals_display: TotalsDisplay {
            gross: format_currency(Some(totals.gross)),
            net: format_currency(Some(totals.net)),
            deposit: format_currency(Some(totals.deposit)),
        },
        loaded_at: sales.loaded_at(),
    }
}
