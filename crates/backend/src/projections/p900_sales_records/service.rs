use contracts::domain::a001_sale_record::{MoneyField, SaleRecord, TankSize};
use contracts::projections::p900_sales_records::{
    SalesRecordRowDto, SalesRecordsListRequest, SalesRecordsListResponse, SortField,
    ITEMS_PER_PAGE,
};
use std::cmp::Ordering;

use crate::shared::format::format_currency;
use crate::shared::list_utils::{page_window, sort_list, Sortable};

impl Sortable for &SaleRecord {
    type Field = SortField;

    fn compare_by_field(&self, other: &Self, field: SortField) -> Ordering {
        match field {
            SortField::Date => self.date_key().cmp(&other.date_key()),
            SortField::Expenses => self
                .money(MoneyField::Expenses)
                .total_cmp(&other.money(MoneyField::Expenses)),
            SortField::Net => self
                .money(MoneyField::Net)
                .total_cmp(&other.money(MoneyField::Net)),
        }
    }
}

/// Filter, sort and paginate records for the sales table
pub fn list(records: &[SaleRecord], request: &SalesRecordsListRequest) -> SalesRecordsListResponse {
    let branch = request.branch.as_deref().filter(|b| !b.is_empty());

    let mut filtered: Vec<&SaleRecord> = match branch {
        Some(branch) => records.iter().filter(|r| r.location() == branch).collect(),
        None => records.iter().collect(),
    };

    if let Some(sort) = request.sort {
        sort_list(&mut filtered, sort.field, sort.is_ascending());
    }

    let window = page_window(filtered.len(), request.page, ITEMS_PER_PAGE);
    let items = filtered[window.start..window.end]
        .iter()
        .map(|r| to_row(r))
        .collect();

    let range_label = range_label(
        window.start,
        window.end,
        window.total_pages,
        filtered.len(),
        records.len(),
        branch,
    );

    SalesRecordsListResponse {
        items,
        total_count: filtered.len(),
        overall_count: records.len(),
        page: window.page,
        total_pages: window.total_pages,
        has_more: window.end < filtered.len(),
        range_label,
        sort_label: request.sort.map(|sort| sort.label().to_string()),
    }
}

pub fn to_row(record: &SaleRecord) -> SalesRecordRowDto {
    SalesRecordRowDto {
        date: record.display_date(),
        branch: record.location().to_string(),
        gross: format_currency(record.gross),
        expenses: format_currency(record.expenses),
        net: format_currency(record.net),
        deposit: format_currency(record.deposit),
        tank_27kg: record.tank_count(TankSize::Kg27),
        tank_11kg: record.tank_count(TankSize::Kg11),
        tank_22kg: record.tank_count(TankSize::Kg22),
        tank_50kg: record.tank_count(TankSize::Kg50),
        tank_summary: record.tank_sales_summary(),
    }
}

fn range_label(
    start: usize,
    end: usize,
    total_pages: usize,
    filtered: usize,
    overall: usize,
    branch: Option<&str>,
) -> String {
    let mut label = if total_pages > 1 {
        format!("Showing {} to {} of {} records", start + 1, end, filtered)
    } else {
        format!("Showing {} of {} records", filtered, overall)
    };
    if let Some(branch) = branch {
        label.push_str(&format!(" for {}", branch));
    }
    label
}
