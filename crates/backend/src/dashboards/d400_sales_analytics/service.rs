use contracts::dashboards::d400_sales_analytics::{
    FilterOptions, LocationSales, MonthSales, SalesAnalyticsRequest, SalesAnalyticsResponse,
    SalesTotals, TankTypeCount, VolumeTotals,
};
use contracts::domain::a001_sale_record::{month_ordinal, MoneyField, SaleRecord, TankSize};
use std::collections::{BTreeSet, HashMap};

use crate::shared::data::{sum_field, unique_branches};

/// Branch names longer than this are shortened on chart axes
const MAX_LABEL_LENGTH: usize = 10;

/// Build the analytics dashboard for the given filter
pub fn get_sales_analytics(
    records: &[SaleRecord],
    request: &SalesAnalyticsRequest,
) -> SalesAnalyticsResponse {
    let filtered: Vec<&SaleRecord> = records.iter().filter(|r| matches_filter(r, request)).collect();

    SalesAnalyticsResponse {
        filter_options: filter_options(records),
        by_location: sales_by_location(&filtered),
        by_month: sales_by_month(&filtered),
        totals: totals(&filtered),
        tank_sales: tank_sales_by_type(&filtered),
        volume: total_volume(&filtered),
    }
}

fn matches_filter(record: &SaleRecord, request: &SalesAnalyticsRequest) -> bool {
    if let Some(branch) = request.branch.as_deref().filter(|b| !b.is_empty()) {
        if record.location() != branch {
            return false;
        }
    }
    if let Some(year) = request.year {
        if record.year.as_number() != Some(year) {
            return false;
        }
    }
    if let Some(month) = request.month.as_deref().filter(|m| !m.is_empty()) {
        if record.month != month {
            return false;
        }
    }
    true
}

/// Options for the branch / year / month selectors
pub fn filter_options(records: &[SaleRecord]) -> FilterOptions {
    let years: BTreeSet<i64> = records
        .iter()
        .filter_map(|r| r.year.as_number())
        .filter(|y| *y != 0)
        .collect();

    let mut months: Vec<String> = Vec::new();
    for record in records {
        if !record.month.is_empty() && !months.contains(&record.month) {
            months.push(record.month.clone());
        }
    }
    // Unknown month names sort first
    months.sort_by_key(|m| month_ordinal(m).unwrap_or(0));

    FilterOptions {
        branches: unique_branches(records),
        years: years.into_iter().collect(),
        months,
    }
}

/// Chart label for a branch: "STA. TERESITA" -> "STA. TER.."
pub fn shorten_branch_name(name: &str) -> String {
    if name.chars().count() > MAX_LABEL_LENGTH {
        let head: String = name.chars().take(MAX_LABEL_LENGTH - 2).collect();
        format!("{}..", head)
    } else {
        name.to_string()
    }
}

fn sales_by_location(records: &[&SaleRecord]) -> Vec<LocationSales> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, LocationSales> = HashMap::new();

    for record in records {
        let location = record.location();
        let entry = groups.entry(location).or_insert_with(|| {
            order.push(location);
            LocationSales {
                branch: location.to_string(),
                label: shorten_branch_name(location),
                gross: 0.0,
                net: 0.0,
                deposit: 0.0,
                count: 0,
            }
        });
        entry.gross += record.money(MoneyField::Gross);
        entry.net += record.money(MoneyField::Net);
        entry.deposit += record.money(MoneyField::Deposit);
        entry.count += 1;
    }

    order
        .into_iter()
        .filter_map(|location| groups.remove(location))
        .collect()
}

fn sales_by_month(records: &[&SaleRecord]) -> Vec<MonthSales> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, MonthSales> = HashMap::new();

    for record in records {
        let month = if record.month.is_empty() {
            "Unknown"
        } else {
            record.month.as_str()
        };
        let entry = groups.entry(month).or_insert_with(|| {
            order.push(month);
            MonthSales {
                month: month.to_string(),
                gross: 0.0,
                net: 0.0,
                deposit: 0.0,
                gcash: 0.0,
                count: 0,
            }
        });
        entry.gross += record.money(MoneyField::Gross);
        entry.net += record.money(MoneyField::Net);
        entry.deposit += record.money(MoneyField::Deposit);
        entry.gcash += record.money(MoneyField::Gcash);
        entry.count += 1;
    }

    order
        .into_iter()
        .filter_map(|month| groups.remove(month))
        .collect()
}

fn totals(records: &[&SaleRecord]) -> SalesTotals {
    let sum = |field: MoneyField| records.iter().fold(0.0, |acc, r| acc + r.money(field));
    SalesTotals {
        gross: sum(MoneyField::Gross),
        net: sum(MoneyField::Net),
        deposit: sum(MoneyField::Deposit),
    }
}

fn tank_sales_by_type(records: &[&SaleRecord]) -> Vec<TankTypeCount> {
    TankSize::ALL
        .iter()
        .map(|size| TankTypeCount {
            name: size.label().to_string(),
            count: records.iter().map(|r| r.tank_count(*size)).sum(),
        })
        .collect()
}

fn total_volume(records: &[&SaleRecord]) -> VolumeTotals {
    let kg: i64 = records
        .iter()
        .filter_map(|r| r.tank_sales.as_ref())
        .map(|t| t.volume_kg())
        .sum();
    VolumeTotals {
        kg,
        tons: kg as f64 / 1000.0,
    }
}

/// Grand totals over every record, regardless of filter
pub fn overall_totals(records: &[SaleRecord]) -> SalesTotals {
    SalesTotals {
        gross: sum_field(records, MoneyField::Gross),
        net: sum_field(records, MoneyField::Net),
        deposit: sum_field(records, MoneyField::Deposit),
    }
}
