use anyhow::Context;
use backend::dashboards::{d400_sales_analytics, d401_overview};
use backend::projections::p900_sales_records;
use backend::shared::config::{get_data_dir, load_config};
use backend::shared::data::{FsSourceLoader, SalesData};
use backend::shared::format::{format_currency, format_number};
use contracts::dashboards::d400_sales_analytics::SalesAnalyticsRequest;
use contracts::domain::a001_sale_record::MoneyField;
use contracts::projections::p900_sales_records::{
    SalesRecordsListRequest, SortField, SortOption, SortOrder,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log directory
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("dashboard.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    let config = load_config()?;
    let loader = FsSourceLoader::new(get_data_dir(&config)?);
    tracing::info!("Sales data directory: {}", loader.dir().display());

    let sales = Arc::new(SalesData::new(Arc::new(loader)));
    sales
        .load()
        .await
        .context("failed to load sales data")?;

    let overview = d401_overview::service::get_overview(&sales);
    tracing::info!(
        "{}: {} records across {} branches | gross {} | net {} | deposit {}",
        overview.business.name,
        format_number(overview.record_count),
        overview.branches.len(),
        overview.totals_display.gross,
        overview.totals_display.net,
        overview.totals_display.deposit,
    );

    for field in [MoneyField::Expenses, MoneyField::Gcash] {
        tracing::info!(
            "Total {}: {}",
            field.as_str(),
            format_currency(Some(sales.sum_field(field)))
        );
    }

    let analytics = d400_sales_analytics::service::get_sales_analytics(
        sales.get_all(),
        &SalesAnalyticsRequest::default(),
    );
    for location in &analytics.by_location {
        tracing::info!(
            "{:>12} | {:>4} days | gross {:>14} | net {:>14}",
            location.label,
            location.count,
            format_currency(Some(location.gross)),
            format_currency(Some(location.net)),
        );
    }
    for tank in &analytics.tank_sales {
        tracing::info!("{:>5}: {} tanks", tank.name, format_number(tank.count.max(0) as usize));
    }
    tracing::info!(
        "Total volume: {} kg ({:.2} t)",
        format_number(analytics.volume.kg.max(0) as usize),
        analytics.volume.tons
    );

    let page = p900_sales_records::service::list(
        sales.get_all(),
        &SalesRecordsListRequest {
            sort: Some(SortOption::new(SortField::Date, SortOrder::Desc)),
            ..Default::default()
        },
    );
    for row in &page.items {
        tracing::info!(
            "{:<14} {:<14} gross {:>10} net {:>10} | {}",
            row.date,
            row.branch,
            row.gross,
            row.net,
            row.tank_summary
        );
    }
    tracing::info!(
        "{} | sorted by {}",
        page.range_label,
        page.sort_label.as_deref().unwrap_or("source order")
    );

    Ok(())
}
