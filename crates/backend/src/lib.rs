pub mod dashboards;
pub mod projections;
pub mod shared;
