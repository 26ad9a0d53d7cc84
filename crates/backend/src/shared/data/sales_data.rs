use chrono::{DateTime, Utc};
use contracts::domain::a001_sale_record::{MoneyField, SaleRecord};
use futures::future::try_join_all;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::normalizer;
use super::source_loader::{LoadError, SourceLoader, SOURCE_FILES};

/// Lifecycle of the sales cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Empty,
    Loading,
    Loaded,
    /// Last attempt failed; the next `load()` retries
    Failed,
}

#[derive(Debug)]
struct LoadedSales {
    records: Vec<SaleRecord>,
    loaded_at: DateTime<Utc>,
}

/// Load-once cache of all sale records.
///
/// Built once at startup and shared through an `Arc`. `load()` fetches every
/// source concurrently and commits the merged records only if all of them
/// succeed; concurrent callers wait for the same in-flight load.
pub struct SalesData {
    loader: Arc<dyn SourceLoader>,
    sources: Vec<String>,
    cache: OnceCell<LoadedSales>,
    loading: AtomicBool,
    failed: AtomicBool,
}

/// Resets the loading flag when the load future finishes or is dropped
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SalesData {
    /// Cache over the standard source file set
    pub fn new(loader: Arc<dyn SourceLoader>) -> Self {
        Self::with_sources(loader, SOURCE_FILES.iter().map(|s| s.to_string()).collect())
    }

    pub fn with_sources(loader: Arc<dyn SourceLoader>, sources: Vec<String>) -> Self {
        Self {
            loader,
            sources,
            cache: OnceCell::new(),
            loading: AtomicBool::new(false),
            failed: AtomicBool::new(false),
        }
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Load all sources, or return the cached records if already loaded
    pub async fn load(&self) -> Result<&[SaleRecord], LoadError> {
        let loaded = self.cache.get_or_try_init(|| self.fetch_all()).await?;
        Ok(loaded.records.as_slice())
    }

    async fn fetch_all(&self) -> Result<LoadedSales, LoadError> {
        self.loading.store(true, Ordering::Release);
        let _guard = LoadingGuard(&self.loading);

        tracing::info!("Loading sales data from {} sources", self.sources.len());

        let fetches = self.sources.iter().map(|file| self.loader.fetch(file));
        let documents = match try_join_all(fetches).await {
            Ok(documents) => documents,
            Err(e) => {
                self.failed.store(true, Ordering::Release);
                tracing::error!("Sales data load failed: {}", e);
                return Err(e);
            }
        };

        let records: Vec<SaleRecord> = self
            .sources
            .iter()
            .zip(documents.iter())
            .flat_map(|(file, document)| normalizer::normalize(file, document))
            .collect();

        self.failed.store(false, Ordering::Release);
        tracing::info!("Loaded {} sale records", records.len());

        Ok(LoadedSales {
            records,
            loaded_at: Utc::now(),
        })
    }

    /// Cached records; empty until the first successful `load()`
    pub fn get_all(&self) -> &[SaleRecord] {
        self.cache
            .get()
            .map(|loaded| loaded.records.as_slice())
            .unwrap_or(&[])
    }

    pub fn state(&self) -> LoadState {
        if self.cache.initialized() {
            LoadState::Loaded
        } else if self.loading.load(Ordering::Acquire) {
            LoadState::Loading
        } else if self.failed.load(Ordering::Acquire) {
            LoadState::Failed
        } else {
            LoadState::Empty
        }
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.cache.get().map(|loaded| loaded.loaded_at)
    }

    /// Sum of a money field over all cached records
    pub fn sum_field(&self, field: MoneyField) -> f64 {
        sum_field(self.get_all(), field)
    }

    /// Sorted distinct branch names of the cached records
    pub fn unique_branches(&self) -> Vec<String> {
        unique_branches(self.get_all())
    }
}

pub fn sum_field(records: &[SaleRecord], field: MoneyField) -> f64 {
    records.iter().fold(0.0, |acc, r| acc + r.money(field))
}

pub fn unique_branches(records: &[SaleRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.location())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    /// In-memory loader counting fetches per source
    #[derive(Default)]
    pub(crate) struct MemoryLoader {
        documents: HashMap<String, Value>,
        fetches: Mutex<HashMap<String, usize>>,
        total: AtomicUsize,
    }

    impl MemoryLoader {
        pub(crate) fn with(mut self, file: &str, document: Value) -> Self {
            self.documents.insert(file.to_string(), document);
            self
        }

        pub(crate) fn fetch_count(&self, file: &str) -> usize {
            self.fetches.lock().unwrap().get(file).copied().unwrap_or(0)
        }

        pub(crate) fn total_fetches(&self) -> usize {
            self.total.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SourceLoader for MemoryLoader {
        async fn fetch(&self, file: &str) -> Result<Value, LoadError> {
            *self.fetches.lock().unwrap().entry(file.to_string()).or_insert(0) += 1;
            self.total.fetch_add(1, Ordering::SeqCst);
            // let other callers run while this fetch is "in flight"
            tokio::task::yield_now().await;
            self.documents
                .get(file)
                .cloned()
                .ok_or_else(|| LoadError::Unavailable(file.to_string()))
        }
    }

    fn sources(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    pub(crate) fn sample_loader() -> MemoryLoader {
        MemoryLoader::default()
            .with(
                "jan-gulod-2026.json",
                json!({
                    "branch": "GULOD", "month": "January", "year": 2026,
                    "data": [
                        {"date": 1, "gross": 100, "net": 80},
                        {"date": 2, "gross": null, "net": 40}
                    ]
                }),
            )
            .with(
                "dec-bayan-2025.json",
                json!({
                    "branches": [{
                        "branch": "BAYAN", "month": "December", "year": 2025,
                        "data": [{"date": 30, "gross": 50}]
                    }]
                }),
            )
            .with(
                "dec-gulod-2025.json",
                json!({
                    "branch": "GULOD", "month": "December", "year": 2025,
                    "data": [{"date": 31, "deposit": 20}]
                }),
            )
    }

    pub(crate) const SAMPLE_SOURCES: [&str; 3] =
        ["jan-gulod-2026.json", "dec-bayan-2025.json", "dec-gulod-2025.json"];

    #[tokio::test]
    async fn test_get_all_empty_before_load() {
        let data = SalesData::with_sources(Arc::new(sample_loader()), sources(&SAMPLE_SOURCES));
        assert!(data.get_all().is_empty());
        assert_eq!(data.state(), LoadState::Empty);
        assert_eq!(data.sum_field(MoneyField::Gross), 0.0);
        assert!(data.unique_branches().is_empty());
        assert!(data.loaded_at().is_none());
    }

    #[tokio::test]
    async fn test_load_merges_in_source_order() {
        let data = SalesData::with_sources(Arc::new(sample_loader()), sources(&SAMPLE_SOURCES));
        let records = data.load().await.unwrap();

        let dates: Vec<u32> = records.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![1, 2, 30, 31]);
        assert_eq!(records[2].branch, "BAYAN");
        assert_eq!(data.get_all().len(), 4);
        assert_eq!(data.state(), LoadState::Loaded);
        assert!(data.loaded_at().is_some());
    }

    #[tokio::test]
    async fn test_aggregates_over_cache() {
        let data = SalesData::with_sources(Arc::new(sample_loader()), sources(&SAMPLE_SOURCES));
        data.load().await.unwrap();

        assert_eq!(data.sum_field(MoneyField::Gross), 150.0);
        assert_eq!(data.sum_field(MoneyField::Net), 120.0);
        assert_eq!(data.sum_field(MoneyField::Deposit), 20.0);
        assert_eq!(data.unique_branches(), vec!["BAYAN", "GULOD"]);
    }

    #[tokio::test]
    async fn test_load_is_idempotent() {
        let loader = Arc::new(sample_loader());
        let data = SalesData::with_sources(loader.clone(), sources(&SAMPLE_SOURCES));

        let first = data.load().await.unwrap().to_vec();
        let second = data.load().await.unwrap().to_vec();

        assert_eq!(first, second);
        assert_eq!(second.len(), 4);
        assert_eq!(loader.total_fetches(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_loads_fetch_each_source_once() {
        let loader = Arc::new(sample_loader());
        let data = SalesData::with_sources(loader.clone(), sources(&SAMPLE_SOURCES));

        let (a, b, c, d) = tokio::join!(data.load(), data.load(), data.load(), data.load());
        for result in [a, b, c, d] {
            assert_eq!(result.unwrap().len(), 4);
        }

        for file in SAMPLE_SOURCES {
            assert_eq!(loader.fetch_count(file), 1, "{} fetched more than once", file);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_loads_across_tasks() {
        let loader = Arc::new(sample_loader());
        let data = Arc::new(SalesData::with_sources(loader.clone(), sources(&SAMPLE_SOURCES)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let data = data.clone();
                tokio::spawn(async move { data.load().await.map(|r| r.len()) })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), 4);
        }
        assert_eq!(loader.total_fetches(), 3);
    }

    #[tokio::test]
    async fn test_failed_load_commits_nothing_and_retries() {
        let loader = Arc::new(sample_loader());
        let mut names = sources(&SAMPLE_SOURCES);
        names.push("missing.json".to_string());
        let data = SalesData::with_sources(loader.clone(), names);

        let err = data.load().await.unwrap_err();
        assert!(matches!(err, LoadError::Unavailable(ref f) if f == "missing.json"));
        assert!(data.get_all().is_empty());
        assert_eq!(data.state(), LoadState::Failed);

        // nothing cached, so the next call fetches again
        assert!(data.load().await.is_err());
        assert_eq!(loader.fetch_count("missing.json"), 2);
    }

    #[tokio::test]
    async fn test_unrecognized_document_contributes_nothing() {
        let loader = sample_loader().with("odd.json", json!({"note": "no data here"}));
        let mut names = sources(&SAMPLE_SOURCES);
        names.insert(1, "odd.json".to_string());
        let data = SalesData::with_sources(Arc::new(loader), names);

        assert_eq!(data.load().await.unwrap().len(), 4);
    }

    #[test]
    fn test_sum_field_treats_null_as_zero() {
        let records: Vec<SaleRecord> = serde_json::from_value(json!([
            {"gross": 100}, {"gross": null}, {"gross": 50}
        ]))
        .unwrap();
        assert_eq!(sum_field(&records, MoneyField::Gross), 150.0);
        assert_eq!(sum_field(&[], MoneyField::Gross), 0.0);
    }

    #[test]
    fn test_empty_sum_is_positive_zero() {
        let total = sum_field(&[], MoneyField::Deposit);
        assert!(total.is_sign_positive());
        assert_eq!(serde_json::to_string(&total).unwrap(), "0.0");
    }

    #[test]
    fn test_unique_branches_sorted_and_deduplicated() {
        let records: Vec<SaleRecord> = ["GULOD", "BAYAN", "GULOD"]
            .iter()
            .map(|b| SaleRecord {
                branch: b.to_string(),
                ..Default::default()
            })
            .collect();
        assert_eq!(unique_branches(&records), vec!["BAYAN", "GULOD"]);
    }

    #[test]
    fn test_default_manifest() {
        let data = SalesData::new(Arc::new(MemoryLoader::default()));
        assert_eq!(data.sources().len(), 12);
        assert_eq!(data.sources()[0], "jan-agoncillo-2026.json");
        assert_eq!(data.sources()[11], "dec-stateresita-2025.json");
    }
}
