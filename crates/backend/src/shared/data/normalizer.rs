use contracts::domain::a001_sale_record::{SaleRecord, SourceDocument, Year, UNKNOWN_BRANCH};
use serde_json::Value;

/// Layout a source document was recognized as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    /// `{ data, branch, month, year }`
    Flat,
    /// `{ branches: [{ data, branch, month, year }] }`
    Nested,
    /// Neither layout; contributes nothing
    Unrecognized,
}

/// Document-level fields injected into each entry
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMetadata {
    pub branch: String,
    pub month: String,
    pub year: Year,
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub shape: DocumentShape,
    pub entries: Vec<Value>,
    pub metadata: DocumentMetadata,
}

/// Pick the entry list and metadata out of a raw document.
///
/// Top-level fields take precedence over `branches[0]`; metadata falls back
/// field by field, skipping empty or mistyped values.
pub fn extract(document: &Value) -> Extraction {
    let doc = SourceDocument::from_value(document);
    let top = &doc.top;
    let block = doc.first_block.as_ref();

    let (shape, entries) = match (&top.data, block.and_then(|b| b.data.as_ref())) {
        (Some(data), _) => (DocumentShape::Flat, data.clone()),
        (None, Some(data)) => (DocumentShape::Nested, data.clone()),
        (None, None) => (DocumentShape::Unrecognized, Vec::new()),
    };

    let branch = non_empty(top.branch.as_deref())
        .or_else(|| non_empty(block.and_then(|b| b.branch.as_deref())))
        .unwrap_or(UNKNOWN_BRANCH)
        .to_string();
    let month = non_empty(top.month.as_deref())
        .or_else(|| non_empty(block.and_then(|b| b.month.as_deref())))
        .unwrap_or_default()
        .to_string();
    let year = top
        .year
        .as_ref()
        .filter(|y| !y.is_empty())
        .or_else(|| block.and_then(|b| b.year.as_ref()).filter(|y| !y.is_empty()))
        .cloned()
        .unwrap_or_default();

    Extraction {
        shape,
        entries,
        metadata: DocumentMetadata { branch, month, year },
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Turn one source document into sale records.
///
/// Metadata only fills fields an entry leaves absent or null. Entries that
/// are not objects are skipped; mistyped fields inside an entry fall back to
/// their defaults.
pub fn normalize(file: &str, document: &Value) -> Vec<SaleRecord> {
    let extraction = extract(document);

    if extraction.shape == DocumentShape::Unrecognized {
        tracing::warn!("Source {} has neither data nor branches, skipping", file);
        return Vec::new();
    }

    let meta = &extraction.metadata;
    let injected = [
        ("branch", Value::String(meta.branch.clone())),
        ("month", Value::String(meta.month.clone())),
        ("year", serde_json::to_value(&meta.year).unwrap_or(Value::Null)),
    ];

    let mut records = Vec::with_capacity(extraction.entries.len());
    for (idx, entry) in extraction.entries.into_iter().enumerate() {
        let Value::Object(mut fields) = entry else {
            tracing::warn!("Source {} entry #{} is not an object, skipping", file, idx);
            continue;
        };

        for (key, value) in &injected {
            let absent = fields.get(*key).map_or(true, Value::is_null);
            if absent {
                fields.insert(key.to_string(), value.clone());
            }
        }

        match serde_json::from_value::<SaleRecord>(Value::Object(fields)) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!("Source {} entry #{} skipped: {}", file, idx, e),
        }
    }

    tracing::debug!(
        "Source {} ({:?}): {} records for {}",
        file,
        extraction.shape,
        records.len(),
        meta.branch
    );

    records
}
