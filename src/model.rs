use serde::Serialize;

/// One synthetic row for the write test.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: String,
}

/// Elapsed milliseconds per backend for one measured operation.
///
/// Fields stay unset until the phase has run, so an untouched phase
/// serializes as `{}`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendTimings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neon: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turso: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteTestResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neon: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turso: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neon_avg_per_row: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turso_avg_per_row: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadTestResults {
    pub simple_query: BackendTimings,
    pub filter_query: BackendTimings,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub record_count: u64,
}

/// The accumulated results document, serialized once per run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResults {
    pub timestamp: String,
    pub configuration: Configuration,
    pub cold_start: BackendTimings,
    pub write_test: WriteTestResults,
    pub read_test: ReadTestResults,
}

impl BenchmarkResults {
    pub fn new(timestamp: String, record_count: u64) -> Self {
        Self {
            timestamp,
            configuration: Configuration { record_count },
            cold_start: BackendTimings::default(),
            write_test: WriteTestResults::default(),
            read_test: ReadTestResults::default(),
        }
    }
}
