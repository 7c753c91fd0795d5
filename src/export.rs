use crate::results::DomainResult;
use chrono::Local;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

/// Errors raised while writing result rows
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Column order for exported rows
const CSV_HEADERS: &[&str] = &[
    "domain",
    "partner_program_url",
    "url_path",
    "program_types",
    "partner_names",
    "page_structure",
    "status",
    "timestamp",
    "subpages",
];

/// Writes domain results to a CSV file, one row per seed
///
/// Rows are stamped at export time. The two keyword sets are flattened to
/// `; `-joined lists; subpage findings are serialized as JSON.
pub struct CsvExporter {
    writer: csv::Writer<File>,
}

impl CsvExporter {
    /// Creates the output file and writes the header row
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(CSV_HEADERS)?;
        writer.flush()?;
        Ok(Self { writer })
    }

    /// Appends a single result
    pub fn export_result(&mut self, result: &DomainResult) -> Result<(), ExportError> {
        let timestamp = Local::now().to_rfc3339();
        self.write_row(result, &timestamp)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Appends a batch of results sharing one export timestamp
    pub fn export_batch(&mut self, results: &[DomainResult]) -> Result<(), ExportError> {
        let timestamp = Local::now().to_rfc3339();
        for result in results {
            self.write_row(result, &timestamp)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn write_row(&mut self, result: &DomainResult, timestamp: &str) -> Result<(), ExportError> {
        let program_types = join_set(&result.program_types);
        let partner_names = join_set(&result.partner_names);
        let subpages = serde_json::to_string(&result.subpages)?;

        self.writer.write_record([
            result.domain.as_str(),
            result.partner_program_url.as_str(),
            result.url_path.as_str(),
            program_types.as_str(),
            partner_names.as_str(),
            result.page_structure.as_str(),
            result.status.to_string().as_str(),
            timestamp,
            subpages.as_str(),
        ])?;
        Ok(())
    }
}

/// Flattens a set to a delimited list
fn join_set(values: &BTreeSet<String>) -> String {
    values.iter().cloned().collect::<Vec<_>>().join("; ")
}
