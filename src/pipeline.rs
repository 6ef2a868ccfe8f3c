use std::path::Path;

use tracing::{debug, info};

use crate::aggregate::Summary;
use crate::config::InputConfig;
use crate::error::{AppError, Result};
use crate::ingest::InputFormat;
use crate::output::IngestCounts;
use crate::validator::Strictness;

/// Everything the shell needs to render a report for one file
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub format: InputFormat,
    pub summary: Summary,
    pub counts: IngestCounts,
}

/// Detect the format, ingest, and aggregate one input file.
///
/// In strict mode an empty validated collection is an error; in lenient mode
/// the empty summary is returned as-is.
pub fn run(path: &Path, config: &InputConfig) -> Result<Report> {
    let format = InputFormat::detect(path).ok_or_else(|| AppError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let ingestor = format.ingestor(config);
    info!(
        file = %path.display(),
        format = ingestor.format_name(),
        "Ingesting employee records"
    );

    let ingested = ingestor.ingest(path)?;
    let counts = IngestCounts {
        accepted: ingested.records.len(),
        rejected: ingested.rejections.len(),
    };
    debug!(
        accepted = counts.accepted,
        rejected = counts.rejected,
        "Ingestion finished"
    );

    if ingested.records.is_empty() && config.strictness == Strictness::Strict {
        return Err(AppError::NoRecords {
            path: path.to_path_buf(),
        });
    }

    Ok(Report {
        format,
        summary: Summary::compute(&ingested.records),
        counts,
    })
}
