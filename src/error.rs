use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort an analysis run. There is no retry and no
/// partial result; whichever stage hits one of these surfaces it straight
/// to the caller.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("failed to parse {}: {}", path.display(), source)]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("unrecognized timestamp '{0}'")]
    BadTimestamp(String),
    #[error("no column named '{column}'")]
    InvalidColumn { column: String },
    #[error("unsupported statistic '{name}'")]
    InvalidStatistic { name: String },
    #[error("no rows left to analyze")]
    EmptyInput,
    #[error("failed to write chart spec: {0}")]
    ChartEncode(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}
