//! Batch generation: row decoding, orchestration over many rows, and result packaging.

pub(crate) mod orchestrator;
pub(crate) mod package;
pub(crate) mod rows;

pub use orchestrator::{
    BatchContext, BatchOpts, BatchProgress, BatchResult, CancelToken, FailureKind, RowFailure,
    RowOutcome, RowReport, run_batch,
};
pub use package::{
    BatchReport, ReportRow, RowStatus, write_dir, write_zip, write_zip_file, zip_bytes,
};
pub use rows::{
    RowRecord, read_csv, read_json, read_rows_from_path, read_xlsx, sample_csv, validate_row_id,
};
