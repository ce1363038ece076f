use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use rayon::prelude::*;

use crate::batch::rows::{RowRecord, validate_row_id};
use crate::foundation::error::ThumbError;
use crate::render::RenderBackend;
use crate::render::pipeline::{
    RenderThreading, build_thread_pool, normalized_chunk_size, render_thumbnail,
};
use crate::scene::{Decorations, LayoutComposer};
use crate::theme::{Theme, resolve};

/// Cooperative cancellation flag shared between the caller and a running batch.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Which error family failed a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InvalidRow,
    InvalidColor,
    InvalidThemeField,
    UnknownPreset,
    Render,
    Other,
}

impl From<&ThumbError> for FailureKind {
    fn from(e: &ThumbError) -> Self {
        match e {
            ThumbError::InvalidRow(_) => Self::InvalidRow,
            ThumbError::InvalidColor(_) => Self::InvalidColor,
            ThumbError::InvalidThemeField { .. } => Self::InvalidThemeField,
            ThumbError::UnknownPreset(_) => Self::UnknownPreset,
            ThumbError::Render(_) => Self::Render,
            _ => Self::Other,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RowFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<ThumbError> for RowFailure {
    fn from(e: ThumbError) -> Self {
        Self {
            kind: FailureKind::from(&e),
            message: e.to_string(),
        }
    }
}

/// Result for one input row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowOutcome {
    /// Encoded PNG bytes.
    Rendered(Vec<u8>),
    /// Row intentionally not rendered (e.g. missing title); not an error.
    Skipped(String),
    Failed(RowFailure),
}

impl RowOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowReport {
    pub index: usize,
    pub id: String,
    pub outcome: RowOutcome,
}

/// Rows with a recorded outcome so far, out of `total`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchProgress {
    pub processed: usize,
    pub total: usize,
}

/// Per-row outcomes in input order.
///
/// When the batch was cancelled, rows that never started are absent from `rows`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub total: usize,
    pub rows: Vec<RowReport>,
    pub cancelled: bool,
}

impl BatchResult {
    pub fn rendered_count(&self) -> usize {
        self.rows.iter().filter(|r| r.outcome.is_rendered()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r.outcome, RowOutcome::Skipped(_)))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r.outcome, RowOutcome::Failed(_)))
            .count()
    }

    /// Outcome of the first row carrying `id`.
    pub fn outcome(&self, id: &str) -> Option<&RowOutcome> {
        self.rows.iter().find(|r| r.id == id).map(|r| &r.outcome)
    }

    /// Rendered rows as `(file name, png)` in input order.
    pub fn rendered(&self) -> impl Iterator<Item = (String, &[u8])> {
        self.rows.iter().filter_map(|r| match &r.outcome {
            RowOutcome::Rendered(png) => Some((format!("{}.png", r.id), png.as_slice())),
            _ => None,
        })
    }
}

/// Shared, read-only inputs of every row render.
#[derive(Clone, Copy, Debug)]
pub struct BatchContext<'a> {
    pub composer: &'a LayoutComposer,
    pub decorations: Decorations<'a>,
}

#[derive(Default)]
pub struct BatchOpts<'a> {
    pub threading: RenderThreading,
    pub cancel: Option<CancelToken>,
    /// Called after each recorded outcome, while the result collector is locked.
    pub progress: Option<&'a (dyn Fn(BatchProgress) + Sync)>,
}

struct Collector<'a> {
    outcomes: Vec<Option<RowOutcome>>,
    processed: usize,
    progress: Option<&'a (dyn Fn(BatchProgress) + Sync)>,
}

impl Collector<'_> {
    fn record(&mut self, index: usize, outcome: RowOutcome) {
        let slot = &mut self.outcomes[index];
        if slot.is_some() {
            return;
        }
        *slot = Some(outcome);
        self.processed += 1;
        if let Some(cb) = self.progress {
            cb(BatchProgress {
                processed: self.processed,
                total: self.outcomes.len(),
            });
        }
    }
}

fn record(collector: &Mutex<Collector<'_>>, row: &RowRecord, outcome: RowOutcome) {
    match &outcome {
        RowOutcome::Rendered(png) => {
            tracing::debug!(index = row.index, id = %row.id, bytes = png.len(), "row rendered");
        }
        RowOutcome::Skipped(reason) => {
            tracing::debug!(index = row.index, id = %row.id, reason = %reason, "row skipped");
        }
        RowOutcome::Failed(f) => {
            tracing::warn!(
                index = row.index,
                id = %row.id,
                kind = ?f.kind,
                "row failed: {}",
                f.message
            );
        }
    }
    let mut guard = collector
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    guard.record(row.index, outcome);
}

/// What to do with a row once the cheap checks have run.
enum Plan {
    Decided(RowOutcome),
    Render(Theme),
}

/// Decide every row that cannot be rendered, and resolve the theme of every row that can.
///
/// Checks run in input order: title, id safety, theme, then uniqueness. An id is claimed only
/// by a row that passed the earlier checks, so a broken row never shadows a later valid row
/// with the same id.
fn precheck(rows: &[RowRecord]) -> Vec<Option<Plan>> {
    let mut seen = HashSet::new();
    rows.iter()
        .map(|row| {
            if row.title.trim().is_empty() {
                return Some(Plan::Decided(RowOutcome::Skipped("missing title".to_string())));
            }
            if let Err(e) = validate_row_id(&row.id) {
                return Some(Plan::Decided(RowOutcome::Failed(e.into())));
            }
            let theme = match resolve(&row.overrides, row.preset.as_deref()) {
                Ok(theme) => theme,
                Err(e) => return Some(Plan::Decided(RowOutcome::Failed(e.into()))),
            };
            if !seen.insert(row.id.as_str()) {
                return Some(Plan::Decided(RowOutcome::Failed(
                    ThumbError::invalid_row(format!("duplicate id \"{}\"", row.id)).into(),
                )));
            }
            Some(Plan::Render(theme))
        })
        .collect()
}

fn render_row(
    row: &RowRecord,
    theme: &Theme,
    ctx: &BatchContext<'_>,
    backend: &mut dyn RenderBackend,
) -> RowOutcome {
    match render_thumbnail(&row.title, theme, ctx.composer, &ctx.decorations, backend) {
        Ok(png) => RowOutcome::Rendered(png),
        Err(e) => RowOutcome::Failed(e.into()),
    }
}

/// Render every row and collect the outcomes.
///
/// Per-row problems never abort the batch; they become [`RowOutcome::Skipped`] or
/// [`RowOutcome::Failed`]. Rows are re-indexed by position in `rows`. With
/// `threading.parallel`, rows are rendered on a bounded rayon pool with one backend fork per
/// worker; the result is still in input order.
#[tracing::instrument(skip_all, fields(rows = rows.len(), parallel = opts.threading.parallel))]
pub fn run_batch(
    rows: &[RowRecord],
    backend: &mut dyn RenderBackend,
    ctx: &BatchContext<'_>,
    opts: &BatchOpts<'_>,
) -> BatchResult {
    let rows: Vec<RowRecord> = rows
        .iter()
        .enumerate()
        .map(|(index, r)| RowRecord {
            index,
            ..r.clone()
        })
        .collect();
    let total = rows.len();
    let mut plans = precheck(&rows);
    let collector = Mutex::new(Collector {
        outcomes: vec![None; total],
        processed: 0,
        progress: opts.progress,
    });
    let is_cancelled = || opts.cancel.as_ref().is_some_and(CancelToken::is_cancelled);

    let chunk_size = normalized_chunk_size(opts.threading.chunk_size);
    let pool = if opts.threading.parallel {
        match build_thread_pool(opts.threading.threads) {
            Ok(pool) => Some(pool),
            Err(e) => {
                tracing::warn!("falling back to sequential rendering: {e}");
                None
            }
        }
    } else {
        None
    };

    let proto = Mutex::new(backend);

    'chunks: for (chunk_idx, chunk) in rows.chunks(chunk_size).enumerate() {
        let base = chunk_idx * chunk_size;
        let mut pending = Vec::with_capacity(chunk.len());
        for (offset, row) in chunk.iter().enumerate() {
            if is_cancelled() {
                break 'chunks;
            }
            match plans[base + offset].take() {
                Some(Plan::Decided(outcome)) => record(&collector, row, outcome),
                Some(Plan::Render(theme)) if pool.is_some() => pending.push((row, theme)),
                Some(Plan::Render(theme)) => {
                    let mut guard = proto
                        .lock()
                        .unwrap_or_else(std::sync::PoisonError::into_inner);
                    let outcome = render_row(row, &theme, ctx, &mut **guard);
                    drop(guard);
                    record(&collector, row, outcome);
                }
                None => {}
            }
        }

        if let Some(pool) = &pool
            && !pending.is_empty()
        {
            pool.install(|| {
                pending.par_iter().for_each_init(
                    || {
                        proto
                            .lock()
                            .unwrap_or_else(std::sync::PoisonError::into_inner)
                            .fork()
                    },
                    |worker, (row, theme)| {
                        if is_cancelled() {
                            return;
                        }
                        let outcome = match worker {
                            Ok(b) => render_row(row, theme, ctx, b.as_mut()),
                            Err(e) => RowOutcome::Failed(RowFailure {
                                kind: FailureKind::from(&*e),
                                message: e.to_string(),
                            }),
                        };
                        record(&collector, row, outcome);
                    },
                );
            });
        }
    }

    let collector = collector
        .into_inner()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    let reports: Vec<RowReport> = rows
        .iter()
        .zip(collector.outcomes)
        .filter_map(|(row, outcome)| {
            outcome.map(|outcome| RowReport {
                index: row.index,
                id: row.id.clone(),
                outcome,
            })
        })
        .collect();

    let result = BatchResult {
        total,
        cancelled: reports.len() < total,
        rows: reports,
    };
    tracing::info!(
        total,
        rendered = result.rendered_count(),
        skipped = result.skipped_count(),
        failed = result.failed_count(),
        cancelled = result.cancelled,
        "batch finished"
    );
    result
}

#[cfg(test)]
#[path = "../../tests/unit/batch/orchestrator.rs"]
mod tests;
