use std::time::Instant;

use crate::error::LexiconError;
use crate::index::LexiconIndex;
use crate::parser;
use crate::results::{LoadReport, LoadStats};
use crate::traits::DatasetSource;

// ---------------------------------------------------------------------------
// LoadOptions
// ---------------------------------------------------------------------------

/// Load parameters passed from the builder to the engine.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LoadOptions {
    pub collect_rejections: bool,
}

// ---------------------------------------------------------------------------
// load()
// ---------------------------------------------------------------------------

/// Fetch, parse and build a complete snapshot.
///
/// Nothing is published here: the caller decides whether to swap the
/// returned index in. On `Err` the caller's current snapshot is untouched.
pub(crate) fn load(
    source: &dyn DatasetSource,
    opts: LoadOptions,
) -> Result<(LexiconIndex, LoadReport), LexiconError> {
    let start = Instant::now();
    let raw = source.fetch()?;
    tracing::debug!(source = %source.describe(), bytes = raw.len(), "fetched dataset");
    let (index, report) = load_text(&raw, opts, start)?;
    Ok((index, report))
}

/// Parse and build from text already in hand. `start` is when the load
/// began, so fetch time counts toward the reported duration.
pub(crate) fn load_text(
    raw: &str,
    opts: LoadOptions,
    start: Instant,
) -> Result<(LexiconIndex, LoadReport), LexiconError> {
    let parsed = parser::parse_lines(raw, opts.collect_rejections);

    if parsed.accepted == 0 {
        return Err(LexiconError::EmptyDataset { rejected: parsed.rejected });
    }

    let index = LexiconIndex::build(parsed.entries);
    let report = LoadReport {
        accepted:   parsed.accepted,
        rejected:   parsed.rejected,
        duplicates: index.duplicates(),
        entries:    index.len(),
        rejections: parsed.rejections,
        stats:      LoadStats::compute(parsed.lines, start.elapsed()),
    };

    Ok((index, report))
}
