use crate::config::CrossCheckConfig;
use crate::error::{ReportError, SchemaError};
use crate::model::{CrossCheckResult, RawTable, ReconMeta, Source, SourceCounts};
use crate::reconcile::reconcile;
use crate::report::build_layout;
use crate::resolver::resolve_with;
use crate::summary::compute_summary;

/// The three loaded source tables of one report request.
pub struct CrossCheckInput {
    pub shipment: RawTable,
    pub rw: RawTable,
    pub csp: RawTable,
}

impl CrossCheckInput {
    pub fn table(&self, source: Source) -> &RawTable {
        match source {
            Source::Shipment => &self.shipment,
            Source::Rw => &self.rw,
            Source::Csp => &self.csp,
        }
    }
}

/// Resolve all three sources, then reconcile.
///
/// Every source is resolved even after one fails so the caller can report
/// each failing source at once. Any failure aborts the run: no partial
/// report is produced.
pub fn run(config: &CrossCheckConfig, input: &CrossCheckInput) -> Result<CrossCheckResult, ReportError> {
    let mut rows_read = SourceCounts::default();

    let [shipment, rw, csp] = Source::ALL.map(|source| {
        let table = input.table(source);
        let (prod_col, dest_col) = config.sources.get(source).columns(source);
        rows_read.set(source, table.row_count());

        resolve_with(table, prod_col, dest_col, source.label(), &config.keywords)
            .map(|projection| (source, projection))
            .inspect_err(|e| log::warn!("{e}"))
    });

    let sources = match (shipment, rw, csp) {
        (Ok(a), Ok(b), Ok(c)) => [a, b, c],
        (a, b, c) => {
            let failures: Vec<SchemaError> = [a.err(), b.err(), c.err()].into_iter().flatten().collect();
            return Err(ReportError { failures });
        }
    };

    let table = reconcile(sources);
    let summary = compute_summary(&table);
    let layout = build_layout(&table, &config.output);

    log::info!(
        "cross-check complete: {} rows, {} missing from Shipment",
        summary.total_rows,
        summary.missing_from_shipment
    );

    Ok(CrossCheckResult {
        meta: ReconMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            rows_read,
        },
        summary,
        rows: table,
        layout,
    })
}
