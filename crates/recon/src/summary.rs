use crate::model::{ReconSummary, ReconciledTable, Source};

/// Count rows missing from each source and rows seen everywhere.
pub fn compute_summary(table: &ReconciledTable) -> ReconSummary {
    let mut summary = ReconSummary {
        total_rows: table.len(),
        ..Default::default()
    };

    for row in table {
        if !row.in_shipment {
            summary.missing_from_shipment += 1;
        }
        if !row.in_rw {
            summary.missing_from_rw += 1;
        }
        if !row.in_csp {
            summary.missing_from_csp += 1;
        }
        if Source::ALL.iter().all(|s| row.is_in(*s)) {
            summary.in_all_sources += 1;
        }
    }

    summary
}
