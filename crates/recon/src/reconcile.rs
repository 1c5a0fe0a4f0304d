//! Three-way presence merge.
//!
//! Each source is folded into a `key -> Presence` map. A key missing from a
//! source simply never gets that source's flag set, so absence is always
//! `false`, never unknown. The fixed three-column output is built separately
//! from the fold.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::model::{ReconciledRow, ReconciledTable, Source, SourceProjection};
use crate::normalize::normalize_cell;

/// Normalized `(prod, dest)` key.
pub type Key = (String, String);

const SOURCE_COUNT: usize = Source::ALL.len();

/// Which sources a key has been seen in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presence([bool; SOURCE_COUNT]);

impl Presence {
    pub fn mark(&mut self, source: Source) {
        self.0[source.index()] = true;
    }

    pub fn contains(&self, source: Source) -> bool {
        self.0[source.index()]
    }
}

/// Trim both key columns and collapse duplicate keys.
pub fn normalize_projection(projection: &SourceProjection) -> BTreeSet<Key> {
    projection
        .rows
        .iter()
        .map(|row| (normalize_cell(&row.prod), normalize_cell(&row.dest)))
        .collect()
}

/// Full outer join of one more source into the accumulated presence map.
pub fn merge_source(
    mut acc: BTreeMap<Key, Presence>,
    source: Source,
    projection: &SourceProjection,
) -> BTreeMap<Key, Presence> {
    let keys = normalize_projection(projection);
    log::debug!(
        "{}: {} rows, {} distinct keys",
        source.label(),
        projection.rows.len(),
        keys.len()
    );
    for key in keys {
        acc.entry(key).or_default().mark(source);
    }
    acc
}

/// Reconcile three tagged projections into a sorted presence matrix.
///
/// Flags are assigned by the source tag, so any ordering of the three
/// inputs yields the same table.
pub fn reconcile(sources: [(Source, SourceProjection); 3]) -> ReconciledTable {
    let merged = sources
        .iter()
        .fold(BTreeMap::new(), |acc, (source, projection)| {
            merge_source(acc, *source, projection)
        });

    let mut rows: Vec<ReconciledRow> = merged
        .into_iter()
        .map(|((prod, dest), presence)| ReconciledRow {
            prod,
            dest,
            in_shipment: presence.contains(Source::Shipment),
            in_rw: presence.contains(Source::Rw),
            in_csp: presence.contains(Source::Csp),
        })
        .collect();

    rows.sort_by(report_order);
    ReconciledTable::from_sorted(rows)
}

/// Rows missing from Shipment first, then by `prod`, then `dest`.
pub fn report_order(a: &ReconciledRow, b: &ReconciledRow) -> Ordering {
    a.in_shipment
        .cmp(&b.in_shipment)
        .then_with(|| a.prod.cmp(&b.prod))
        .then_with(|| a.dest.cmp(&b.dest))
}
