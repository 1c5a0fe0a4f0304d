// Property-based tests for the presence merge.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::HashSet;

use proptest::prelude::*;
use crosscheck_recon::model::{Cell, ProjectedRow, ReconciledTable, Source, SourceProjection};
use crosscheck_recon::normalize::{normalize_cell, normalize_key};
use crosscheck_recon::reconcile::reconcile;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Small alphabet so keys collide across sources, with optional padding.
fn arb_text() -> impl Strategy<Value = String> {
    (r"[ ]{0,2}", r"[ABC1]{0,2}", r"[ \t]{0,2}").prop_map(|(l, core, r)| format!("{l}{core}{r}"))
}

/// Mostly text, sometimes a number that should match its text form.
fn arb_cell() -> impl Strategy<Value = Cell> {
    prop_oneof![
        4 => arb_text().prop_map(Cell::Text),
        1 => (0i64..3).prop_map(Cell::Int),
        1 => (0i64..3).prop_map(|n| Cell::Float(n as f64)),
    ]
}

fn arb_projection() -> impl Strategy<Value = SourceProjection> {
    prop::collection::vec((arb_cell(), arb_cell()), 0..12).prop_map(|rows| SourceProjection {
        label: String::new(),
        rows: rows
            .into_iter()
            .map(|(prod, dest)| ProjectedRow { prod, dest })
            .collect(),
    })
}

fn keys_of(p: &SourceProjection) -> HashSet<(String, String)> {
    p.rows
        .iter()
        .map(|r| (normalize_cell(&r.prod), normalize_cell(&r.dest)))
        .collect()
}

fn run(ship: &SourceProjection, rw: &SourceProjection, csp: &SourceProjection) -> ReconciledTable {
    reconcile([
        (Source::Shipment, ship.clone()),
        (Source::Rw, rw.clone()),
        (Source::Csp, csp.clone()),
    ])
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn every_row_is_seen_somewhere(
        ship in arb_projection(),
        rw in arb_projection(),
        csp in arb_projection(),
    ) {
        let table = run(&ship, &rw, &csp);
        for row in &table {
            prop_assert!(row.in_shipment || row.in_rw || row.in_csp);
        }
    }

    #[test]
    fn keys_are_unique(
        ship in arb_projection(),
        rw in arb_projection(),
        csp in arb_projection(),
    ) {
        let table = run(&ship, &rw, &csp);
        let keys: HashSet<(&str, &str)> =
            table.iter().map(|r| (r.prod.as_str(), r.dest.as_str())).collect();
        prop_assert_eq!(keys.len(), table.len());
    }

    #[test]
    fn flags_match_source_membership(
        ship in arb_projection(),
        rw in arb_projection(),
        csp in arb_projection(),
    ) {
        let table = run(&ship, &rw, &csp);
        let (sk, rk, ck) = (keys_of(&ship), keys_of(&rw), keys_of(&csp));

        let union: HashSet<_> = sk.iter().chain(&rk).chain(&ck).cloned().collect();
        prop_assert_eq!(table.len(), union.len());

        for row in &table {
            let key = (row.prod.clone(), row.dest.clone());
            prop_assert_eq!(row.in_shipment, sk.contains(&key));
            prop_assert_eq!(row.in_rw, rk.contains(&key));
            prop_assert_eq!(row.in_csp, ck.contains(&key));
        }
    }

    #[test]
    fn input_order_does_not_matter(
        ship in arb_projection(),
        rw in arb_projection(),
        csp in arb_projection(),
    ) {
        let forward = run(&ship, &rw, &csp);
        let permuted = [
            [(Source::Rw, rw.clone()), (Source::Shipment, ship.clone()), (Source::Csp, csp.clone())],
            [(Source::Csp, csp.clone()), (Source::Rw, rw.clone()), (Source::Shipment, ship.clone())],
            [(Source::Shipment, ship.clone()), (Source::Csp, csp.clone()), (Source::Rw, rw.clone())],
        ];
        for sources in permuted {
            prop_assert_eq!(&reconcile(sources), &forward);
        }
    }

    #[test]
    fn missing_from_shipment_first_then_prod_ascending(
        ship in arb_projection(),
        rw in arb_projection(),
        csp in arb_projection(),
    ) {
        let table = run(&ship, &rw, &csp);
        for pair in table.rows().windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.in_shipment <= b.in_shipment);
            if a.in_shipment == b.in_shipment {
                prop_assert!(a.prod <= b.prod);
            }
        }
    }

    #[test]
    fn normalization_is_idempotent(raw in arb_text()) {
        let once = normalize_key(&raw);
        prop_assert_eq!(normalize_key(&once), once.clone());
        prop_assert_eq!(normalize_cell(&Cell::Text(once.clone())), once);
    }

    #[test]
    fn renormalizing_output_is_stable(
        ship in arb_projection(),
        rw in arb_projection(),
        csp in arb_projection(),
    ) {
        let table = run(&ship, &rw, &csp);
        let again = SourceProjection {
            label: String::new(),
            rows: table
                .iter()
                .map(|r| ProjectedRow { prod: r.prod.as_str().into(), dest: r.dest.as_str().into() })
                .collect(),
        };
        let keys = keys_of(&again);
        for row in &table {
            prop_assert!(keys.contains(&(row.prod.clone(), row.dest.clone())));
        }
        prop_assert_eq!(keys.len(), table.len());
    }
}
