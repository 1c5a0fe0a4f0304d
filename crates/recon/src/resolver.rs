//! Column Resolver: locate the (product, destination) columns of a source table.
//!
//! Strategies are tried in order. Each reports a tagged [`Outcome`]; only the
//! final `Result` leaves this module.

use crate::config::KeywordSets;
use crate::error::{MissingColumn, SchemaError};
use crate::model::{ProjectedRow, RawTable, SourceProjection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// Trust the source's fixed export layout.
    Positional,
    /// Search header labels for product/destination keywords.
    Keyword,
}

const STRATEGIES: [Strategy; 2] = [Strategy::Positional, Strategy::Keyword];

#[derive(Debug)]
enum Outcome {
    /// Key columns found at (product, destination).
    Resolved(usize, usize),
    /// Strategy does not apply to this table; try the next one.
    NotApplicable,
    Failed(MissingColumn),
}

/// Resolve with the default keyword sets.
pub fn resolve(
    table: &RawTable,
    primary_index: usize,
    secondary_index: usize,
    source_label: &str,
) -> Result<SourceProjection, SchemaError> {
    resolve_with(table, primary_index, secondary_index, source_label, &KeywordSets::default())
}

/// Project `table` onto its product and destination columns, renamed
/// `prod`/`dest`. Row order and cell content are unchanged.
pub fn resolve_with(
    table: &RawTable,
    primary_index: usize,
    secondary_index: usize,
    source_label: &str,
    keywords: &KeywordSets,
) -> Result<SourceProjection, SchemaError> {
    if table.is_empty() {
        return Err(SchemaError::EmptyInput {
            source: source_label.into(),
        });
    }

    for strategy in STRATEGIES {
        let outcome = match strategy {
            Strategy::Positional => by_position(table, primary_index, secondary_index),
            Strategy::Keyword => by_keyword(table, keywords),
        };

        match outcome {
            Outcome::Resolved(prod_col, dest_col) => {
                log::debug!(
                    "{source_label}: {strategy:?} strategy picked columns {prod_col} ({:?}) and {dest_col} ({:?})",
                    table.headers.get(prod_col).map(String::as_str).unwrap_or(""),
                    table.headers.get(dest_col).map(String::as_str).unwrap_or(""),
                );
                return Ok(project(table, prod_col, dest_col, source_label));
            }
            Outcome::NotApplicable => continue,
            Outcome::Failed(missing) => {
                log::debug!("{source_label}: {strategy:?} strategy found no {missing} column");
                return Err(SchemaError::NoMatch {
                    source: source_label.into(),
                    missing,
                });
            }
        }
    }

    Err(SchemaError::NoMatch {
        source: source_label.into(),
        missing: MissingColumn::Both,
    })
}

fn by_position(table: &RawTable, primary: usize, secondary: usize) -> Outcome {
    if table.column_count() > primary.max(secondary) {
        Outcome::Resolved(primary, secondary)
    } else {
        Outcome::NotApplicable
    }
}

fn by_keyword(table: &RawTable, keywords: &KeywordSets) -> Outcome {
    let prod_col = find_column(&table.headers, &keywords.product);
    let dest_col = find_column(&table.headers, &keywords.destination);

    match (prod_col, dest_col) {
        (Some(p), Some(d)) => Outcome::Resolved(p, d),
        (None, Some(_)) => Outcome::Failed(MissingColumn::Product),
        (Some(_), None) => Outcome::Failed(MissingColumn::Destination),
        (None, None) => Outcome::Failed(MissingColumn::Both),
    }
}

/// First header whose lowercased label contains any keyword.
fn find_column(headers: &[String], keywords: &[String]) -> Option<usize> {
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    headers.iter().position(|h| {
        let label = h.to_lowercase();
        keywords.iter().any(|k| label.contains(k.as_str()))
    })
}

fn project(table: &RawTable, prod_col: usize, dest_col: usize, label: &str) -> SourceProjection {
    let rows = (0..table.row_count())
        .map(|r| ProjectedRow {
            prod: table.cell(r, prod_col).clone(),
            dest: table.cell(r, dest_col).clone(),
        })
        .collect();

    SourceProjection {
        label: label.into(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| Cell::from(*c)).collect())
                .collect(),
        )
    }

    fn pair(prod: &str, dest: &str) -> (Cell, Cell) {
        (Cell::from(prod), Cell::from(dest))
    }

    fn pairs(p: &SourceProjection) -> Vec<(Cell, Cell)> {
        p.rows.iter().map(|r| (r.prod.clone(), r.dest.clone())).collect()
    }

    #[test]
    fn positional_when_columns_exist() {
        let t = table(
            &["Code", "Qty", "Dest"],
            &[&["A1", "3", "US"], &["B2", "1", "FR"]],
        );
        let p = resolve(&t, 0, 2, "CSP").unwrap();
        assert_eq!(p.label, "CSP");
        assert_eq!(
            pairs(&p),
            vec![pair("A1", "US"), pair("B2", "FR")]
        );
    }

    #[test]
    fn positional_ignores_header_labels() {
        // Labels would point elsewhere, but the known layout wins
        let t = table(&["sku", "country", "x"], &[&["1", "2", "3"]]);
        let p = resolve(&t, 2, 0, "CSP").unwrap();
        assert_eq!(pairs(&p), vec![pair("3", "1")]);
    }

    #[test]
    fn keyword_fallback_when_layout_too_narrow() {
        let t = table(
            &["Country Code", "Product ID"],
            &[&["US", "A"], &["FR", "B"]],
        );
        // Shipment layout expects six columns
        let p = resolve(&t, 0, 5, "Shipment").unwrap();
        assert_eq!(
            pairs(&p),
            vec![pair("A", "US"), pair("B", "FR")]
        );
    }

    #[test]
    fn keyword_match_is_case_insensitive_and_first_wins() {
        let t = table(
            &["Notes", "ITEM no", "SKU", "Location", "Destination"],
            &[&["n", "i", "s", "l", "d"]],
        );
        let p = resolve(&t, 0, 9, "RW").unwrap();
        assert_eq!(pairs(&p), vec![pair("i", "l")]);
    }

    #[test]
    fn no_match_when_neither_position_nor_keyword() {
        let t = table(&["alpha", "beta"], &[&["1", "2"]]);
        let err = resolve(&t, 0, 5, "Shipment").unwrap_err();
        assert_eq!(
            err,
            SchemaError::NoMatch {
                source: "Shipment".into(),
                missing: MissingColumn::Both,
            }
        );
    }

    #[test]
    fn no_match_reports_which_column_is_missing() {
        let t = table(&["product", "qty"], &[&["1", "2"]]);
        let err = resolve(&t, 0, 5, "Shipment").unwrap_err();
        assert!(matches!(
            err,
            SchemaError::NoMatch { missing: MissingColumn::Destination, .. }
        ));
    }

    #[test]
    fn empty_table_fails_before_any_search() {
        // Headers would satisfy either strategy; emptiness still wins
        let t = table(&["prod", "dest"], &[]);
        let err = resolve(&t, 0, 1, "RW").unwrap_err();
        assert_eq!(err, SchemaError::EmptyInput { source: "RW".into() });
        assert_eq!(err.to_string(), "RW: empty input");
    }

    #[test]
    fn short_rows_read_as_empty_cells() {
        let t = RawTable::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![vec![Cell::from("X")]],
        );
        let p = resolve(&t, 0, 2, "CSP").unwrap();
        assert_eq!(pairs(&p), vec![(Cell::from("X"), Cell::Empty)]);
    }

    #[test]
    fn cells_are_not_trimmed_or_deduplicated() {
        let t = table(&["p", "d"], &[&[" A ", "US"], &[" A ", "US"]]);
        let p = resolve(&t, 0, 1, "RW").unwrap();
        assert_eq!(p.rows.len(), 2);
        assert_eq!(p.rows[0].prod, Cell::from(" A "));
    }

    #[test]
    fn custom_keywords() {
        let t = table(&["Part", "Region"], &[&["P1", "EU"]]);
        let keywords = KeywordSets {
            product: vec!["PART".into()],
            destination: vec!["region".into()],
        };
        let p = resolve_with(&t, 3, 4, "CSP", &keywords).unwrap();
        assert_eq!(pairs(&p), vec![pair("P1", "EU")]);
        assert!(resolve(&t, 3, 4, "CSP").is_err());
    }
}
