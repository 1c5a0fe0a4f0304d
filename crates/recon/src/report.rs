//! Report sheet layout: column order, widths and the missing-from-Shipment highlight.

use crate::config::OutputConfig;
use crate::model::{HighlightRule, ReconciledRow, ReconciledTable, ReportLayout};

/// Output columns, in order.
pub const COLUMNS: [&str; 5] = ["prod", "dest", "In_Shipment", "In_RW", "In_CSP"];

/// Column whose `FALSE` value triggers the highlight.
pub const HIGHLIGHT_KEY_COLUMN: usize = 2;

/// Display text of each output cell, in column order.
pub fn row_cells(row: &ReconciledRow) -> [String; 5] {
    [
        row.prod.clone(),
        row.dest.clone(),
        bool_text(row.in_shipment).to_string(),
        bool_text(row.in_rw).to_string(),
        bool_text(row.in_csp).to_string(),
    ]
}

fn bool_text(b: bool) -> &'static str {
    if b {
        "TRUE"
    } else {
        "FALSE"
    }
}

/// Compute column widths and the highlight rule for `table`.
pub fn build_layout(table: &ReconciledTable, output: &OutputConfig) -> ReportLayout {
    let mut widths: Vec<usize> = COLUMNS.iter().map(|h| h.chars().count()).collect();
    for row in table {
        for (i, cell) in row_cells(row).iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }
    let column_widths = widths.into_iter().map(|w| w + output.column_padding).collect();

    // Header sits in row 0; data rows are 1..=N
    let highlight = if table.is_empty() {
        None
    } else {
        Some(HighlightRule {
            first_row: 1,
            first_col: 0,
            last_row: table.len() as u32,
            last_col: (COLUMNS.len() - 1) as u16,
            criteria: format!("=${}2=FALSE", col_to_letter(HIGHLIGHT_KEY_COLUMN)),
            fill_color: output.highlight_color.clone(),
        })
    };

    ReportLayout {
        sheet_name: output.sheet_name.clone(),
        columns: COLUMNS.iter().map(|c| c.to_string()).collect(),
        column_widths,
        highlight,
    }
}

/// Convert column index to spreadsheet column letter (0 = A, 25 = Z, 26 = AA, etc.)
pub fn col_to_letter(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProjectedRow, Source, SourceProjection};
    use crate::reconcile::reconcile;

    fn proj(rows: &[(&str, &str)]) -> SourceProjection {
        SourceProjection {
            label: String::new(),
            rows: rows
                .iter()
                .map(|(p, d)| ProjectedRow { prod: (*p).into(), dest: (*d).into() })
                .collect(),
        }
    }

    #[test]
    fn widths_are_longest_text_plus_padding() {
        let table = reconcile([
            (Source::Shipment, proj(&[("A", "US")])),
            (Source::Rw, proj(&[("LONG-PRODUCT-CODE", "Netherlands")])),
            (Source::Csp, proj(&[])),
        ]);
        let layout = build_layout(&table, &OutputConfig::default());
        // prod: 17 chars, dest: 11 chars, flags: header wins over TRUE/FALSE
        assert_eq!(layout.column_widths, vec![19, 13, 13, 7, 8]);
        assert_eq!(layout.columns, COLUMNS.to_vec());
        assert_eq!(layout.sheet_name, "Cross_Check_Result");
    }

    #[test]
    fn short_values_fall_back_to_header_width() {
        let table = reconcile([
            (Source::Shipment, proj(&[("A", "B")])),
            (Source::Rw, proj(&[])),
            (Source::Csp, proj(&[])),
        ]);
        let output = OutputConfig { column_padding: 0, ..Default::default() };
        let layout = build_layout(&table, &output);
        assert_eq!(layout.column_widths, vec![4, 4, 11, 5, 6]);
    }

    #[test]
    fn width_counts_characters_not_bytes() {
        let table = reconcile([
            (Source::Shipment, proj(&[("Überseeprodukt", "Côte d'Ivoire")])),
            (Source::Rw, proj(&[])),
            (Source::Csp, proj(&[])),
        ]);
        let layout = build_layout(&table, &OutputConfig::default());
        assert_eq!(layout.column_widths[0], 16);
        assert_eq!(layout.column_widths[1], 15);
    }

    #[test]
    fn highlight_covers_all_data_rows_and_columns() {
        let table = reconcile([
            (Source::Shipment, proj(&[("A", "US")])),
            (Source::Rw, proj(&[("B", "FR"), ("C", "DE")])),
            (Source::Csp, proj(&[])),
        ]);
        let layout = build_layout(&table, &OutputConfig::default());
        let rule = layout.highlight.unwrap();
        assert_eq!((rule.first_row, rule.first_col), (1, 0));
        assert_eq!((rule.last_row, rule.last_col), (3, 4));
        assert_eq!(rule.criteria, "=$C2=FALSE");
        assert_eq!(rule.fill_color, "#FFFF00");
    }

    #[test]
    fn no_highlight_without_rows() {
        let table = reconcile([
            (Source::Shipment, proj(&[])),
            (Source::Rw, proj(&[])),
            (Source::Csp, proj(&[])),
        ]);
        assert!(build_layout(&table, &OutputConfig::default()).highlight.is_none());
    }

    #[test]
    fn column_letters() {
        assert_eq!(col_to_letter(0), "A");
        assert_eq!(col_to_letter(2), "C");
        assert_eq!(col_to_letter(25), "Z");
        assert_eq!(col_to_letter(26), "AA");
        assert_eq!(col_to_letter(701), "ZZ");
    }
}
