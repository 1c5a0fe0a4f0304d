//! Key normalization: every cell becomes trimmed text before comparison.

use chrono::Timelike;

use crate::model::Cell;

/// Render a cell as text.
///
/// Integral floats drop their fractional part so a product code stored as
/// the number `123` compares equal to the text `"123"`.
pub fn cell_to_text(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Text(s) => s.clone(),
        Cell::Int(n) => n.to_string(),
        Cell::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Cell::Bool(true) => "TRUE".to_string(),
        Cell::Bool(false) => "FALSE".to_string(),
        Cell::DateTime(dt) => {
            if dt.time().num_seconds_from_midnight() == 0 && dt.time().nanosecond() == 0 {
                dt.format("%Y-%m-%d").to_string()
            } else {
                dt.format("%Y-%m-%d %H:%M:%S").to_string()
            }
        }
    }
}

/// Trim leading/trailing whitespace. Idempotent; case is preserved.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_string()
}

/// Coerce a cell to text and trim it.
pub fn normalize_cell(cell: &Cell) -> String {
    normalize_key(&cell_to_text(cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn numbers_render_without_spurious_decimals() {
        assert_eq!(cell_to_text(&Cell::Float(123.0)), "123");
        assert_eq!(cell_to_text(&Cell::Float(-7.0)), "-7");
        assert_eq!(cell_to_text(&Cell::Float(12.5)), "12.5");
        assert_eq!(cell_to_text(&Cell::Int(42)), "42");
    }

    #[test]
    fn numeric_and_text_codes_normalize_equal() {
        assert_eq!(normalize_cell(&Cell::Float(123.0)), normalize_cell(&" 123 ".into()));
        assert_eq!(normalize_cell(&Cell::Int(123)), normalize_cell(&"123".into()));
    }

    #[test]
    fn trims_but_keeps_case() {
        assert_eq!(normalize_key("  Abc\t"), "Abc");
        assert_eq!(normalize_key("\u{a0}US\n"), "US");
        assert_ne!(normalize_key("abc"), normalize_key("ABC"));
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["  x  ", "x", "", "   ", " a b "] {
            let once = normalize_key(raw);
            assert_eq!(normalize_key(&once), once);
        }
    }

    #[test]
    fn empty_bool_and_dates() {
        assert_eq!(cell_to_text(&Cell::Empty), "");
        assert_eq!(cell_to_text(&Cell::Bool(true)), "TRUE");

        let midnight = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(cell_to_text(&Cell::DateTime(midnight)), "2024-03-09");

        let afternoon = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(14, 5, 0).unwrap();
        assert_eq!(cell_to_text(&Cell::DateTime(afternoon)), "2024-03-09 14:05:00");
    }
}
