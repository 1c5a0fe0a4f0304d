// Excel file import (xlsx, xls, xlsb, ods) and report export (xlsx only)
//
// Import: one sheet becomes a RawTable. First non-empty row is the header.
// Export: the reconciled table plus its layout (widths, highlight rule).

use std::path::Path;
use std::time::Instant;

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_xlsxwriter::{Color, ConditionalFormatFormula, Format, FormatBorder, Workbook as XlsxWorkbook};

use crosscheck_recon::config::parse_hex_color;
use crosscheck_recon::model::{Cell, RawTable, ReconciledTable, ReportLayout};
use crosscheck_recon::normalize::cell_to_text;
use crosscheck_recon::report::col_to_letter;

/// Maximum number of cells to import (prevents DoS from huge files)
const MAX_CELLS: usize = 5_000_000;

// ============================================================================
// Import
// ============================================================================

/// Import one sheet of an Excel file (xlsx, xls, xlsb, ods).
///
/// `sheet` selects a sheet by name; `None` takes the first sheet.
pub fn import(path: &Path, sheet: Option<&str>) -> Result<RawTable, String> {
    let start_time = Instant::now();

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open Excel file: {}", e))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let sheet_name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|s| s.as_str() == name)
            .cloned()
            .ok_or_else(|| {
                format!(
                    "Sheet '{}' not found (available: {})",
                    name,
                    sheet_names.join(", ")
                )
            })?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| "Excel file contains no sheets".to_string())?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| format!("Failed to read sheet '{}': {}", sheet_name, e))?;

    let table = range_to_table(&range)?;

    log::debug!(
        "{}: sheet '{}' imported {} rows x {} columns in {} ms",
        path.display(),
        sheet_name,
        table.row_count(),
        table.column_count(),
        start_time.elapsed().as_millis()
    );

    Ok(table)
}

fn range_to_table(range: &Range<Data>) -> Result<RawTable, String> {
    let (height, width) = range.get_size();
    if height == 0 || width == 0 {
        return Ok(RawTable::default());
    }
    if height.saturating_mul(width) > MAX_CELLS {
        return Err(format!(
            "Sheet too large: {}x{} exceeds the {} cell limit",
            height, width, MAX_CELLS
        ));
    }

    // Range start offset (data may not begin at A1). Pad on the left so
    // column positions match the sheet.
    let (_, data_start_col) = range.start().unwrap_or((0, 0));
    let pad = data_start_col as usize;

    let mut rows = range.rows().map(|row| {
        let mut cells: Vec<Cell> = Vec::with_capacity(pad + row.len());
        cells.resize(pad, Cell::Empty);
        cells.extend(row.iter().map(data_to_cell));
        cells
    });

    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(|c| cell_to_text(c).trim().to_string()).collect(),
        None => return Ok(RawTable::default()),
    };

    let mut skipped_blank = 0usize;
    let data: Vec<Vec<Cell>> = rows
        .filter(|cells| {
            let blank = cells.iter().all(|c| matches!(c, Cell::Empty));
            if blank {
                skipped_blank += 1;
            }
            !blank
        })
        .collect();

    if skipped_blank > 0 {
        log::debug!("skipped {} blank rows", skipped_blank);
    }

    Ok(RawTable::new(headers, data))
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => {
            if s.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::Float(n) => Cell::Float(*n),
        Data::Int(n) => Cell::Int(*n),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => {
            // calamine's ExcelDateTime doesn't expose the 1904 flag without the
            // dates feature; assume the 1900 system (most common).
            let serial = dt.as_f64();
            excel_serial_to_datetime(serial)
                .map(Cell::DateTime)
                .unwrap_or(Cell::Float(serial))
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(format!("#{:?}", e)),
    }
}

/// Convert an Excel 1900-system serial date to a datetime.
///
/// Serial 1 is 1900-01-01. Counting from 1899-12-30 absorbs Excel's
/// fictitious 1900-02-29 for every date after it.
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let days = serial.trunc() as i64;
    let millis = ((serial - serial.trunc()) * 86_400_000.0).round() as i64;
    epoch
        .checked_add_signed(Duration::days(days))?
        .checked_add_signed(Duration::milliseconds(millis))
}

// ============================================================================
// Export
// ============================================================================

/// Result of a report export
#[derive(Debug, Default)]
pub struct ExportResult {
    /// Data rows written (header excluded)
    pub rows_exported: usize,
    /// Highlighted range in A1 notation, if any rows exist
    pub highlight_range: Option<String>,
    /// Export duration in milliseconds
    pub export_duration_ms: u128,
}

impl ExportResult {
    /// Returns a summary message suitable for display
    pub fn summary(&self) -> String {
        let mut msg = format!(
            "{} row{}",
            self.rows_exported,
            if self.rows_exported == 1 { "" } else { "s" }
        );
        if let Some(ref range) = self.highlight_range {
            msg.push_str(&format!(", highlight rule on {}", range));
        }
        msg
    }
}

/// Export the reconciled table to an XLSX file.
pub fn export_report(
    table: &ReconciledTable,
    layout: &ReportLayout,
    path: &Path,
) -> Result<ExportResult, String> {
    let start_time = Instant::now();
    let (mut workbook, mut result) = build_workbook(table, layout)?;

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {}", e))?;

    result.export_duration_ms = start_time.elapsed().as_millis();
    Ok(result)
}

/// Export the reconciled table to an in-memory XLSX file.
pub fn export_report_to_buffer(
    table: &ReconciledTable,
    layout: &ReportLayout,
) -> Result<Vec<u8>, String> {
    let (mut workbook, _) = build_workbook(table, layout)?;
    workbook
        .save_to_buffer()
        .map_err(|e| format!("Failed to build XLSX buffer: {}", e))
}

fn build_workbook(
    table: &ReconciledTable,
    layout: &ReportLayout,
) -> Result<(XlsxWorkbook, ExportResult), String> {
    let mut result = ExportResult::default();
    let mut workbook = XlsxWorkbook::new();

    let worksheet = workbook
        .add_worksheet()
        .set_name(&layout.sheet_name)
        .map_err(|e| format!("Failed to create sheet '{}': {}", layout.sheet_name, e))?;

    let header_format = Format::new().set_bold().set_border(FormatBorder::Thin);
    for (col, header) in layout.columns.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, header, &header_format)
            .map_err(|e| format!("Failed to write header '{}': {}", header, e))?;
    }

    for (i, row) in table.iter().enumerate() {
        let r = (i + 1) as u32;
        let write_err = |e: rust_xlsxwriter::XlsxError| format!("Failed to write row {}: {}", r + 1, e);
        worksheet.write_string(r, 0, &row.prod).map_err(write_err)?;
        worksheet.write_string(r, 1, &row.dest).map_err(write_err)?;
        worksheet.write_boolean(r, 2, row.in_shipment).map_err(write_err)?;
        worksheet.write_boolean(r, 3, row.in_rw).map_err(write_err)?;
        worksheet.write_boolean(r, 4, row.in_csp).map_err(write_err)?;
        result.rows_exported += 1;
    }

    for (col, width) in layout.column_widths.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *width as f64)
            .map_err(|e| format!("Failed to set column {} width: {}", col, e))?;
    }

    if let Some(ref rule) = layout.highlight {
        let rgb = parse_hex_color(&rule.fill_color)
            .ok_or_else(|| format!("Invalid highlight color '{}'", rule.fill_color))?;
        let fill = Format::new()
            .set_background_color(Color::RGB(rgb))
            .set_border(FormatBorder::Thin);
        let conditional = ConditionalFormatFormula::new()
            .set_rule(rule.criteria.as_str())
            .set_format(fill);

        worksheet
            .add_conditional_format(
                rule.first_row,
                rule.first_col,
                rule.last_row,
                rule.last_col,
                &conditional,
            )
            .map_err(|e| format!("Failed to add highlight rule: {}", e))?;

        result.highlight_range = Some(format!(
            "{}{}:{}{}",
            col_to_letter(rule.first_col as usize),
            rule.first_row + 1,
            col_to_letter(rule.last_col as usize),
            rule.last_row + 1
        ));
    }

    Ok((workbook, result))
}
