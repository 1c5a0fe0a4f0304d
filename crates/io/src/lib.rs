// Source loading and report export

use std::path::Path;

use crosscheck_recon::model::RawTable;

pub mod csv;
pub mod xlsx;

/// Input formats recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Spreadsheet,
    Csv,
    Tsv,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Some(Self::Spreadsheet),
            "csv" | "txt" => Some(Self::Csv),
            "tsv" | "tab" => Some(Self::Tsv),
            _ => None,
        }
    }
}

/// Load one source file as a raw table.
///
/// `sheet` only applies to spreadsheet formats; `None` means the first sheet.
pub fn load_table(path: &Path, sheet: Option<&str>) -> Result<RawTable, String> {
    let format = SourceFormat::from_path(path).ok_or_else(|| {
        format!(
            "Unsupported file type: {} (expected xlsx, xls, xlsb, ods, csv or tsv)",
            path.display()
        )
    })?;

    if sheet.is_some() && format != SourceFormat::Spreadsheet {
        log::warn!("{}: sheet selection ignored for delimited text", path.display());
    }

    match format {
        SourceFormat::Spreadsheet => xlsx::import(path, sheet),
        SourceFormat::Csv => csv::import(path),
        SourceFormat::Tsv => csv::import_tsv(path),
    }
}
