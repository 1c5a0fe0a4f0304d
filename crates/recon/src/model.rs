use chrono::NaiveDateTime;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single cell as loaded from a source file.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Int(n)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Float(n)
    }
}

/// A source table loaded as-is: header labels plus data rows.
///
/// Rows may be shorter than the header; missing trailing cells read as
/// [`Cell::Empty`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at (row, col), `Empty` when the row is short.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        const EMPTY: &Cell = &Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(EMPTY)
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// The three fixed source roles of a cross-check report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Shipment,
    Rw,
    Csp,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::Shipment, Source::Rw, Source::Csp];

    /// Human-readable label used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Shipment => "Shipment",
            Self::Rw => "RW",
            Self::Csp => "CSP",
        }
    }

    /// Position of this source's flag in a presence record.
    pub fn index(&self) -> usize {
        match self {
            Self::Shipment => 0,
            Self::Rw => 1,
            Self::Csp => 2,
        }
    }

    /// Known export layout of each source: (product column, destination column).
    pub fn default_columns(&self) -> (usize, usize) {
        match self {
            Self::Shipment => (0, 5),
            Self::Rw => (0, 1),
            Self::Csp => (0, 2),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedRow {
    pub prod: Cell,
    pub dest: Cell,
}

/// The (prod, dest) columns of one source table, not yet normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceProjection {
    pub label: String,
    pub rows: Vec<ProjectedRow>,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciledRow {
    pub prod: String,
    pub dest: String,
    #[serde(rename = "In_Shipment")]
    pub in_shipment: bool,
    #[serde(rename = "In_RW")]
    pub in_rw: bool,
    #[serde(rename = "In_CSP")]
    pub in_csp: bool,
}

impl ReconciledRow {
    pub fn is_in(&self, source: Source) -> bool {
        match source {
            Source::Shipment => self.in_shipment,
            Source::Rw => self.in_rw,
            Source::Csp => self.in_csp,
        }
    }
}

/// Sorted presence matrix. Built only by [`crate::reconcile::reconcile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReconciledTable {
    rows: Vec<ReconciledRow>,
}

impl ReconciledTable {
    pub(crate) fn from_sorted(rows: Vec<ReconciledRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ReconciledRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReconciledRow> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a ReconciledTable {
    type Item = &'a ReconciledRow;
    type IntoIter = std::slice::Iter<'a, ReconciledRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

// ---------------------------------------------------------------------------
// Summary + Layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconSummary {
    pub total_rows: usize,
    pub missing_from_shipment: usize,
    pub missing_from_rw: usize,
    pub missing_from_csp: usize,
    pub in_all_sources: usize,
}

/// Conditional-format rule: fill every cell in the range when `criteria` holds.
///
/// Rows and columns are 0-indexed and inclusive; `criteria` is a spreadsheet
/// formula relative to the top-left cell of the range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightRule {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
    pub criteria: String,
    pub fill_color: String,
}

/// Everything an exporter needs to render the report sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLayout {
    pub sheet_name: String,
    pub columns: Vec<String>,
    /// Width in characters, one per column.
    pub column_widths: Vec<usize>,
    pub highlight: Option<HighlightRule>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub engine_version: String,
    pub run_at: String,
    pub rows_read: SourceCounts,
}

/// Rows read per source, before deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceCounts {
    pub shipment: usize,
    pub rw: usize,
    pub csp: usize,
}

impl SourceCounts {
    pub fn set(&mut self, source: Source, count: usize) {
        match source {
            Source::Shipment => self.shipment = count,
            Source::Rw => self.rw = count,
            Source::Csp => self.csp = count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CrossCheckResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub rows: ReconciledTable,
    pub layout: ReportLayout,
}
