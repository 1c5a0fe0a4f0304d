use serde::Deserialize;

use crate::error::ConfigError;
use crate::model::Source;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrossCheckConfig {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub keywords: KeywordSets,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesConfig {
    #[serde(default)]
    pub shipment: SourceConfig,
    #[serde(default)]
    pub rw: SourceConfig,
    #[serde(default)]
    pub csp: SourceConfig,
}

impl SourcesConfig {
    pub fn get(&self, source: Source) -> &SourceConfig {
        match source {
            Source::Shipment => &self.shipment,
            Source::Rw => &self.rw,
            Source::Csp => &self.csp,
        }
    }

    pub fn get_mut(&mut self, source: Source) -> &mut SourceConfig {
        match source {
            Source::Shipment => &mut self.shipment,
            Source::Rw => &mut self.rw,
            Source::Csp => &mut self.csp,
        }
    }
}

/// Where one source's file lives and which columns hold its key.
///
/// Column positions are 0-indexed and describe the source's known export
/// layout; they are tried before the keyword fallback. Unset positions fall
/// back to [`Source::default_columns`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub sheet: Option<String>,
    #[serde(default)]
    pub product_column: Option<usize>,
    #[serde(default)]
    pub destination_column: Option<usize>,
}

impl SourceConfig {
    /// Effective (product, destination) column positions for `source`.
    pub fn columns(&self, source: Source) -> (usize, usize) {
        let (prod, dest) = source.default_columns();
        (
            self.product_column.unwrap_or(prod),
            self.destination_column.unwrap_or(dest),
        )
    }
}

// ---------------------------------------------------------------------------
// Keywords
// ---------------------------------------------------------------------------

/// Case-insensitive substrings used to find key columns by header label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeywordSets {
    #[serde(default = "default_product_keywords")]
    pub product: Vec<String>,
    #[serde(default = "default_destination_keywords")]
    pub destination: Vec<String>,
}

impl Default for KeywordSets {
    fn default() -> Self {
        Self {
            product: default_product_keywords(),
            destination: default_destination_keywords(),
        }
    }
}

fn default_product_keywords() -> Vec<String> {
    ["prod", "item", "sku"].iter().map(|s| s.to_string()).collect()
}

fn default_destination_keywords() -> Vec<String> {
    ["dest", "country", "loc"].iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

pub const DEFAULT_SHEET_NAME: &str = "Cross_Check_Result";
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#FFFF00";
pub const DEFAULT_COLUMN_PADDING: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    #[serde(default = "default_highlight_color")]
    pub highlight_color: String,
    #[serde(default = "default_column_padding")]
    pub column_padding: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sheet_name: default_sheet_name(),
            highlight_color: default_highlight_color(),
            column_padding: default_column_padding(),
        }
    }
}

fn default_sheet_name() -> String {
    DEFAULT_SHEET_NAME.into()
}

fn default_highlight_color() -> String {
    DEFAULT_HIGHLIGHT_COLOR.into()
}

fn default_column_padding() -> usize {
    DEFAULT_COLUMN_PADDING
}

/// Parse a `#RRGGBB` color into its 24-bit value.
pub fn parse_hex_color(color: &str) -> Option<u32> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl CrossCheckConfig {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: CrossCheckConfig =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for source in Source::ALL {
            let sc = self.sources.get(source);
            let (prod, dest) = sc.columns(source);
            if prod == dest {
                return Err(ConfigError::Validation(format!(
                    "source '{}': product_column and destination_column are both {prod}",
                    source.label()
                )));
            }
            if let Some(ref sheet) = sc.sheet {
                if sheet.trim().is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "source '{}': sheet name is empty",
                        source.label()
                    )));
                }
            }
        }

        for (name, set) in [
            ("product", &self.keywords.product),
            ("destination", &self.keywords.destination),
        ] {
            if set.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "keywords.{name} must list at least one keyword"
                )));
            }
            if set.iter().any(|k| k.trim().is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "keywords.{name} contains an empty keyword"
                )));
            }
        }

        validate_sheet_name(&self.output.sheet_name)?;

        if parse_hex_color(&self.output.highlight_color).is_none() {
            return Err(ConfigError::Validation(format!(
                "output.highlight_color must be #RRGGBB, got '{}'",
                self.output.highlight_color
            )));
        }

        Ok(())
    }
}

/// Spreadsheet sheet names: 1-31 chars, none of `[]:*?/\`, no leading/trailing quote.
fn validate_sheet_name(name: &str) -> Result<(), ConfigError> {
    let len = name.chars().count();
    if len == 0 || len > 31 {
        return Err(ConfigError::Validation(format!(
            "output.sheet_name must be 1-31 characters, got {len}"
        )));
    }
    if let Some(c) = name.chars().find(|c| "[]:*?/\\".contains(*c)) {
        return Err(ConfigError::Validation(format!(
            "output.sheet_name contains invalid character '{c}'"
        )));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(ConfigError::Validation(
            "output.sheet_name cannot start or end with an apostrophe".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
