use std::fmt;

/// Which key column a resolver could not locate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingColumn {
    Product,
    Destination,
    Both,
}

impl fmt::Display for MissingColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Product => write!(f, "product"),
            Self::Destination => write!(f, "destination"),
            Self::Both => write!(f, "product and destination"),
        }
    }
}

/// Column resolution failure for one source table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The table has no data rows.
    EmptyInput { source: String },
    /// Neither positional nor keyword lookup located the key columns.
    NoMatch { source: String, missing: MissingColumn },
}

impl SchemaError {
    /// Label of the source whose table failed to resolve.
    pub fn source_label(&self) -> &str {
        match self {
            Self::EmptyInput { source } | Self::NoMatch { source, .. } => source,
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput { source } => write!(f, "{source}: empty input"),
            Self::NoMatch { source, missing } => {
                write!(f, "{source}: no match for {missing} column")
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// A report run that was abandoned because one or more sources failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportError {
    pub failures: Vec<SchemaError>,
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot locate product/destination columns in ")?;
        let labels: Vec<&str> = self.failures.iter().map(|e| e.source_label()).collect();
        write!(f, "{}", labels.join(", "))?;
        for failure in &self.failures {
            write!(f, "\n  {failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ReportError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// TOML parse / deserialization error.
    Parse(String),
    /// Config validation error (empty keyword set, bad color, etc.).
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Validation(msg) => write!(f, "config validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
