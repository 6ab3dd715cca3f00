//! Errors raised while validating tables and projecting reports

/// Kind of a report error, independent of any row context attached to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyReport,
    LookupKey,
    PrimaryKey,
    Parsing,
    Grouping,
    EmptyValue,
    Config,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::EmptyReport => "EmptyReportError",
            ErrorKind::LookupKey => "LookupKeyError",
            ErrorKind::PrimaryKey => "PrimaryKeyError",
            ErrorKind::Parsing => "ParsingError",
            ErrorKind::Grouping => "GroupingError",
            ErrorKind::EmptyValue => "EmptyValueError",
            ErrorKind::Config => "ConfigError",
        };
        write!(f, "{}", name)
    }
}

/// Error from validation, lookup or projection
#[derive(Debug, Clone, PartialEq)]
pub enum ReportError {
    /// A report was expected to carry rows but has none
    EmptyReport { schema: String },
    /// Lookup join found no row for the composite key
    LookupKey { key: String },
    /// Missing, empty or duplicate primary key
    PrimaryKey { message: String },
    /// Input could not be turned into rows
    Parsing { message: String },
    /// A group key reappeared after its group was closed
    Grouping { key: String },
    /// A required field has no value
    EmptyValue { field: String, row: String },
    /// Schema or lookup configuration does not fit the data
    Config { message: String },
    /// Error raised while processing a specific row
    InRow {
        /// 1-based row number within the table
        row: usize,
        /// Row content, when it is worth showing
        content: Option<String>,
        source: Box<ReportError>,
    },
}

impl ReportError {
    pub fn primary_key(message: impl Into<String>) -> Self {
        ReportError::PrimaryKey {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        ReportError::Config {
            message: message.into(),
        }
    }

    pub fn parsing(message: impl Into<String>) -> Self {
        ReportError::Parsing {
            message: message.into(),
        }
    }

    /// Attach row number (and optionally row content) to this error
    pub fn in_row(self, row: usize, content: Option<String>) -> Self {
        ReportError::InRow {
            row,
            content,
            source: Box::new(self),
        }
    }

    /// Error kind, looking through row context
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::EmptyReport { .. } => ErrorKind::EmptyReport,
            ReportError::LookupKey { .. } => ErrorKind::LookupKey,
            ReportError::PrimaryKey { .. } => ErrorKind::PrimaryKey,
            ReportError::Parsing { .. } => ErrorKind::Parsing,
            ReportError::Grouping { .. } => ErrorKind::Grouping,
            ReportError::EmptyValue { .. } => ErrorKind::EmptyValue,
            ReportError::Config { .. } => ErrorKind::Config,
            ReportError::InRow { source, .. } => source.kind(),
        }
    }

    /// Innermost error, without row context
    pub fn root(&self) -> &ReportError {
        match self {
            ReportError::InRow { source, .. } => source.root(),
            other => other,
        }
    }

    /// Row number the error was raised in, if known
    pub fn row(&self) -> Option<usize> {
        match self {
            ReportError::InRow { row, .. } => Some(*row),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::EmptyReport { schema } => {
                write!(f, "{}: no data for report '{}'", self.kind(), schema)
            }
            ReportError::LookupKey { key } => {
                write!(f, "{}: unable to lookup key '{}'", self.kind(), key)
            }
            ReportError::PrimaryKey { message } => write!(f, "{}: {}", self.kind(), message),
            ReportError::Parsing { message } => write!(f, "{}: {}", self.kind(), message),
            ReportError::Grouping { key } => {
                write!(f, "{}: {} was already grouped once", self.kind(), key)
            }
            ReportError::EmptyValue { field, row } => {
                write!(f, "{}: {} in {} has no value", self.kind(), field, row)
            }
            ReportError::Config { message } => write!(f, "{}: {}", self.kind(), message),
            ReportError::InRow {
                row,
                content,
                source,
            } => {
                write!(f, "error in row {}", row)?;
                if let Some(content) = content {
                    write!(f, " row=<{}>", content)?;
                }
                write!(f, ": {}", source)
            }
        }
    }
}

impl std::error::Error for ReportError {}

pub type ReportResult<T> = Result<T, ReportError>;
