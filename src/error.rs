//! Error types for drift scoring.
//!
//! Every failure names what went wrong (feature, strategy, sample) so a batch
//! run can be diagnosed without re-running it feature by feature.

use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::binning::BinningStrategy;

/// Result type alias for drift operations.
pub type Result<T> = std::result::Result<T, DriftError>;

/// Which input a content or shape error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleRole {
    /// The reference (baseline) sample
    Reference,
    /// The new (monitoring) sample
    New,
}

impl fmt::Display for SampleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleRole::Reference => write!(f, "reference"),
            SampleRole::New => write!(f, "new"),
        }
    }
}

/// Error taxonomy used by callers to decide how to react.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input has the wrong shape (wrong `BinSpec` variant, too short, mismatched lengths)
    InputShape,
    /// Input has unusable content (empty, all missing, non-numeric)
    InputContent,
    /// Something the call depends on was not supplied (per-feature bins, strategy)
    MissingCollaborator,
    /// Configuration, I/O or serialization failure
    Environment,
}

/// Errors raised while deriving bins, scoring features or writing reports.
#[derive(Error, Debug)]
pub enum DriftError {
    /// Domain binning was given a bin count instead of an explicit list.
    #[error("For strategy 'domain', bins must be a list of bin edges or categories, got a bin count of {count}")]
    DomainBinsNotList { count: usize },

    /// Domain binning needs at least two edges or categories.
    #[error("At least two bin edges/categories are required for 'domain' binning, got {len}")]
    DomainTooShort { len: usize },

    /// A counted strategy was given an explicit edge list.
    #[error("Strategy '{strategy}' expects a bin count, not an explicit edge list")]
    BinCountRequired { strategy: BinningStrategy },

    /// Bin count is out of range for the strategy.
    #[error("Invalid bin count {bins} for strategy '{strategy}': need at least {min}")]
    InvalidBinCount { strategy: BinningStrategy, bins: usize, min: usize },

    /// Reference and target lengths differ.
    #[error("Reference data and target must have the same length: {reference} != {target}")]
    TargetLengthMismatch { reference: usize, target: usize },

    /// A dataset column does not match the dataset row count.
    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    ColumnLengthMismatch { column: String, expected: usize, actual: usize },

    /// Sample has no values at all.
    #[error("Input '{sample}' data must not be empty")]
    EmptySample { sample: SampleRole },

    /// Sample has values but all of them are missing.
    #[error("Input '{sample}' data contains only missing values")]
    AllMissing { sample: SampleRole },

    /// Numeric strategy applied to text data.
    #[error("Input '{sample}' data must contain only numeric values")]
    NonNumeric { sample: SampleRole },

    /// Domain edge list contains a non-numeric entry for a numeric feature.
    #[error("Domain bin edges must be numeric for a numeric feature, found '{label}'")]
    NonNumericEdge { label: String },

    /// Supervised target contains missing values.
    #[error("Target contains missing values, which are not allowed")]
    TargetHasMissing,

    /// No observation fell into any bin, so proportions are undefined.
    #[error("No '{sample}' values fall inside the bins; proportions are undefined")]
    ZeroTotal { sample: SampleRole },

    /// Adaptive binning without a target.
    #[error("For strategy 'adaptive', a target variable must be provided")]
    TargetRequired,

    /// Target column named in the dataset bin spec is absent.
    #[error("Target column '{column}' not found in reference dataset")]
    TargetColumnNotFound { column: String },

    /// Unsupported strategy name.
    #[error("Invalid binning strategy: '{name}'. Choose from {}", BinningStrategy::supported_names())]
    UnknownStrategy { name: String },

    /// Domain mode without a per-feature bin map.
    #[error("Bins for column '{feature}' must be provided as a per-feature map for strategy 'domain'")]
    DomainSpecRequired { feature: String },

    /// Domain map lacks an entry for a processed feature.
    #[error("Bins for column '{feature}' must be provided as a list in the domain map")]
    MissingDomainBins { feature: String },

    /// Learner or clusterer failed to produce a usable result.
    #[error("Binning backend failed: {message}")]
    Backend { message: String },

    /// Configuration value is invalid.
    #[error("Invalid configuration value for '{field}': {message}")]
    Config { field: String, message: String },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ConfigParsing { message: String },

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl DriftError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Create an IO error for a path.
    pub(crate) fn io_at(action: &str, path: &Path, source: std::io::Error) -> Self {
        Self::io(format!("{action} {}", path.display()), source)
    }

    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DomainBinsNotList { .. }
            | Self::DomainTooShort { .. }
            | Self::BinCountRequired { .. }
            | Self::InvalidBinCount { .. }
            | Self::TargetLengthMismatch { .. }
            | Self::ColumnLengthMismatch { .. } => ErrorKind::InputShape,
            Self::EmptySample { .. }
            | Self::AllMissing { .. }
            | Self::NonNumeric { .. }
            | Self::NonNumericEdge { .. }
            | Self::TargetHasMissing
            | Self::ZeroTotal { .. }
            | Self::Backend { .. } => ErrorKind::InputContent,
            Self::TargetRequired
            | Self::TargetColumnNotFound { .. }
            | Self::UnknownStrategy { .. }
            | Self::DomainSpecRequired { .. }
            | Self::MissingDomainBins { .. } => ErrorKind::MissingCollaborator,
            Self::Config { .. }
            | Self::ConfigParsing { .. }
            | Self::Io { .. }
            | Self::Serialization { .. } => ErrorKind::Environment,
        }
    }

    /// Whether the error is a type mismatch rather than a bad value.
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            Self::DomainBinsNotList { .. } | Self::NonNumeric { .. } | Self::NonNumericEdge { .. }
        )
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DomainBinsNotList { .. } => "E001",
            Self::DomainTooShort { .. } => "E002",
            Self::BinCountRequired { .. } => "E003",
            Self::InvalidBinCount { .. } => "E004",
            Self::TargetLengthMismatch { .. } => "E005",
            Self::ColumnLengthMismatch { .. } => "E006",
            Self::EmptySample { .. } => "E010",
            Self::AllMissing { .. } => "E011",
            Self::NonNumeric { .. } => "E012",
            Self::NonNumericEdge { .. } => "E013",
            Self::TargetHasMissing => "E014",
            Self::ZeroTotal { .. } => "E015",
            Self::Backend { .. } => "E016",
            Self::TargetRequired => "E020",
            Self::TargetColumnNotFound { .. } => "E021",
            Self::UnknownStrategy { .. } => "E022",
            Self::DomainSpecRequired { .. } => "E023",
            Self::MissingDomainBins { .. } => "E024",
            Self::Config { .. } => "E030",
            Self::ConfigParsing { .. } => "E031",
            Self::Io { .. } => "E050",
            Self::Serialization { .. } => "E051",
        }
    }
}

impl From<serde_json::Error> for DriftError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization { message: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_unique() {
        let errors = vec![
            DriftError::DomainBinsNotList { count: 3 },
            DriftError::DomainTooShort { len: 1 },
            DriftError::BinCountRequired { strategy: BinningStrategy::EqualWidth },
            DriftError::InvalidBinCount { strategy: BinningStrategy::KMeans, bins: 0, min: 1 },
            DriftError::TargetLengthMismatch { reference: 4, target: 2 },
            DriftError::ColumnLengthMismatch { column: "a".into(), expected: 1, actual: 2 },
            DriftError::EmptySample { sample: SampleRole::Reference },
            DriftError::AllMissing { sample: SampleRole::Reference },
            DriftError::NonNumeric { sample: SampleRole::New },
            DriftError::NonNumericEdge { label: "x".into() },
            DriftError::TargetHasMissing,
            DriftError::ZeroTotal { sample: SampleRole::New },
            DriftError::Backend { message: "".into() },
            DriftError::TargetRequired,
            DriftError::TargetColumnNotFound { column: "y".into() },
            DriftError::UnknownStrategy { name: "foo".into() },
            DriftError::DomainSpecRequired { feature: "age".into() },
            DriftError::MissingDomainBins { feature: "age".into() },
            DriftError::Config { field: "".into(), message: "".into() },
            DriftError::ConfigParsing { message: "".into() },
            DriftError::Serialization { message: "".into() },
        ];

        let codes: Vec<_> = errors.iter().map(DriftError::code).collect();
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
        assert!(codes.iter().all(|c| c.starts_with('E')));
    }

    #[test]
    fn test_unknown_strategy_names_offender_and_supported_set() {
        let msg = DriftError::UnknownStrategy { name: "unsupported_method".into() }.to_string();
        assert!(msg.contains("unsupported_method"));
        assert!(msg.contains("equal_width"));
        assert!(msg.contains("domain"));
    }

    #[test]
    fn test_missing_domain_bins_names_feature() {
        let err = DriftError::MissingDomainBins { feature: "income".into() };
        assert!(err.to_string().contains("income"));
        assert_eq!(err.kind(), ErrorKind::MissingCollaborator);
    }

    #[test]
    fn test_kind_taxonomy() {
        assert_eq!(DriftError::DomainTooShort { len: 1 }.kind(), ErrorKind::InputShape);
        assert_eq!(
            DriftError::AllMissing { sample: SampleRole::Reference }.kind(),
            ErrorKind::InputContent
        );
        assert_eq!(DriftError::TargetRequired.kind(), ErrorKind::MissingCollaborator);
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(DriftError::io("writing report", io_err).kind(), ErrorKind::Environment);
    }

    #[test]
    fn test_type_errors() {
        assert!(DriftError::DomainBinsNotList { count: 3 }.is_type_error());
        assert!(DriftError::NonNumeric { sample: SampleRole::Reference }.is_type_error());
        assert!(!DriftError::DomainTooShort { len: 1 }.is_type_error());
    }

    #[test]
    fn test_io_error_keeps_context() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let msg = DriftError::io("writing report.html", io_err).to_string();
        assert!(msg.contains("writing report.html"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_sample_role_display() {
        assert_eq!(SampleRole::Reference.to_string(), "reference");
        assert_eq!(SampleRole::New.to_string(), "new");
    }
}
