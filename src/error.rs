use thiserror::Error;

/// Top-level error type for the stokesmap pipeline.
#[derive(Debug, Error)]
pub enum StokesmapError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Capacity(#[from] CapacityError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Grammar violations in the trajectory input file.
///
/// Every variant carries the 1-based line number at which the scanner
/// detected the violation.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: trajectory block opened with 'p' but never closed with 'q'")]
    UnterminatedTrajectory { line: usize },

    #[error("line {line}: unreadable {component} component of Stokes triplet")]
    BadTriplet {
        component: &'static str,
        line: usize,
    },

    #[error("line {line}: invalid label position code '{code}'")]
    InvalidAnchor { code: String, line: usize },

    #[error("line {line}: label text must be enclosed in double quotes")]
    MissingQuote { line: usize },

    #[error("line {line}: reached end of line without closing quote mark")]
    UnterminatedQuote { line: usize },

    #[error("line {line}: unexpected input '{token}'")]
    UnexpectedToken { token: String, line: usize },
}

/// A per-trajectory or per-run buffer exceeded its configured maximum.
#[derive(Debug, Error)]
pub enum CapacityError {
    #[error("trajectory exceeds the maximum of {max} points")]
    Points { max: usize },

    #[error("trajectory exceeds the maximum of {max} tick marks")]
    Ticks { max: usize },

    #[error("trajectory exceeds the maximum of {max} labels")]
    Labels { max: usize },

    #[error("label text exceeds the maximum of {max} characters")]
    LabelText { max: usize },

    #[error("more than {max} arrows specified")]
    Arrows { max: usize },
}

/// Degenerate geometry detected before projection or tick construction.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("cannot normalize zero-magnitude Stokes vector")]
    ZeroMagnitude,

    #[error("zero-magnitude Stokes vector at point {index}")]
    ZeroMagnitudePoint { index: usize },

    #[error("degenerate tangent at point {index}: tangent parallel to radius or zero-length")]
    DegenerateTangent { index: usize },

    #[error("non-finite projected coordinate at point {index}")]
    NonFiniteProjection { index: usize },
}

/// Command-line argument violations.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("option '{option}' expects {expected}")]
    MissingValue {
        option: String,
        expected: &'static str,
    },

    #[error("option '{option}': cannot parse '{value}' as a number")]
    BadNumber { option: String, value: String },
}

/// Convenience type alias for results using [`StokesmapError`].
pub type Result<T> = std::result::Result<T, StokesmapError>;
