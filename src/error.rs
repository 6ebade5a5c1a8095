use thiserror::Error;

/// Everything that can go wrong while deriving robot geometry.
///
/// None of these should show up on a correctly wired robot; they are raised
/// at startup (bad constants) or by callers passing selectors that don't exist.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RobotError {
    /// A ratio or dimension that must be strictly positive wasn't.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("unknown motor model: {0}")]
    UnknownMotorModel(String),

    /// Reef face, alliance, or side outside its closed set.
    #[error("invalid selector: {0}")]
    InvalidSelector(String),

    /// Trust was requested for a vision estimate built from zero tags.
    #[error("no fiducial observation: a vision estimate needs at least one tag")]
    NoObservation,
}

pub type Result<T> = std::result::Result<T, RobotError>;
