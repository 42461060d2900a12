use crate::Kinetics::kinetics_errors::KineticsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Size mismatch between varied ({varied} values) and concs ({concs} rows)")]
    SweepShapeMismatch { varied: usize, concs: usize },
    #[error("Rate array has {got} rows, expected {expected} sweep steps")]
    RateRowsMismatch { expected: usize, got: usize },
    #[error("Rate array has {columns} columns, reaction index {index} is out of range")]
    RateColumnsMismatch { index: usize, columns: usize },
    #[error("Concentration matrix has {got} columns, substance index {index} is out of range")]
    ConcentrationColumnsMismatch { index: usize, got: usize },
    #[error("Threshold must be a non-negative number, got {0}")]
    InvalidThreshold(f64),
    #[error("Reaction system contains no forward/backward reaction pairs")]
    NoEquilibria,
    #[error("Invalid equilibrium pair ({forward}, {backward}): {reason}")]
    InvalidPair {
        forward: usize,
        backward: usize,
        reason: String,
    },
    #[error("Expected a single state, got {0} concentration rows")]
    NotASingleState(usize),
    #[error(transparent)]
    Kinetics(#[from] KineticsError),
    #[error("Rendering failed: {0}")]
    Render(#[from] std::io::Error),
}
