use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum KineticsError {
    #[error("Unknown substance: {0}")]
    UnknownSubstance(String),
    #[error("Substance {0} is defined more than once")]
    DuplicateSubstance(String),
    #[error("No value given for substance {0}")]
    MissingSubstanceValue(String),
    #[error("Expected {expected} per-substance values, got {got}")]
    LengthMismatch { expected: usize, got: usize },
    #[error("Reaction {index} ({label}) references unknown substance {key}")]
    UnknownSubstanceInReaction {
        index: usize,
        label: String,
        key: String,
    },
    #[error("Reaction {index} ({label}) duplicates reaction {first}")]
    DuplicateReaction {
        index: usize,
        first: usize,
        label: String,
    },
    #[error("Reaction {index} ({label}) violates mass balance: {violation:?}")]
    CompositionViolation {
        index: usize,
        label: String,
        violation: Vec<f64>,
    },
    #[error("Reaction {index} ({label}) violates charge neutrality by {violation}")]
    ChargeViolation {
        index: usize,
        label: String,
        violation: f64,
    },
    #[error("Unknown atomic number: {0}")]
    UnknownElement(u32),
    #[error("Reaction {index} ({label}) has no rate parameter")]
    MissingRateParameter { index: usize, label: String },
    #[error("Equilibrium {0} has no equilibrium constant")]
    MissingEquilibriumConstant(String),
    #[error("Exactly one of the forward and backward rate constants must be given")]
    AmbiguousRateConstants,
    #[error("Concentration matrix has {got} columns, the system has {expected} substances")]
    ConcentrationShape { expected: usize, got: usize },
}
