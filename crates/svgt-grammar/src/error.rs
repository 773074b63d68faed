use rust_decimal::Decimal;

/// An error type for the transform grammar.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// Error when the input does not follow the transform list grammar.
    #[error("Invalid transform syntax at byte {0}")]
    Syntax(usize),

    /// Error when a function name is not one of the SVG transform functions.
    #[error("Unknown transform function `{0}`")]
    UnknownFunction(String),

    /// Error when a transform function receives an unsupported number of arguments.
    #[error("`{name}` takes {expected} arguments, got {found}")]
    InvalidArity {
        /// The transform function name.
        name: &'static str,
        /// The accepted argument counts.
        expected: &'static str,
        /// The number of arguments given.
        found: usize,
    },

    /// Error when a number can not be represented as a decimal.
    #[error("Invalid number `{0}`")]
    InvalidNumber(String),

    /// Error when a skew angle has no finite tangent.
    #[error("Skew angle {0} has no finite tangent")]
    UndefinedTangent(Decimal),

    /// Error when a matrix entry falls outside the decimal range.
    #[error("Transform entries overflow the decimal range")]
    Overflow,
}
