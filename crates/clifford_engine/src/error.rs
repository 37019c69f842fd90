//! Error types for parsing and algebraic domain failures

use thiserror::Error;

/// Broad classification of a [`GeometryError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed basis token or multivector text
    Parse,
    /// Zero or non-scalar quadrance where an inverse or norm was needed
    NonInvertible,
    /// Exponential-map input that does not square to a scalar
    NotABlade,
}

/// Errors raised by multivector construction and algebraic operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A basis token contained unparseable residue
    #[error("Unable to parse basis \"{0}\" as a basis")]
    InvalidBasis(String),

    /// Multivector text did not match the term grammar
    #[error("Unable to parse \"{input}\" as a multivector at offset {offset}")]
    Syntax {
        /// Full text handed to the parser
        input: String,
        /// Byte offset of the first unconsumed character
        offset: usize,
    },

    /// `conjugate(a) * a` had components beyond the scalar
    #[error("Non-scalar quadrance ({product}) for: {value}")]
    NonScalarQuadrance {
        /// Rendered conjugate product
        product: String,
        /// Rendered operand
        value: String,
    },

    /// Inverse requested for a value with zero quadrance
    #[error("Multiplicative inverse is undefined (quadrance: {quadrance}): {value}")]
    NonInvertible {
        /// Quadrance of the operand
        quadrance: f64,
        /// Rendered operand
        value: String,
    },

    /// Normalization would produce non-finite components
    #[error("Cannot normalize (norm: {norm}): {value}")]
    NonNormalizable {
        /// Norm of the operand
        norm: f64,
        /// Rendered operand
        value: String,
    },

    /// Exponential map applied to something that is not a blade
    #[error("Not a blade: {value} squares to {square}")]
    NotABlade {
        /// Rendered operand
        value: String,
        /// Rendered self product
        square: String,
    },

    /// Two-vector rotation built from operands that are not vectors
    #[error("Rotation between {first} and {second} requires two vectors")]
    NotVectors {
        /// Rendered first operand
        first: String,
        /// Rendered second operand
        second: String,
    },
}

impl GeometryError {
    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidBasis(_) | Self::Syntax { .. } => ErrorKind::Parse,
            Self::NonScalarQuadrance { .. }
            | Self::NonInvertible { .. }
            | Self::NonNormalizable { .. } => ErrorKind::NonInvertible,
            Self::NotABlade { .. } | Self::NotVectors { .. } => ErrorKind::NotABlade,
        }
    }
}
