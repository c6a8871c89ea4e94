/// Error types for the linear algebra kernel

use thiserror::Error;

/// Errors raised by vector/matrix construction and operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Wrong argument count or shape passed to a constructor
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operands of differing kind (vector vs matrix) or dimensionality
    #[error("{op}: unsupported operand types ({operands})")]
    TypeMismatch { op: &'static str, operands: String },

    /// Well-typed but mathematically undefined input
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Inverse requested for a matrix with zero determinant
    #[error("Matrix is singular (determinant is zero)")]
    SingularMatrix,

    /// Packed data does not fit in a fixed-capacity float buffer
    #[error("Buffer overflow: capacity {capacity}, required {required}")]
    BufferOverflow { capacity: usize, required: usize },

    /// Malformed vector/matrix literal
    #[error("Parse error: {0}")]
    Parse(String),
}

impl MathError {
    /// Binary operation on operands of the wrong kinds
    pub fn type_mismatch(op: &'static str, left: &str, right: &str) -> Self {
        MathError::TypeMismatch {
            op,
            operands: format!("{left}, {right}"),
        }
    }

    /// Unary operation on an operand of the wrong kind
    pub fn unsupported(op: &'static str, kind: &str) -> Self {
        MathError::TypeMismatch {
            op,
            operands: kind.to_string(),
        }
    }

    pub fn degenerate(msg: impl Into<String>) -> Self {
        MathError::DegenerateInput(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        MathError::InvalidArgument(msg.into())
    }
}

/// Result type for kernel operations
pub type MathResult<T> = Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MathError::type_mismatch("add", "vec3", "vec4");
        assert_eq!(err.to_string(), "add: unsupported operand types (vec3, vec4)");
        assert_eq!(
            MathError::unsupported("transpose", "vec2").to_string(),
            "transpose: unsupported operand types (vec2)"
        );

        let err = MathError::BufferOverflow {
            capacity: 4,
            required: 8,
        };
        assert_eq!(err.to_string(), "Buffer overflow: capacity 4, required 8");
        assert_eq!(
            MathError::SingularMatrix.to_string(),
            "Matrix is singular (determinant is zero)"
        );
    }
}
