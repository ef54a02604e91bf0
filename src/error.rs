use std::fmt;

/// Errors raised at solver construction or evaluation.
///
/// All variants are detected at the point of assembly or evaluation and
/// propagated upward unchanged; the caller owns any abort/retry decision.
/// A rank-deficient mass matrix is NOT an error — the pseudo-inverse keeps
/// the evaluation defined and a warning is logged instead.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// A required key was absent from a flat parameter map
    MissingParameter(String),
    /// A parameter map held a key no solver parameter corresponds to
    UnknownParameter(String),
    /// A parameter held a non-physical value
    InvalidParameter { name: &'static str, value: f64 },
    /// An element's deformed length became non-positive during reassembly
    MeshDegeneracy { element: usize, length: f64 },
    /// State vector length does not match the solver's node count
    InvalidState { expected: usize, found: usize },
    /// The SVD backing the pseudo-inverse failed
    Linalg(String),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolverError::MissingParameter(name) => {
                write!(f, "required parameter `{}` is missing", name)
            }
            SolverError::UnknownParameter(name) => {
                write!(f, "parameter `{}` is not recognised", name)
            }
            SolverError::InvalidParameter { name, value } => {
                write!(f, "parameter `{}` has non-physical value {}", name, value)
            }
            SolverError::MeshDegeneracy { element, length } => {
                write!(
                    f,
                    "element {} degenerated to length {:e}; the mesh has collapsed or folded",
                    element, length
                )
            }
            SolverError::InvalidState { expected, found } => {
                write!(
                    f,
                    "state vector has {} entries, but the solver has {} nodes",
                    found, expected
                )
            }
            SolverError::Linalg(message) => write!(f, "linear algebra failure: {}", message),
        }
    }
}

impl std::error::Error for SolverError {}

impl From<ndarray_linalg::error::LinalgError> for SolverError {
    fn from(err: ndarray_linalg::error::LinalgError) -> Self {
        SolverError::Linalg(err.to_string())
    }
}
