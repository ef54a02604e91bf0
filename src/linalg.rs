use crate::error::SolverError;
use ndarray::prelude::*;
use ndarray_linalg::SVD;

/// Moore–Penrose pseudo-inverse computed from the SVD.
///
/// The mass matrices this is applied to carry no essential boundary
/// condition, so they can be singular or ill-conditioned (and will be, as
/// deformed elements shrink towards zero length). Singular values below
/// `max sigma * eps * n` are truncated; when any value is truncated the
/// matrix is numerically rank deficient and a warning is emitted, but the
/// least-squares behaviour of the pseudo-inverse keeps the result defined.
/// A direct solve is NOT an acceptable substitute here.
pub fn pseudo_inverse(matrix: &Array2<f64>) -> Result<Array2<f64>, SolverError> {
    let (n_rows, n_cols) = matrix.dim();
    let (u, sigma, vt) = matrix.svd(true, true)?;
    let u = u.ok_or_else(|| SolverError::Linalg("SVD did not return U".to_string()))?;
    let vt = vt.ok_or_else(|| SolverError::Linalg("SVD did not return V^T".to_string()))?;

    let sigma_max = sigma.iter().cloned().fold(0.0, f64::max);
    let cutoff = sigma_max * f64::EPSILON * n_rows.max(n_cols) as f64;

    let rank = sigma.iter().filter(|&&s| s > cutoff).count();
    if rank < n_rows.min(n_cols) {
        tracing::warn!(
            rank,
            size = n_rows.min(n_cols),
            "matrix is numerically rank deficient; pseudo-inverse falls back to a least-squares solution"
        );
    }

    // A^+ = V S^+ U^T
    let mut sigma_inv = Array2::zeros((n_cols, n_rows));
    for (i, &s) in sigma.iter().enumerate() {
        if s > cutoff {
            sigma_inv[(i, i)] = 1.0 / s;
        }
    }

    Ok(vt.t().dot(&sigma_inv).dot(&u.t()))
}
