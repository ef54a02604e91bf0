use crate::error::SolverError;
use crate::mesh::Mesh1D;
use ndarray::prelude::*;

/// Boundary condition at one end of the rod. Making the boundary policy a
/// value keeps it out of the assembly code and testable on its own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundaryCondition {
    /// Prescribed heat flux into the domain
    Flux(f64),
    /// Zero-flux end
    Insulated,
}

impl BoundaryCondition {
    /// The boundary flux; an insulated end contributes nothing
    pub fn flux(&self) -> f64 {
        match self {
            BoundaryCondition::Flux(q) => *q,
            BoundaryCondition::Insulated => 0.0,
        }
    }
}

/// Capability shared by the three solver variants.
///
/// `evaluate` is a pure function of `(t, state)`: it returns the time
/// derivative `dT/dt` for the finite-element solvers, and the next-state
/// map for the finite-difference solver (a fixed linear recurrence rather
/// than an ODE right-hand side, so its `t` argument is ignored). Callers
/// integrating in time are expected to pass monotonically non-decreasing
/// `t`.
pub trait ThermalSolver {
    /// Evaluate the solver at time `t` and state `state`
    fn evaluate(&self, t: f64, state: ArrayView1<f64>) -> Result<Array1<f64>, SolverError>;

    /// The undeformed node positions the solver was constructed on
    fn reference_mesh(&self) -> &Mesh1D;

    /// Number of nodes, which is also the state-vector length
    fn n_nodes(&self) -> usize {
        self.reference_mesh().n_nodes()
    }
}

/// Dimension check at the evaluator boundary; a mismatch is a programmer
/// error on the caller's side
pub(crate) fn check_state_len(expected: usize, state: &ArrayView1<f64>) -> Result<(), SolverError> {
    if state.len() != expected {
        return Err(SolverError::InvalidState {
            expected,
            found: state.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insulated_end_has_zero_flux() {
        assert_eq!(BoundaryCondition::Insulated.flux(), 0.0);
        assert_eq!(BoundaryCondition::Flux(1.0e5).flux(), 1.0e5);
    }

    #[test]
    fn state_length_mismatch() {
        let state = Array1::<f64>::zeros(5);
        let err = check_state_len(6, &state.view()).unwrap_err();
        assert_eq!(
            err,
            SolverError::InvalidState {
                expected: 6,
                found: 5
            }
        );
        assert!(check_state_len(5, &state.view()).is_ok());
    }
}
