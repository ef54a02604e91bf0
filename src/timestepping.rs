//! Explicit time integration for the derivative-returning solvers.
//!
//! The time integrator is a collaborator of the solver core, not part of
//! it: steppers only call `evaluate` as a pure function of `(t, state)` and
//! own the step size themselves. The finite-difference recurrence is not an
//! ODE right-hand side and is stepped directly where it is used.

use crate::error::SolverError;
use crate::solver::ThermalSolver;
use ndarray::prelude::*;

/// Trait for explicit timesteppers
pub trait ExplicitStepper {
    /// Advance `state` from `t` to `t + dt`
    fn step<S: ThermalSolver>(
        &self,
        solver: &S,
        t: f64,
        state: &mut Array1<f64>,
        dt: f64,
    ) -> Result<(), SolverError>;
}

/// Euler forward timestepper
pub struct EulerForward;

impl ExplicitStepper for EulerForward {
    fn step<S: ThermalSolver>(
        &self,
        solver: &S,
        t: f64,
        state: &mut Array1<f64>,
        dt: f64,
    ) -> Result<(), SolverError> {
        let k = solver.evaluate(t, state.view())?;
        state.scaled_add(dt, &k);
        Ok(())
    }
}

/// Fourth-order, four stage Runge-Kutta timestepper
pub struct RungeKutta44;

impl ExplicitStepper for RungeKutta44 {
    fn step<S: ThermalSolver>(
        &self,
        solver: &S,
        t: f64,
        state: &mut Array1<f64>,
        dt: f64,
    ) -> Result<(), SolverError> {
        let k_1 = solver.evaluate(t, state.view())?;

        let mut stage = state.clone();
        stage.scaled_add(0.5 * dt, &k_1);
        let k_2 = solver.evaluate(t + 0.5 * dt, stage.view())?;

        let mut stage = state.clone();
        stage.scaled_add(0.5 * dt, &k_2);
        let k_3 = solver.evaluate(t + 0.5 * dt, stage.view())?;

        let mut stage = state.clone();
        stage.scaled_add(dt, &k_3);
        let k_4 = solver.evaluate(t + dt, stage.view())?;

        state.scaled_add(dt / 6.0, &k_1);
        state.scaled_add(dt / 3.0, &k_2);
        state.scaled_add(dt / 3.0, &k_3);
        state.scaled_add(dt / 6.0, &k_4);
        Ok(())
    }
}

/// Detects steady state from the magnitude of the time derivative
#[derive(Clone)]
pub struct SteadyStateDetector {
    threshold: f64,
}

impl SteadyStateDetector {
    pub fn new(threshold: f64) -> Self {
        SteadyStateDetector { threshold }
    }

    pub fn is_steady_state<S: ThermalSolver>(
        &self,
        solver: &S,
        t: f64,
        state: ArrayView1<f64>,
    ) -> Result<bool, SolverError> {
        let derivative = solver.evaluate(t, state)?;
        Ok(derivative.iter().all(|value| value.abs() < self.threshold))
    }
}
