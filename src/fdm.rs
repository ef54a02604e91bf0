use crate::config::FdmParameters;
use crate::error::SolverError;
use crate::mesh::Mesh1D;
use crate::solver::{check_state_len, BoundaryCondition, ThermalSolver};
use ndarray::prelude::*;

/// Explicit finite-difference solver for the transient rod.
///
/// The update matrix `A` and offset `b` are assembled once at construction;
/// stepping is then a single matrix-vector product, `T_{n+1} = A T_n + b`.
pub struct FdmSolver {
    params: FdmParameters,
    mesh: Mesh1D,
    update: Array2<f64>,
    offset: Array1<f64>,
}

impl FdmSolver {
    /// Create a solver with the reference boundary layout: prescribed flux
    /// on the left, insulated right end
    pub fn new(params: FdmParameters) -> Result<Self, SolverError> {
        let left = BoundaryCondition::Flux(params.heat_flux);
        Self::with_boundaries(params, left, BoundaryCondition::Insulated)
    }

    pub fn with_boundaries(
        params: FdmParameters,
        left: BoundaryCondition,
        right: BoundaryCondition,
    ) -> Result<Self, SolverError> {
        params.validate()?;

        let mesh = Mesh1D::uniform(params.length, params.number_nodes - 1);
        let (update, offset) = Self::assemble(&params, left, right);

        Ok(FdmSolver {
            params,
            mesh,
            update,
            offset,
        })
    }

    fn assemble(
        params: &FdmParameters,
        left: BoundaryCondition,
        right: BoundaryCondition,
    ) -> (Array2<f64>, Array1<f64>) {
        let n = params.number_nodes;
        let dx = params.dx();
        let r = params.diffusivity() * params.dt / dx.powi(2);

        let mut update = Array2::zeros((n, n));
        let mut offset = Array1::zeros(n);

        for i in 1..n - 1 {
            update[(i, i - 1)] = r;
            update[(i, i)] = 1.0 - 2.0 * r;
            update[(i, i + 1)] = r;
        }

        // Boundary rows close the stencil with a second-order ghost-node
        // reflection; the prescribed flux enters through the offset
        let flux_scale = 2.0 * params.dt / (params.density * params.specific_heat * dx);

        update[(0, 0)] = 1.0 - 2.0 * r;
        update[(0, 1)] = 2.0 * r;
        offset[0] = flux_scale * left.flux();

        update[(n - 1, n - 2)] = 2.0 * r;
        update[(n - 1, n - 1)] = 1.0 - 2.0 * r;
        offset[n - 1] = flux_scale * right.flux();

        (update, offset)
    }

    /// Apply the explicit update `T_{n+1} = A T_n + b`
    pub fn step(&self, state: ArrayView1<f64>) -> Result<Array1<f64>, SolverError> {
        check_state_len(self.params.number_nodes, &state)?;
        Ok(self.update.dot(&state) + &self.offset)
    }

    /// Diffusion number `r = alpha dt / dx^2`; the explicit scheme is
    /// stable for `r <= 1/2`
    pub fn diffusion_number(&self) -> f64 {
        self.params.diffusivity() * self.params.dt / self.params.dx().powi(2)
    }

    pub fn params(&self) -> &FdmParameters {
        &self.params
    }

    pub fn update_matrix(&self) -> ArrayView2<f64> {
        self.update.view()
    }

    pub fn offset(&self) -> ArrayView1<f64> {
        self.offset.view()
    }
}

impl ThermalSolver for FdmSolver {
    /// The recurrence is time-invariant, so `t` is ignored; the returned
    /// vector is the next state, not a derivative
    fn evaluate(&self, _t: f64, state: ArrayView1<f64>) -> Result<Array1<f64>, SolverError> {
        self.step(state)
    }

    fn reference_mesh(&self) -> &Mesh1D {
        &self.mesh
    }
}
