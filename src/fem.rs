use crate::assembly::{assemble_forcing, assemble_mass, assemble_stiffness};
use crate::config::FemParameters;
use crate::error::SolverError;
use crate::linalg::pseudo_inverse;
use crate::mesh::Mesh1D;
use crate::solver::{check_state_len, BoundaryCondition, ThermalSolver};
use ndarray::prelude::*;

/// Static-mesh finite-element solver: linear elements on a uniform mesh,
/// global operators assembled once at construction.
///
/// No essential boundary condition is imposed, so the consistent mass
/// matrix can be ill-conditioned; its Moore–Penrose pseudo-inverse is
/// therefore cached instead of factorising for a direct solve. The mesh is
/// fixed, making the cached `M^+` equivalent to recomputing it per call.
pub struct StaticFemSolver {
    params: FemParameters,
    mesh: Mesh1D,
    mass: Array2<f64>,
    mass_pinv: Array2<f64>,
    stiffness: Array2<f64>,
    forcing: Array1<f64>,
}

impl StaticFemSolver {
    /// Create a solver with the reference boundary layout: prescribed flux
    /// on the left, insulated right end
    pub fn new(params: FemParameters) -> Result<Self, SolverError> {
        let left = BoundaryCondition::Flux(params.heat_flux);
        Self::with_boundaries(params, left, BoundaryCondition::Insulated)
    }

    pub fn with_boundaries(
        params: FemParameters,
        left: BoundaryCondition,
        right: BoundaryCondition,
    ) -> Result<Self, SolverError> {
        params.validate()?;

        let mesh = Mesh1D::uniform(params.length, params.number_elements);
        let mass = assemble_mass(&mesh, params.heat_capacity());
        let mass_pinv = pseudo_inverse(&mass)?;
        let stiffness = assemble_stiffness(&mesh, params.thermal_conductivity);
        let forcing = assemble_forcing(mesh.n_nodes(), left, right);

        Ok(StaticFemSolver {
            params,
            mesh,
            mass,
            mass_pinv,
            stiffness,
            forcing,
        })
    }

    pub fn params(&self) -> &FemParameters {
        &self.params
    }

    pub fn mass(&self) -> ArrayView2<f64> {
        self.mass.view()
    }

    pub fn stiffness(&self) -> ArrayView2<f64> {
        self.stiffness.view()
    }

    pub fn forcing(&self) -> ArrayView1<f64> {
        self.forcing.view()
    }
}

impl ThermalSolver for StaticFemSolver {
    /// `dT/dt = M^+ (f - K T)`
    fn evaluate(&self, _t: f64, state: ArrayView1<f64>) -> Result<Array1<f64>, SolverError> {
        check_state_len(self.mesh.n_nodes(), &state)?;
        let residual = &self.forcing - &self.stiffness.dot(&state);
        Ok(self.mass_pinv.dot(&residual))
    }

    fn reference_mesh(&self) -> &Mesh1D {
        &self.mesh
    }
}
