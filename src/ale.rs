use crate::assembly::{assemble_advection, assemble_forcing, assemble_mass, assemble_stiffness};
use crate::config::AleParameters;
use crate::error::SolverError;
use crate::linalg::pseudo_inverse;
use crate::mesh::Mesh1D;
use crate::solver::{check_state_len, BoundaryCondition, ThermalSolver};
use ndarray::prelude::*;

/// Prescribed mesh-velocity scale `v_m(t)`. The reference motion uses a
/// constant, but the shrink/expand law is pluggable so alternate policies
/// can be substituted without touching the assembly code.
#[derive(Clone, Copy, Debug)]
pub enum MeshVelocity {
    Constant(f64),
    TimeDependent(fn(f64) -> f64),
}

impl MeshVelocity {
    pub fn at(&self, t: f64) -> f64 {
        match self {
            MeshVelocity::Constant(v) => *v,
            MeshVelocity::TimeDependent(f) => f(t),
        }
    }
}

/// Moving-mesh (arbitrary Lagrangian-Eulerian) thermo-elastic solver.
///
/// Only the reference mesh and the configuration persist; every evaluation
/// deforms the mesh from the prescribed displacement field, reassembles the
/// mass, stiffness and advection operators over the deformed geometry, and
/// applies the pseudo-inverse of the fresh mass matrix. Nothing is cached
/// between calls, so each evaluation is a pure function of `(t, T)`.
pub struct AleThermoElasticSolver {
    params: AleParameters,
    reference_mesh: Mesh1D,
    mesh_velocity: MeshVelocity,
    left_bc: BoundaryCondition,
    right_bc: BoundaryCondition,
}

impl AleThermoElasticSolver {
    /// Create a solver whose mesh-velocity scale is the configured constant
    pub fn new(params: AleParameters) -> Result<Self, SolverError> {
        let mesh_velocity = MeshVelocity::Constant(params.mesh_velocity);
        Self::with_mesh_velocity(params, mesh_velocity)
    }

    /// Create a solver with an arbitrary shrink/expand law `v_m(t)`
    pub fn with_mesh_velocity(
        params: AleParameters,
        mesh_velocity: MeshVelocity,
    ) -> Result<Self, SolverError> {
        params.validate()?;

        let reference_mesh = Mesh1D::uniform(params.initial_length, params.number_elements);
        let left_bc = BoundaryCondition::Flux(params.heat_flux);

        Ok(AleThermoElasticSolver {
            params,
            reference_mesh,
            mesh_velocity,
            left_bc,
            right_bc: BoundaryCondition::Insulated,
        })
    }

    /// Mesh velocity field `v(t, x) = v_m(t) (1 - x / L0)`: maximal at the
    /// left end, zero at the anchored right end
    pub fn velocity(&self, t: f64, x: f64) -> f64 {
        self.mesh_velocity.at(t) * (1.0 - x / self.params.initial_length)
    }

    /// Displacement field `u(t, x) = v_m(t) (t - t_0) (1 - x / L0)`, the
    /// time integral of the velocity field while `v_m` is constant
    pub fn displacement(&self, t: f64, x: f64) -> f64 {
        self.mesh_velocity.at(t) * (t - self.params.t_0) * (1.0 - x / self.params.initial_length)
    }

    /// Deformed node positions at time `t`
    pub fn deformed_mesh(&self, t: f64) -> Result<Mesh1D, SolverError> {
        self.reference_mesh
            .displaced(|x| self.displacement(t, x))
    }

    pub fn params(&self) -> &AleParameters {
        &self.params
    }
}

impl ThermalSolver for AleThermoElasticSolver {
    /// `dT/dt = M^+ (f - (K - C) T)` on the mesh deformed to time `t`.
    ///
    /// The advection matrix enters with the opposite sign to the stiffness:
    /// mesh-relative transport opposes conduction as the domain moves.
    /// `K - C` is load-bearing; `K + C` is a different (wrong) physics.
    fn evaluate(&self, t: f64, state: ArrayView1<f64>) -> Result<Array1<f64>, SolverError> {
        check_state_len(self.reference_mesh.n_nodes(), &state)?;

        let mesh = self.deformed_mesh(t)?;
        let heat_capacity = self.params.heat_capacity();

        let mass = assemble_mass(&mesh, heat_capacity);
        let stiffness = assemble_stiffness(&mesh, self.params.thermal_conductivity);
        let advection = assemble_advection(&mesh, heat_capacity, |x| self.velocity(t, x));
        let forcing = assemble_forcing(mesh.n_nodes(), self.left_bc, self.right_bc);

        let mass_pinv = pseudo_inverse(&mass)?;
        let transport = &stiffness - &advection;
        let residual = &forcing - &transport.dot(&state);
        Ok(mass_pinv.dot(&residual))
    }

    fn reference_mesh(&self) -> &Mesh1D {
        &self.reference_mesh
    }
}
