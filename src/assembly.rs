//! Global operator assembly: fresh zero-initialised dense matrices, filled
//! by scatter-adding each element's local block at its two node indices.
//! Contributions at shared nodes sum, which is what preserves conservation
//! on non-uniform deformed meshes.

use crate::element::{local_advection, local_mass, local_stiffness};
use crate::mesh::Mesh1D;
use crate::solver::BoundaryCondition;
use ndarray::prelude::*;

/// Add a local 2x2 block into the global matrix at the element's nodes
fn scatter(global: &mut Array2<f64>, nodes: [usize; 2], local: [[f64; 2]; 2]) {
    for (i, &gi) in nodes.iter().enumerate() {
        for (j, &gj) in nodes.iter().enumerate() {
            global[(gi, gj)] += local[i][j];
        }
    }
}

/// Global consistent mass matrix
pub fn assemble_mass(mesh: &Mesh1D, heat_capacity: f64) -> Array2<f64> {
    let n = mesh.n_nodes();
    let mut mass = Array2::zeros((n, n));
    for element in mesh.elements() {
        scatter(&mut mass, element.nodes(), local_mass(heat_capacity, &element));
    }
    mass
}

/// Global conduction stiffness matrix
pub fn assemble_stiffness(mesh: &Mesh1D, conductivity: f64) -> Array2<f64> {
    let n = mesh.n_nodes();
    let mut stiffness = Array2::zeros((n, n));
    for element in mesh.elements() {
        scatter(
            &mut stiffness,
            element.nodes(),
            local_stiffness(conductivity, &element),
        );
    }
    stiffness
}

/// Global advection matrix for the given velocity field, sampled at the
/// quadrature points of each (deformed) element
pub fn assemble_advection(
    mesh: &Mesh1D,
    heat_capacity: f64,
    velocity: impl Fn(f64) -> f64,
) -> Array2<f64> {
    let n = mesh.n_nodes();
    let mut advection = Array2::zeros((n, n));
    for element in mesh.elements() {
        scatter(
            &mut advection,
            element.nodes(),
            local_advection(heat_capacity, &element, &velocity),
        );
    }
    advection
}

/// Forcing vector: boundary fluxes enter the weak form as point loads on
/// the two end nodes; interior entries stay zero
pub fn assemble_forcing(
    n_nodes: usize,
    left: BoundaryCondition,
    right: BoundaryCondition,
) -> Array1<f64> {
    let mut forcing = Array1::zeros(n_nodes);
    forcing[0] = left.flux();
    forcing[n_nodes - 1] = right.flux();
    forcing
}
