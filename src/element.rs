//! Local matrices for two-node linear elements.

use crate::mesh::Element;

/// 2-point Gauss–Legendre rule on `[-1, 1]` as `(point, weight)` pairs.
/// Integrates polynomials up to cubic exactly, which covers the
/// shape-function/velocity products assembled here.
pub const GAUSS_2: [(f64, f64); 2] = [(-0.5773502691896257, 1.0), (0.5773502691896257, 1.0)];

/// Linear shape functions on the reference element, evaluated at `xi`
pub fn shape_functions(xi: f64) -> [f64; 2] {
    [0.5 * (1.0 - xi), 0.5 * (1.0 + xi)]
}

/// Shape-function derivatives in physical coordinates; constant over a
/// linear element
pub fn shape_derivatives(dx: f64) -> [f64; 2] {
    [-1.0 / dx, 1.0 / dx]
}

/// Consistent mass matrix `(rho c dx / 6) [[2, 1], [1, 2]]`
pub fn local_mass(heat_capacity: f64, element: &Element) -> [[f64; 2]; 2] {
    let scale = heat_capacity * element.dx() / 6.0;
    [[2.0 * scale, scale], [scale, 2.0 * scale]]
}

/// Conduction stiffness matrix `(k / dx) [[1, -1], [-1, 1]]`
pub fn local_stiffness(conductivity: f64, element: &Element) -> [[f64; 2]; 2] {
    let scale = conductivity / element.dx();
    [[scale, -scale], [-scale, scale]]
}

/// Advection matrix for mesh-relative transport, integrated by Gauss
/// quadrature with the velocity field sampled at the physical image of each
/// quadrature point:
///
/// `C_e[m][n] = rho c * sum_q w_q v(x_q) J phi_m(xi_q) dphi_n/dx`
pub fn local_advection(
    heat_capacity: f64,
    element: &Element,
    velocity: impl Fn(f64) -> f64,
) -> [[f64; 2]; 2] {
    let dphi_dx = shape_derivatives(element.dx());
    let jacobian = element.jacobian();
    let midpoint = element.midpoint();

    let mut c = [[0.0; 2]; 2];
    for &(xi, weight) in GAUSS_2.iter() {
        let phi = shape_functions(xi);
        let v = velocity(midpoint + jacobian * xi);
        for m in 0..2 {
            for n in 0..2 {
                c[m][n] += weight * v * jacobian * phi[m] * dphi_dx[n];
            }
        }
    }

    for row in c.iter_mut() {
        for entry in row.iter_mut() {
            *entry *= heat_capacity;
        }
    }
    c
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_element() -> Element {
        Element {
            index: 0,
            x_left: 0.0,
            x_right: 1.0,
        }
    }

    #[test]
    fn shape_functions_partition_unity() {
        for &(xi, _) in GAUSS_2.iter() {
            let phi = shape_functions(xi);
            assert_abs_diff_eq!(phi[0] + phi[1], 1.0, epsilon = 1.0e-15);
        }
        assert_abs_diff_eq!(shape_functions(-1.0)[0], 1.0);
        assert_abs_diff_eq!(shape_functions(1.0)[1], 1.0);
    }

    #[test]
    fn quadrature_integrates_cubics_exactly() {
        // integral of xi^3 + xi^2 over [-1, 1] is 2/3
        let integral: f64 = GAUSS_2
            .iter()
            .map(|&(xi, w)| w * (xi.powi(3) + xi.powi(2)))
            .sum();
        assert_abs_diff_eq!(integral, 2.0 / 3.0, epsilon = 1.0e-14);
    }

    #[test]
    fn mass_matrix_total() {
        // Entries of Me sum to rho c dx: the element carries its full heat capacity
        let element = Element {
            index: 0,
            x_left: 0.2,
            x_right: 0.7,
        };
        let me = local_mass(3.0, &element);
        let total: f64 = me.iter().flatten().sum();
        assert_abs_diff_eq!(total, 3.0 * 0.5, epsilon = 1.0e-14);
        // Symmetric
        assert_abs_diff_eq!(me[0][1], me[1][0]);
    }

    #[test]
    fn stiffness_rows_sum_to_zero() {
        let ke = local_stiffness(21.9, &unit_element());
        assert_abs_diff_eq!(ke[0][0] + ke[0][1], 0.0);
        assert_abs_diff_eq!(ke[1][0] + ke[1][1], 0.0);
    }

    #[test]
    fn advection_vanishes_for_zero_velocity() {
        let ce = local_advection(1.0, &unit_element(), |_| 0.0);
        for row in ce.iter() {
            for &entry in row.iter() {
                assert_abs_diff_eq!(entry, 0.0);
            }
        }
    }

    #[test]
    fn advection_constant_velocity() {
        // For constant v, C_e = rho c v [[-1/2, 1/2], [-1/2, 1/2]] since
        // the integral of each shape function over the element is dx/2
        let ce = local_advection(2.0, &unit_element(), |_| 3.0);
        assert_abs_diff_eq!(ce[0][0], -3.0, epsilon = 1.0e-12);
        assert_abs_diff_eq!(ce[0][1], 3.0, epsilon = 1.0e-12);
        assert_abs_diff_eq!(ce[1][0], -3.0, epsilon = 1.0e-12);
        assert_abs_diff_eq!(ce[1][1], 3.0, epsilon = 1.0e-12);
    }

    #[test]
    fn advection_linear_velocity_is_exact() {
        // v(x) = x on the unit element: integral of phi_m(x) x dx is 1/6 for
        // phi_0 and 1/3 for phi_1, so C = [[-1/6, 1/6], [-1/3, 1/3]]
        let ce = local_advection(1.0, &unit_element(), |x| x);
        assert_abs_diff_eq!(ce[0][0], -1.0 / 6.0, epsilon = 1.0e-14);
        assert_abs_diff_eq!(ce[0][1], 1.0 / 6.0, epsilon = 1.0e-14);
        assert_abs_diff_eq!(ce[1][0], -1.0 / 3.0, epsilon = 1.0e-14);
        assert_abs_diff_eq!(ce[1][1], 1.0 / 3.0, epsilon = 1.0e-14);
    }
}
