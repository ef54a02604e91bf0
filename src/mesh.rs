use crate::error::SolverError;
use ndarray::prelude::*;

/// Geometry of a single two-node element on the current (possibly deformed)
/// mesh. Element `e` connects nodes `e` and `e + 1`.
#[derive(Clone, Copy, Debug)]
pub struct Element {
    pub index: usize,
    pub x_left: f64,
    pub x_right: f64,
}

impl Element {
    /// Element length
    pub fn dx(&self) -> f64 {
        self.x_right - self.x_left
    }

    /// Midpoint, the image of `xi = 0` under the reference-to-physical map
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.x_left + self.x_right)
    }

    /// Jacobian of the map from `xi` in `[-1, 1]` to physical coordinates
    pub fn jacobian(&self) -> f64 {
        0.5 * self.dx()
    }

    /// Global node indices the element's local matrices scatter into
    pub fn nodes(&self) -> [usize; 2] {
        [self.index, self.index + 1]
    }
}

/// Ordered node positions along the rod. Invariant: positions are strictly
/// increasing, so every element has positive length.
#[derive(Clone, Debug)]
pub struct Mesh1D {
    nodes: Array1<f64>,
}

impl Mesh1D {
    /// Create a mesh with uniformly spaced nodes over `[0, length]`
    pub fn uniform(length: f64, n_elements: usize) -> Self {
        Mesh1D {
            nodes: Array::linspace(0.0, length, n_elements + 1),
        }
    }

    pub fn from_nodes(nodes: Array1<f64>) -> Self {
        Mesh1D { nodes }
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_elements(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Node positions
    pub fn nodes(&self) -> ArrayView1<f64> {
        self.nodes.view()
    }

    pub fn element(&self, e: usize) -> Element {
        Element {
            index: e,
            x_left: self.nodes[e],
            x_right: self.nodes[e + 1],
        }
    }

    /// Returns an iterator over the elements
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        (0..self.n_elements()).map(move |e| self.element(e))
    }

    /// Apply a displacement field `u(x)` to every node, producing the
    /// deformed mesh. Fails with `MeshDegeneracy` if any element collapses
    /// to zero or negative length — there is no inversion check downstream
    /// to self-heal, so the error must surface here.
    pub fn displaced(&self, u: impl Fn(f64) -> f64) -> Result<Mesh1D, SolverError> {
        let nodes = self.nodes.mapv(|x| x + u(x));
        for e in 0..nodes.len() - 1 {
            let length = nodes[e + 1] - nodes[e];
            if length <= 0.0 {
                return Err(SolverError::MeshDegeneracy { element: e, length });
            }
        }
        Ok(Mesh1D { nodes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn uniform_mesh_nodes() {
        let mesh = Mesh1D::uniform(1.0, 2);
        assert_eq!(mesh.n_nodes(), 3);
        assert_eq!(mesh.n_elements(), 2);
        assert_abs_diff_eq!(mesh.nodes()[0], 0.0);
        assert_abs_diff_eq!(mesh.nodes()[1], 0.5);
        assert_abs_diff_eq!(mesh.nodes()[2], 1.0);
    }

    #[test]
    fn element_geometry() {
        let mesh = Mesh1D::uniform(2.0, 4);
        let element = mesh.element(1);
        assert_eq!(element.nodes(), [1, 2]);
        assert_abs_diff_eq!(element.dx(), 0.5);
        assert_abs_diff_eq!(element.midpoint(), 0.75);
        assert_abs_diff_eq!(element.jacobian(), 0.25);
    }

    #[test]
    fn elements_iter() {
        let mesh = Mesh1D::uniform(1.0, 10);
        for (e, element) in mesh.elements().enumerate() {
            assert_eq!(element.index, e);
            assert_abs_diff_eq!(element.x_left, mesh.nodes()[e]);
            assert_abs_diff_eq!(element.x_right, mesh.nodes()[e + 1]);
        }
    }

    #[test]
    fn zero_displacement_is_identity() {
        let mesh = Mesh1D::uniform(1.0, 5);
        let displaced = mesh.displaced(|_| 0.0).unwrap();
        for (a, b) in mesh.nodes().iter().zip(displaced.nodes().iter()) {
            assert_abs_diff_eq!(a, b);
        }
    }

    #[test]
    fn uniform_shrink_preserves_ordering() {
        // Linear ramp anchored at the right end, as in the moving-mesh solver
        let mesh = Mesh1D::uniform(1.0, 4);
        let displaced = mesh.displaced(|x| 0.5 * (1.0 - x)).unwrap();
        assert_abs_diff_eq!(displaced.nodes()[0], 0.5);
        assert_abs_diff_eq!(displaced.nodes()[4], 1.0);
        assert_abs_diff_eq!(displaced.element(0).dx(), 0.125);
    }

    #[test]
    fn collapsing_element_is_degenerate() {
        let mesh = Mesh1D::uniform(1.0, 4);
        // Move every node to the right end
        let err = mesh.displaced(|x| 1.0 - x).unwrap_err();
        assert!(matches!(err, SolverError::MeshDegeneracy { element: 0, .. }));
    }

    #[test]
    fn folding_mesh_is_degenerate() {
        let mesh = Mesh1D::uniform(1.0, 2);
        // Push the middle node past the right end
        let err = mesh
            .displaced(|x| if x == 0.5 { 0.75 } else { 0.0 })
            .unwrap_err();
        assert!(matches!(
            err,
            SolverError::MeshDegeneracy { element: 1, length } if length < 0.0
        ));
    }
}
