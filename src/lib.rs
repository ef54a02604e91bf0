pub mod ale;
pub mod assembly;
pub mod config;
pub mod element;
pub mod error;
pub mod fdm;
pub mod fem;
pub mod linalg;
pub mod mesh;
pub mod solver;
pub mod timestepping;
pub mod utilities;
