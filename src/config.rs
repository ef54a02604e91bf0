use crate::error::SolverError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Flat `name -> value` parameter bundle accepted by every solver
/// constructor via `from_map`. Counts are passed as (integral) floats.
pub type ParameterMap = HashMap<String, f64>;

fn require(map: &ParameterMap, name: &str) -> Result<f64, SolverError> {
    map.get(name)
        .copied()
        .ok_or_else(|| SolverError::MissingParameter(name.to_string()))
}

fn require_count(map: &ParameterMap, name: &'static str) -> Result<usize, SolverError> {
    let value = require(map, name)?;
    if value < 1.0 || value.fract() != 0.0 {
        return Err(SolverError::InvalidParameter { name, value });
    }
    Ok(value as usize)
}

/// Reject keys that no parameter corresponds to, so a misspelled name fails
/// construction instead of being silently ignored
fn reject_unknown(map: &ParameterMap, known: &[&str]) -> Result<(), SolverError> {
    for key in map.keys() {
        if !known.contains(&key.as_str()) {
            return Err(SolverError::UnknownParameter(key.clone()));
        }
    }
    Ok(())
}

fn check_positive(name: &'static str, value: f64) -> Result<(), SolverError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SolverError::InvalidParameter { name, value })
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), SolverError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SolverError::InvalidParameter { name, value })
    }
}

/// Configuration of the explicit finite-difference solver
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FdmParameters {
    pub density: f64,
    pub specific_heat: f64,
    pub thermal_conductivity: f64,
    pub length: f64,
    pub number_nodes: usize,
    pub dt: f64,
    pub heat_flux: f64,
    pub initial_temperature: f64,
}

impl FdmParameters {
    const KEYS: [&'static str; 8] = [
        "density",
        "specific_heat",
        "thermal_conductivity",
        "length",
        "number_nodes",
        "dt",
        "heat_flux",
        "initial_temperature",
    ];

    /// Build and validate from a flat parameter bundle
    pub fn from_map(map: &ParameterMap) -> Result<Self, SolverError> {
        reject_unknown(map, &Self::KEYS)?;
        let params = FdmParameters {
            density: require(map, "density")?,
            specific_heat: require(map, "specific_heat")?,
            thermal_conductivity: require(map, "thermal_conductivity")?,
            length: require(map, "length")?,
            number_nodes: require_count(map, "number_nodes")?,
            dt: require(map, "dt")?,
            heat_flux: require(map, "heat_flux")?,
            initial_temperature: require(map, "initial_temperature")?,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), SolverError> {
        check_positive("density", self.density)?;
        check_positive("specific_heat", self.specific_heat)?;
        check_positive("thermal_conductivity", self.thermal_conductivity)?;
        check_positive("length", self.length)?;
        check_positive("dt", self.dt)?;
        check_finite("heat_flux", self.heat_flux)?;
        check_finite("initial_temperature", self.initial_temperature)?;
        // The interior stencil needs at least one interior node
        if self.number_nodes < 3 {
            return Err(SolverError::InvalidParameter {
                name: "number_nodes",
                value: self.number_nodes as f64,
            });
        }
        Ok(())
    }

    /// Uniform grid spacing
    pub fn dx(&self) -> f64 {
        self.length / (self.number_nodes - 1) as f64
    }

    /// Thermal diffusivity `alpha = k / (rho c)`
    pub fn diffusivity(&self) -> f64 {
        self.thermal_conductivity / (self.density * self.specific_heat)
    }
}

impl Default for FdmParameters {
    fn default() -> Self {
        FdmParameters {
            density: 4500.0,
            specific_heat: 522.0,
            thermal_conductivity: 21.9,
            length: 0.02,
            number_nodes: 51,
            dt: 1.0e-3,
            heat_flux: 1.0e5,
            initial_temperature: 300.0,
        }
    }
}

/// Configuration of the static-mesh finite-element solver
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FemParameters {
    pub density: f64,
    pub specific_heat: f64,
    pub thermal_conductivity: f64,
    pub length: f64,
    pub number_elements: usize,
    pub heat_flux: f64,
    pub initial_temperature: f64,
}

impl FemParameters {
    const KEYS: [&'static str; 7] = [
        "density",
        "specific_heat",
        "thermal_conductivity",
        "length",
        "number_elements",
        "heat_flux",
        "initial_temperature",
    ];

    /// Build and validate from a flat parameter bundle
    pub fn from_map(map: &ParameterMap) -> Result<Self, SolverError> {
        reject_unknown(map, &Self::KEYS)?;
        let params = FemParameters {
            density: require(map, "density")?,
            specific_heat: require(map, "specific_heat")?,
            thermal_conductivity: require(map, "thermal_conductivity")?,
            length: require(map, "length")?,
            number_elements: require_count(map, "number_elements")?,
            heat_flux: require(map, "heat_flux")?,
            initial_temperature: require(map, "initial_temperature")?,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), SolverError> {
        check_positive("density", self.density)?;
        check_positive("specific_heat", self.specific_heat)?;
        check_positive("thermal_conductivity", self.thermal_conductivity)?;
        check_positive("length", self.length)?;
        check_finite("heat_flux", self.heat_flux)?;
        check_finite("initial_temperature", self.initial_temperature)?;
        Ok(())
    }

    /// Volumetric heat capacity `rho c`
    pub fn heat_capacity(&self) -> f64 {
        self.density * self.specific_heat
    }
}

impl Default for FemParameters {
    fn default() -> Self {
        FemParameters {
            density: 4500.0,
            specific_heat: 522.0,
            thermal_conductivity: 21.9,
            length: 0.02,
            number_elements: 50,
            heat_flux: 1.0e5,
            initial_temperature: 300.0,
        }
    }
}

/// Configuration of the moving-mesh thermo-elastic solver
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AleParameters {
    pub density: f64,
    pub specific_heat: f64,
    pub thermal_conductivity: f64,
    pub initial_length: f64,
    pub t_0: f64,
    pub number_elements: usize,
    pub heat_flux: f64,
    pub initial_temperature: f64,
    /// Constant mesh-velocity scale used by the default shrink/expand law
    pub mesh_velocity: f64,
}

impl AleParameters {
    const KEYS: [&'static str; 9] = [
        "density",
        "specific_heat",
        "thermal_conductivity",
        "initial_length",
        "t_0",
        "number_elements",
        "heat_flux",
        "initial_temperature",
        "mesh_velocity",
    ];

    /// Build and validate from a flat parameter bundle
    pub fn from_map(map: &ParameterMap) -> Result<Self, SolverError> {
        reject_unknown(map, &Self::KEYS)?;
        let params = AleParameters {
            density: require(map, "density")?,
            specific_heat: require(map, "specific_heat")?,
            thermal_conductivity: require(map, "thermal_conductivity")?,
            initial_length: require(map, "initial_length")?,
            t_0: require(map, "t_0")?,
            number_elements: require_count(map, "number_elements")?,
            heat_flux: require(map, "heat_flux")?,
            initial_temperature: require(map, "initial_temperature")?,
            mesh_velocity: require(map, "mesh_velocity")?,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), SolverError> {
        check_positive("density", self.density)?;
        check_positive("specific_heat", self.specific_heat)?;
        check_positive("thermal_conductivity", self.thermal_conductivity)?;
        check_positive("initial_length", self.initial_length)?;
        check_finite("t_0", self.t_0)?;
        check_finite("heat_flux", self.heat_flux)?;
        check_finite("initial_temperature", self.initial_temperature)?;
        check_finite("mesh_velocity", self.mesh_velocity)?;
        Ok(())
    }

    /// Volumetric heat capacity `rho c`
    pub fn heat_capacity(&self) -> f64 {
        self.density * self.specific_heat
    }
}

impl Default for AleParameters {
    fn default() -> Self {
        AleParameters {
            density: 4500.0,
            specific_heat: 522.0,
            thermal_conductivity: 21.9,
            initial_length: 0.02,
            t_0: 0.0,
            number_elements: 20,
            heat_flux: 1.0e5,
            initial_temperature: 300.0,
            mesh_velocity: 1.0e-3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fdm_map() -> ParameterMap {
        let mut map = ParameterMap::new();
        map.insert("density".to_string(), 4500.0);
        map.insert("specific_heat".to_string(), 522.0);
        map.insert("thermal_conductivity".to_string(), 21.9);
        map.insert("length".to_string(), 0.02);
        map.insert("number_nodes".to_string(), 51.0);
        map.insert("dt".to_string(), 1.0e-3);
        map.insert("heat_flux".to_string(), 1.0e5);
        map.insert("initial_temperature".to_string(), 300.0);
        map
    }

    #[test]
    fn fdm_from_map() {
        let params = FdmParameters::from_map(&fdm_map()).unwrap();
        assert_eq!(params, FdmParameters::default());
    }

    #[test]
    fn missing_key_is_an_error() {
        let mut map = fdm_map();
        map.remove("density");
        let err = FdmParameters::from_map(&map).unwrap_err();
        assert_eq!(err, SolverError::MissingParameter("density".to_string()));
    }

    #[test]
    fn misspelled_key_is_an_error() {
        let mut map = fdm_map();
        map.remove("density");
        map.insert("densty".to_string(), 4500.0);
        let err = FdmParameters::from_map(&map).unwrap_err();
        assert_eq!(err, SolverError::UnknownParameter("densty".to_string()));
    }

    #[test]
    fn non_physical_value_is_an_error() {
        let mut map = fdm_map();
        map.insert("density".to_string(), -1.0);
        let err = FdmParameters::from_map(&map).unwrap_err();
        assert_eq!(
            err,
            SolverError::InvalidParameter {
                name: "density",
                value: -1.0
            }
        );
    }

    #[test]
    fn fractional_count_is_an_error() {
        let mut map = fdm_map();
        map.insert("number_nodes".to_string(), 50.5);
        assert!(FdmParameters::from_map(&map).is_err());
    }

    #[test]
    fn too_few_nodes_is_an_error() {
        let mut map = fdm_map();
        map.insert("number_nodes".to_string(), 2.0);
        assert!(FdmParameters::from_map(&map).is_err());
    }

    #[test]
    fn derived_quantities() {
        let params = FdmParameters::default();
        assert!((params.dx() - 0.02 / 50.0).abs() < 1.0e-15);
        assert!((params.diffusivity() - 21.9 / (4500.0 * 522.0)).abs() < 1.0e-15);
    }

    #[test]
    fn json_round_trip() {
        let params = AleParameters::default();
        let json = serde_json::to_string(&params).unwrap();
        let back: AleParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
    }

    #[test]
    fn unknown_json_field_is_rejected() {
        let json = r#"{
            "density": 4500.0,
            "specific_heat": 522.0,
            "thermal_conductivity": 21.9,
            "length": 0.02,
            "number_elements": 50,
            "heat_flux": 1.0e5,
            "initial_temperature": 300.0,
            "number_elments": 50
        }"#;
        assert!(serde_json::from_str::<FemParameters>(json).is_err());
    }
}
