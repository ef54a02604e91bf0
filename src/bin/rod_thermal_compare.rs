use rod_rs::config::{FdmParameters, FemParameters};
use rod_rs::fdm::FdmSolver;
use rod_rs::fem::StaticFemSolver;
use rod_rs::solver::ThermalSolver;
use rod_rs::timestepping::{ExplicitStepper, RungeKutta44, SteadyStateDetector};
use rod_rs::utilities::write_profile;

use ndarray::prelude::*;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use structopt::StructOpt;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Cross-validation run: the finite-element solver integrated with RK4
/// against the finite-difference recurrence on the same physical
/// configuration.
#[derive(StructOpt, Debug)]
#[structopt(name = "rod_thermal_compare", rename_all = "verbatim")]
struct Opt {
    /// Maximum simulation time
    #[structopt(long, default_value = "10.0")]
    t_max: f64,
    /// Timestep shared by both solvers
    #[structopt(long, default_value = "0.001")]
    dt: f64,
    /// Number of trajectory samples to write per solver
    #[structopt(long, default_value = "100")]
    n_samples: usize,
    /// Threshold on |dT/dt| for the steady-state report
    #[structopt(long, default_value = "0.001")]
    ssd_threshold: f64,
    /// Output directory
    #[structopt(long, default_value = "res")]
    dir: String,
    /// Optional JSON file with the physical configuration
    #[structopt(long = "config")]
    config_path: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let opt = Opt::from_args();

    let fem_params: FemParameters = match &opt.config_path {
        Some(path) => {
            let config_file = fs::File::open(path)?;
            let reader = BufReader::new(config_file);
            serde_json::from_reader(reader)?
        }
        None => FemParameters::default(),
    };

    // Same rod, same physics, one node per element boundary
    let fdm_params = FdmParameters {
        density: fem_params.density,
        specific_heat: fem_params.specific_heat,
        thermal_conductivity: fem_params.thermal_conductivity,
        length: fem_params.length,
        number_nodes: fem_params.number_elements + 1,
        dt: opt.dt,
        heat_flux: fem_params.heat_flux,
        initial_temperature: fem_params.initial_temperature,
    };

    println!("{:#?}", opt);
    println!("{:#?}", fem_params);

    let fem_solver = StaticFemSolver::new(fem_params.clone())?;
    let fdm_solver = FdmSolver::new(fdm_params)?;
    println!("FDM diffusion number r = {:.4}", fdm_solver.diffusion_number());

    let dir_path = Path::new(&opt.dir);
    fs::create_dir_all(dir_path)?;

    let n_steps = (opt.t_max / opt.dt).round() as usize;
    let output_interval = (n_steps / opt.n_samples).max(1);

    // Finite-element trajectory
    let stepper = RungeKutta44;
    let ssd = SteadyStateDetector::new(opt.ssd_threshold);
    let mut reached_steady_state = false;

    let fem_file = fs::File::create(dir_path.join("fem_trajectory.csv"))?;
    let mut fem_writer = BufWriter::new(fem_file);
    writeln!(fem_writer, "t x T")?;

    let mut fem_state =
        Array1::from_elem(fem_solver.n_nodes(), fem_params.initial_temperature);
    let mut t = 0.0;
    write_profile(
        &mut fem_writer,
        t,
        fem_solver.reference_mesh().nodes(),
        fem_state.view(),
    )?;

    for i in 1..=n_steps {
        stepper.step(&fem_solver, t, &mut fem_state, opt.dt)?;
        t += opt.dt;

        if !reached_steady_state && ssd.is_steady_state(&fem_solver, t, fem_state.view())? {
            println!(
                "FEM steady state reached at t = {} (within threshold {:e})",
                t, opt.ssd_threshold
            );
            reached_steady_state = true;
        }

        if i % output_interval == 0 {
            write_profile(
                &mut fem_writer,
                t,
                fem_solver.reference_mesh().nodes(),
                fem_state.view(),
            )?;
        }
    }
    fem_writer.flush()?;

    // Finite-difference trajectory
    let fdm_file = fs::File::create(dir_path.join("fdm_trajectory.csv"))?;
    let mut fdm_writer = BufWriter::new(fdm_file);
    writeln!(fdm_writer, "t x T")?;

    let mut fdm_state =
        Array1::from_elem(fdm_solver.n_nodes(), fem_params.initial_temperature);
    write_profile(
        &mut fdm_writer,
        0.0,
        fdm_solver.reference_mesh().nodes(),
        fdm_state.view(),
    )?;

    for i in 1..=n_steps {
        fdm_state = fdm_solver.step(fdm_state.view())?;

        if i % output_interval == 0 {
            write_profile(
                &mut fdm_writer,
                i as f64 * opt.dt,
                fdm_solver.reference_mesh().nodes(),
                fdm_state.view(),
            )?;
        }
    }
    fdm_writer.flush()?;

    // Final-profile discrepancy between the two discretisations
    let max_difference = fem_state
        .iter()
        .zip(fdm_state.iter())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    println!(
        "max |T_fem - T_fdm| at t = {} is {:.3e} K",
        opt.t_max, max_difference
    );

    Ok(())
}
