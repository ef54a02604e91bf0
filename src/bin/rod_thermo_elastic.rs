use rod_rs::ale::AleThermoElasticSolver;
use rod_rs::config::AleParameters;
use rod_rs::solver::ThermalSolver;
use rod_rs::timestepping::{ExplicitStepper, RungeKutta44};
use rod_rs::utilities::write_profile;

use ndarray::prelude::*;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use structopt::StructOpt;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Moving-mesh thermo-elastic run. Every sample writes the temperature
/// against the deformed node positions at that instant, so the output
/// carries the mesh-motion history alongside the trajectory.
#[derive(StructOpt, Debug)]
#[structopt(name = "rod_thermo_elastic", rename_all = "verbatim")]
struct Opt {
    /// Maximum simulation time
    #[structopt(long, default_value = "10.0")]
    t_max: f64,
    /// Timestep; must resolve the stiffest (most shrunken) mesh reached
    #[structopt(long, default_value = "0.002")]
    dt: f64,
    /// Number of trajectory samples to write
    #[structopt(long, default_value = "100")]
    n_samples: usize,
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

    let params: AleParameters = match &opt.config_path {
        Some(path) => {
            let config_file = fs::File::open(path)?;
            let reader = BufReader::new(config_file);
            serde_json::from_reader(reader)?
        }
        None => AleParameters::default(),
    };

    println!("{:#?}", opt);
    println!("{:#?}", params);

    let solver = AleThermoElasticSolver::new(params.clone())?;

    let dir_path = Path::new(&opt.dir);
    fs::create_dir_all(dir_path)?;

    let file = fs::File::create(dir_path.join("thermo_elastic_trajectory.csv"))?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "t x T")?;

    let n_steps = (opt.t_max / opt.dt).round() as usize;
    let output_interval = (n_steps / opt.n_samples).max(1);

    let stepper = RungeKutta44;
    let mut state = Array1::from_elem(solver.n_nodes(), params.initial_temperature);
    let mut t = params.t_0;

    let mesh = solver.deformed_mesh(t)?;
    write_profile(&mut writer, t, mesh.nodes(), state.view())?;

    for i in 1..=n_steps {
        // A degenerate mesh aborts the trajectory; there is no point
        // retrying with the same deformation
        stepper.step(&solver, t, &mut state, opt.dt)?;
        t += opt.dt;

        if i % output_interval == 0 {
            let mesh = solver.deformed_mesh(t)?;
            write_profile(&mut writer, t, mesh.nodes(), state.view())?;
            println!(
                "t = {:.3}, domain = [{:.4e}, {:.4e}], T_left = {:.2} K",
                t,
                mesh.nodes()[0],
                mesh.nodes()[mesh.n_nodes() - 1],
                state[0]
            );
        }
    }
    writer.flush()?;

    Ok(())
}
