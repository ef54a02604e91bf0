use rod_rs::config::{AleParameters, FdmParameters, FemParameters};
use rod_rs::utilities::dump_default_to_json_file;

use std::fs;
use std::path::Path;
use structopt::StructOpt;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Write the default JSON configuration for each solver, as a starting
/// point for `--config` runs
#[derive(StructOpt, Debug)]
#[structopt(name = "make_config_file", rename_all = "verbatim")]
struct Opt {
    /// Directory to write the config files into
    #[structopt(long, default_value = ".")]
    dir: String,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    let dir_path = Path::new(&opt.dir);
    fs::create_dir_all(dir_path)?;

    let fdm_path = dir_path.join("fdm_config.json");
    let fem_path = dir_path.join("fem_config.json");
    let ale_path = dir_path.join("ale_config.json");

    dump_default_to_json_file::<FdmParameters>(fdm_path.to_str().ok_or("non-utf8 path")?)?;
    dump_default_to_json_file::<FemParameters>(fem_path.to_str().ok_or("non-utf8 path")?)?;
    dump_default_to_json_file::<AleParameters>(ale_path.to_str().ok_or("non-utf8 path")?)?;

    println!(
        "wrote {}, {}, {}",
        fdm_path.display(),
        fem_path.display(),
        ale_path.display()
    );

    Ok(())
}
