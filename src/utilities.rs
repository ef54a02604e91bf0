use ndarray::prelude::*;
use serde::Serialize;
use std::fs;
use std::io::{BufWriter, Write};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Write the `Default` configuration of `T` to a JSON file
pub fn dump_default_to_json_file<T>(filename: &str) -> Result<()>
where
    T: Default + Serialize,
{
    let file = fs::File::create(filename)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &T::default())?;
    Ok(())
}

/// Write one `t x T` row per node in long format, with a blank line after
/// the sample so plotting tools can split the trajectory into blocks. For
/// the moving-mesh solver `x` carries the deformed node positions at `t`.
pub fn write_profile(
    mut writer: impl Write,
    t: f64,
    x: ArrayView1<f64>,
    temperature: ArrayView1<f64>,
) -> std::io::Result<()> {
    for (x_i, temperature_i) in x.iter().zip(temperature.iter()) {
        writeln!(writer, "{:.6e} {:.6e} {:.6e}", t, x_i, temperature_i)?;
    }
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_format() {
        let x = ndarray::array![0.0, 0.5];
        let temperature = ndarray::array![300.0, 301.0];

        let mut output = Vec::new();
        write_profile(&mut output, 1.0, x.view(), temperature.view()).unwrap();

        assert_eq!(
            std::str::from_utf8(&output).unwrap(),
            "1.000000e0 0.000000e0 3.000000e2\n1.000000e0 5.000000e-1 3.010000e2\n\n"
        );
    }
}
