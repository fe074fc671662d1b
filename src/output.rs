// src/output.rs
use ndarray::Array2;
use std::fs::File;
use std::io::{self, Write};

pub fn write_paths_to_csv(filename: &str, grid: &Array2<f64>) -> io::Result<()> {
    let mut file = File::create(filename)?;
    let columns: Vec<String> = (0..grid.ncols()).map(|j| format!("s_{}", j)).collect();
    writeln!(file, "path_id,{}", columns.join(","))?;
    for (i, row) in grid.rows().into_iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writeln!(file, "{},{}", i, cells.join(","))?;
    }
    Ok(())
}

pub fn write_summary_to_csv(filename: &str, summary_data: &[(&str, &str)]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    for (key, value) in summary_data {
        writeln!(file, "{},{}", key, value)?;
    }
    Ok(())
}
