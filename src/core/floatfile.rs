//! Read and write text files that store a series of floating-point
//! values, three per line for direction lists.

// std
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
// manysuns
use crate::core::error::{ManySunsError, Result};
use crate::core::geometry::Vector3f;
use crate::core::manysuns::Float;

pub fn read_float_file<P: AsRef<Path>>(path: P) -> Result<Vec<Float>> {
    let path: &Path = path.as_ref();
    let f = File::open(path).map_err(|e| ManySunsError::io(path, e))?;
    let reader = BufReader::new(f);
    let mut values: Vec<Float> = Vec::new();
    for (line_number, line_result) in reader.lines().enumerate() {
        let line: String = line_result.map_err(|e| ManySunsError::io(path, e))?;
        if line.is_empty() || line.starts_with('#') {
            // ignore comments
            continue;
        }
        for token in line.split_whitespace() {
            match token.parse::<Float>() {
                Ok(float) => values.push(float),
                Err(_) => {
                    return Err(ManySunsError::Render(format!(
                        "unexpected text {:?} at line {} of float file {:?}",
                        token,
                        line_number + 1,
                        path
                    )));
                }
            }
        }
    }
    Ok(values)
}

/// Read a direction list; the number of values has to be a multiple
/// of three.
pub fn read_vectors<P: AsRef<Path>>(path: P) -> Result<Vec<Vector3f>> {
    let values: Vec<Float> = read_float_file(path.as_ref())?;
    if values.len() % 3 != 0 {
        return Err(ManySunsError::Render(format!(
            "{} values in {:?} do not form 3D vectors",
            values.len(),
            path.as_ref()
        )));
    }
    Ok(values
        .chunks(3)
        .map(|c| Vector3f::new(c[0], c[1], c[2]))
        .collect())
}

/// Write one vector per line.
pub fn write_vectors<P: AsRef<Path>>(path: P, vectors: &[Vector3f]) -> Result<()> {
    let path: &Path = path.as_ref();
    let f = File::create(path).map_err(|e| ManySunsError::io(path, e))?;
    let mut writer = BufWriter::new(f);
    for v in vectors {
        writeln!(writer, "{}\t{}\t{}", v.x, v.y, v.z).map_err(|e| ManySunsError::io(path, e))?;
    }
    writer.flush().map_err(|e| ManySunsError::io(path, e))?;
    Ok(())
}
