/*! Concatenation of extraction batches

Extraction writes one file per dump split (`*.csv` or `*.csv.gz`).
This merges them back into a single split file.
!*/
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::Error;
use crate::io;

/// List batch files in `src`, sorted by path.
pub fn batch_files(src: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    for pattern in ["*.csv", "*.csv.gz"] {
        let pattern = src.join(pattern);
        debug!("looking for {:?}", pattern);
        for path in glob::glob(&pattern.to_string_lossy())? {
            files.push(path?);
        }
    }
    files.sort();
    Ok(files)
}

/// Concatenate every batch file of `src` into `dst`, returning the number of records written.
pub fn concat(src: &Path, dst: &Path) -> Result<usize, Error> {
    let files = batch_files(src)?;
    if files.is_empty() {
        return Err(Error::Custom(format!("no csv file found in {:?}", src)));
    }

    let nb_files = files.len();
    let mut records = Vec::new();
    for (idx, path) in files.iter().enumerate() {
        info!("processing file {} out of {}: {:?}", idx + 1, nb_files, path);
        records.extend(io::read_records(path)?);
    }

    info!("collected {} records", records.len());
    io::write_records(dst, &records)?;
    Ok(records.len())
}
