//! Common routines for handling input data.
use crate::microgrid::Microgrid;
use crate::operation::OperationStats;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::fs;
use std::path::Path;

/// Parse a TOML file at the specified path.
///
/// # Arguments
///
/// * `file_path` - Path to the TOML file
///
/// # Returns
///
/// * The deserialised TOML data or an error if the file could not be read or parsed.
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let toml_str = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    let toml_data = toml::from_str(&toml_str).with_context(|| input_err_msg(file_path))?;
    Ok(toml_data)
}

/// Format an error message to include the file path.
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().display())
}

/// Format an error message about an invalid value for a named parameter
pub fn invalid_value_msg<T: Display>(param: &str, value: T, requirement: &str) -> String {
    format!("`{param}` must be {requirement} (got {value})")
}

/// Load the microgrid description and operation statistics from the specified model directory.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model configuration files
///
/// # Returns
///
/// The microgrid and the statistics of its simulated operation, or an error.
pub fn load_model<P: AsRef<Path>>(model_dir: P) -> Result<(Microgrid, OperationStats)> {
    let microgrid = Microgrid::from_path(model_dir.as_ref())?;
    let oper_stats = OperationStats::from_path(model_dir.as_ref())?;

    Ok((microgrid, oper_stats))
}
