//! Lifecycle economics of microgrid projects.
//!
//! Calculates the net present cost (NPC) and the levelized cost of electricity (LCOE) of a
//! microgrid made of a dispatchable generator, an energy storage and non-dispatchable sources,
//! given statistics about how the microgrid is operated.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod cli;
pub mod cost_factors;
pub mod economics;
pub mod finance;
pub mod input;
pub mod log;
pub mod microgrid;
pub mod operation;
pub mod output;
pub mod settings;
pub mod units;

#[cfg(test)]
mod fixture;

/// Get the directory in which program configuration files are stored
///
/// Falls back to the current directory if the platform has no configuration directory.
pub fn get_mgcost_config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_default();
    path.push("mgcost");
    path
}
