//! Aggregated statistics of the simulated operation of a microgrid, read from `operation.toml`.
use crate::input::{input_err_msg, invalid_value_msg, read_toml};
use crate::units::{CyclesPerYear, EnergyPerYear, FuelPerYear, HoursPerYear};
use anyhow::{Context, Result, ensure};
use log::warn;
use serde::Deserialize;
use std::path::Path;

const OPERATION_STATS_FILE_NAME: &str = "operation.toml";

/// Operation statistics over one year of simulated operation.
///
/// These are produced by a dispatch simulation and are the only link between the operation of
/// the microgrid and its costs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OperationStats {
    /// Energy served to the load
    pub served_energy: EnergyPerYear,
    /// Hours of operation of the generator
    pub gen_hours: HoursPerYear,
    /// Fuel consumed by the generator
    pub gen_fuel: FuelPerYear,
    /// Number of charge/discharge cycles of the storage
    pub storage_cycles: CyclesPerYear,
}

/// Check that a statistic is finite and not negative
fn check_statistic(name: &str, value: f64) -> Result<()> {
    ensure!(
        value.is_finite() && value >= 0.0,
        invalid_value_msg(name, value, "a finite number greater than or equal to zero")
    );

    Ok(())
}

impl OperationStats {
    /// Read operation statistics from the specified model directory.
    ///
    /// # Arguments
    ///
    /// * `model_dir` - Folder containing model configuration files
    pub fn from_path<P: AsRef<Path>>(model_dir: P) -> Result<OperationStats> {
        let file_path = model_dir.as_ref().join(OPERATION_STATS_FILE_NAME);
        let oper_stats: OperationStats = read_toml(&file_path)?;

        oper_stats
            .validate()
            .with_context(|| input_err_msg(file_path))?;

        Ok(oper_stats)
    }

    /// Validate statistics after reading in file
    fn validate(&self) -> Result<()> {
        check_statistic("served_energy", self.served_energy.value())?;
        check_statistic("gen_hours", self.gen_hours.value())?;
        check_statistic("gen_fuel", self.gen_fuel.value())?;
        check_statistic("storage_cycles", self.storage_cycles.value())?;

        if self.served_energy == EnergyPerYear(0.0) {
            warn!("No energy is served: the levelized cost of electricity will not be finite");
        }

        Ok(())
    }
}
