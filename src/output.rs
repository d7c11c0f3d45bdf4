//! The module responsible for writing output data to disk.
use crate::cost_factors::{CostFactors, Precision};
use crate::economics::MicrogridCosts;
use crate::microgrid::{Microgrid, SalvageType};
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The root folder in which model-specific output folders will be created
const OUTPUT_DIRECTORY_ROOT: &str = "mgcost_results";

/// The output file name for the cost breakdown
const COSTS_FILE_NAME: &str = "costs.csv";

/// The output file name for the headline results
const SUMMARY_FILE_NAME: &str = "summary.toml";

/// Get the model name from the specified directory path
pub fn get_output_dir(model_dir: &Path) -> Result<PathBuf> {
    // Get the model name from the dir path. This ends up being convoluted because we need to check
    // for all possible errors. Ugh.
    let model_dir = model_dir
        .canonicalize() // canonicalise in case the user has specified "."
        .context("Could not resolve path to model")?;

    let model_name = model_dir
        .file_name()
        .context("Model cannot be in root folder")?
        .to_str()
        .context("Invalid chars in model dir name")?;

    // Construct path
    Ok([OUTPUT_DIRECTORY_ROOT, model_name].iter().collect())
}

/// Create a new output directory for the model, optionally overwriting existing data
///
/// # Arguments
///
/// * `output_dir` - The output directory to create/overwrite
/// * `allow_overwrite` - Whether to delete and recreate the folder if it is non-empty
///
/// # Returns
///
/// Whether existing output data was deleted
pub fn create_output_directory(output_dir: &Path, allow_overwrite: bool) -> Result<bool> {
    // If the folder already exists, then delete it
    let overwrite = if let Ok(mut it) = fs::read_dir(output_dir) {
        if it.next().is_none() {
            // Folder exists and is empty: nothing to do
            return Ok(false);
        }

        ensure!(
            allow_overwrite,
            "Output folder already exists and is not empty. Please delete the folder or pass \
            the --overwrite command-line option."
        );

        fs::remove_dir_all(output_dir)?;
        true
    } else {
        false
    };

    // Try to create the directory, with parents
    fs::create_dir_all(output_dir)?;

    Ok(overwrite)
}

/// Represents a row in the costs CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct CostsRow {
    component: String,
    kind: Option<String>,
    total: f64,
    investment: f64,
    replacement: f64,
    om: f64,
    fuel: f64,
    salvage: f64,
}

impl CostsRow {
    /// Create a new [`CostsRow`]
    fn new(component: String, kind: Option<&str>, costs: &CostFactors) -> Self {
        Self {
            component,
            kind: kind.map(String::from),
            total: costs.total.value(),
            investment: costs.investment.value(),
            replacement: costs.replacement.value(),
            om: costs.om.value(),
            fuel: costs.fuel.value(),
            salvage: costs.salvage.value(),
        }
    }
}

/// Represents the contents of the summary TOML file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Summary {
    currency: String,
    salvage_type: SalvageType,
    npc: f64,
    lcoe: f64,
}

/// Write the results of the economic analysis to the output folder.
///
/// # Arguments
///
/// * `output_path` - Folder where files will be saved
/// * `microgrid` - The microgrid which was analysed
/// * `costs` - Its lifecycle costs
/// * `precision` - How to round values before writing, if at all
pub fn write_results(
    output_path: &Path,
    microgrid: &Microgrid,
    costs: &MicrogridCosts,
    precision: Option<Precision>,
) -> Result<()> {
    let round = |value: f64| precision.map_or(value, |precision| precision.round(value));
    let round_costs = |costs: CostFactors| precision.map_or(costs, |precision| costs.round(precision));

    let file_path = output_path.join(COSTS_FILE_NAME);
    let mut writer = csv::Writer::from_path(&file_path)
        .with_context(|| format!("Could not create {}", file_path.display()))?;
    writer.serialize(CostsRow::new(
        "generator".into(),
        Some("diesel_generator"),
        &round_costs(costs.generator),
    ))?;
    writer.serialize(CostsRow::new(
        "storage".into(),
        Some("battery"),
        &round_costs(costs.storage),
    ))?;
    for (idx, (source, source_costs)) in microgrid
        .nondispatchables
        .iter()
        .zip(&costs.nondispatchables)
        .enumerate()
    {
        writer.serialize(CostsRow::new(
            format!("source{}", idx + 1),
            Some(source.kind()),
            &round_costs(*source_costs),
        ))?;
    }
    writer.serialize(CostsRow::new(
        "system".into(),
        None,
        &round_costs(costs.system),
    ))?;
    writer.flush()?;

    let summary = Summary {
        currency: microgrid.project.currency.clone(),
        salvage_type: microgrid.project.salvage_type,
        npc: round(costs.npc.value()),
        lcoe: round(costs.lcoe.value()),
    };
    let file_path = output_path.join(SUMMARY_FILE_NAME);
    let summary_raw = toml::to_string(&summary).context("Could not convert summary to TOML")?;
    fs::write(&file_path, summary_raw)
        .with_context(|| format!("Could not write {}", file_path.display()))?;

    Ok(())
}
