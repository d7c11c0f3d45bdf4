//! Defines the [`Microgrid`] struct, which represents the contents of `microgrid.toml`.
//!
//! Only the techno-economic parameters of each component are described here. Parameters used by
//! production and dispatch models are not needed to compute costs.
use crate::input::{input_err_msg, invalid_value_msg, read_toml};
use crate::units::{
    Cycles, Dimensionless, Energy, Hours, MoneyPerEnergy, MoneyPerEnergyPerYear, MoneyPerFuel,
    MoneyPerPower, MoneyPerPowerHour, MoneyPerPowerPerYear, Power, Year,
};
use anyhow::{Context, Result, ensure};
use log::warn;
use serde::Deserialize;
use serde_string_enum::{DeserializeLabeledStringEnum, SerializeLabeledStringEnum};
use std::path::Path;

const MICROGRID_FILE_NAME: &str = "microgrid.toml";

macro_rules! define_unit_param_default {
    ($name:ident, $type: ty, $value: expr) => {
        fn $name() -> $type {
            <$type>::new($value)
        }
    };
}

define_unit_param_default!(default_price_ratio, Dimensionless, 1.0);

/// Default currency label
fn default_currency() -> String {
    "$".into()
}

/// How the salvage value of a component at the end of the project is computed
#[derive(
    DeserializeLabeledStringEnum,
    SerializeLabeledStringEnum,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
)]
pub enum SalvageType {
    /// The value decreases linearly with the age of the component
    #[default]
    #[string = "LinearSalvage"]
    LinearSalvage,
    /// The value depreciates consistently with the project discount rate
    #[string = "ConsistentSalvage"]
    ConsistentSalvage,
}

/// Economic parameters of the microgrid project
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Project {
    /// Project lifetime (years)
    pub lifetime: u32,
    /// Discount rate (per year)
    pub discount_rate: Dimensionless,
    /// How salvage values are computed
    #[serde(default)]
    pub salvage_type: SalvageType,
    /// Currency label used when reporting costs
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Project {
    /// Create a new [`Project`] with the default currency label
    pub fn new(lifetime: u32, discount_rate: Dimensionless, salvage_type: SalvageType) -> Self {
        Self {
            lifetime,
            discount_rate,
            salvage_type,
            currency: default_currency(),
        }
    }
}

/// A dispatchable generator (e.g. diesel), worn by its hours of operation
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DieselGenerator {
    /// Rated power
    pub power_rated: Power,
    /// Price per unit of fuel
    pub fuel_price: MoneyPerFuel,
    /// Investment price per unit of rated power
    pub investment_price: MoneyPerPower,
    /// Operation & maintenance price per unit of rated power per hour of operation
    pub om_price_hours: MoneyPerPowerHour,
    /// Lifetime, in hours of operation
    pub lifetime_hours: Hours,
    /// Replacement price, relative to the investment
    #[serde(default = "default_price_ratio")]
    pub replacement_price_ratio: Dimensionless,
    /// Salvage price, relative to the investment
    #[serde(default = "default_price_ratio")]
    pub salvage_price_ratio: Dimensionless,
}

/// A battery energy storage, worn by both its age and its cycling
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Battery {
    /// Rated energy capacity
    pub energy_rated: Energy,
    /// Investment price per unit of rated energy
    pub investment_price: MoneyPerEnergy,
    /// Operation & maintenance price per unit of rated energy per year
    pub om_price: MoneyPerEnergyPerYear,
    /// Calendar lifetime
    pub lifetime_calendar: Year,
    /// Lifetime, in number of charge/discharge cycles
    pub lifetime_cycles: Cycles,
    /// Replacement price, relative to the investment
    #[serde(default = "default_price_ratio")]
    pub replacement_price_ratio: Dimensionless,
    /// Salvage price, relative to the investment
    #[serde(default = "default_price_ratio")]
    pub salvage_price_ratio: Dimensionless,
}

/// A non-dispatchable source priced by its rated power, with a fixed calendar lifetime
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GenericSource {
    /// Rated power
    pub power_rated: Power,
    /// Investment price per unit of rated power
    pub investment_price: MoneyPerPower,
    /// Operation & maintenance price per unit of rated power per year
    pub om_price: MoneyPerPowerPerYear,
    /// Calendar lifetime
    pub lifetime: Year,
    /// Replacement price, relative to the investment
    #[serde(default = "default_price_ratio")]
    pub replacement_price_ratio: Dimensionless,
    /// Salvage price, relative to the investment
    #[serde(default = "default_price_ratio")]
    pub salvage_price_ratio: Dimensionless,
}

/// A photovoltaic plant with separately priced inverter (AC) and panels (DC) parts.
///
/// The DC rated power is the AC rated power times the inverter loading ratio.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PvInverter {
    /// Rated power of the inverter (AC)
    pub power_rated: Power,
    /// Inverter loading ratio: ratio of DC (panels) to AC (inverter) rated power
    pub ilr: Dimensionless,
    /// Investment price per unit of AC rated power
    pub investment_price_ac: MoneyPerPower,
    /// Investment price per unit of DC rated power
    pub investment_price_dc: MoneyPerPower,
    /// Operation & maintenance price per unit of AC rated power per year
    pub om_price_ac: MoneyPerPowerPerYear,
    /// Operation & maintenance price per unit of DC rated power per year
    pub om_price_dc: MoneyPerPowerPerYear,
    /// Lifetime of the inverter
    pub lifetime_ac: Year,
    /// Lifetime of the panels
    pub lifetime_dc: Year,
    /// Replacement price, relative to the investment
    #[serde(default = "default_price_ratio")]
    pub replacement_price_ratio: Dimensionless,
    /// Salvage price, relative to the investment
    #[serde(default = "default_price_ratio")]
    pub salvage_price_ratio: Dimensionless,
}

/// A non-dispatchable (renewable) source
#[derive(Debug, Clone, Deserialize, PartialEq, strum::IntoStaticStr)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NonDispatchable {
    /// Photovoltaic plant
    Photovoltaic(GenericSource),
    /// Wind turbine(s)
    WindPower(GenericSource),
    /// Photovoltaic plant with inverter
    PvInverter(PvInverter),
}

impl NonDispatchable {
    /// A short name for the kind of source (as used in input files)
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

/// A microgrid project and its components
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Microgrid {
    /// Project parameters
    pub project: Project,
    /// Dispatchable generator
    pub generator: DieselGenerator,
    /// Energy storage
    pub storage: Battery,
    /// Non-dispatchable sources, in the order they should be reported
    #[serde(default)]
    pub nondispatchables: Vec<NonDispatchable>,
}

/// Check that the project `lifetime` parameter is valid
fn check_project_lifetime(lifetime: u32) -> Result<()> {
    ensure!(
        lifetime > 0,
        invalid_value_msg("lifetime", lifetime, "greater than zero")
    );

    Ok(())
}

/// Check that the project `discount_rate` parameter is valid
fn check_discount_rate(discount_rate: Dimensionless) -> Result<()> {
    ensure!(
        discount_rate.is_finite() && discount_rate >= Dimensionless(0.0),
        invalid_value_msg(
            "discount_rate",
            discount_rate,
            "a finite number greater than or equal to zero"
        )
    );

    Ok(())
}

impl Microgrid {
    /// Read a microgrid file from the specified model directory.
    ///
    /// # Arguments
    ///
    /// * `model_dir` - Folder containing model configuration files
    ///
    /// # Returns
    ///
    /// The file contents as a [`Microgrid`] struct or an error if the file is invalid
    pub fn from_path<P: AsRef<Path>>(model_dir: P) -> Result<Microgrid> {
        let file_path = model_dir.as_ref().join(MICROGRID_FILE_NAME);
        let microgrid: Microgrid = read_toml(&file_path)?;

        microgrid
            .validate()
            .with_context(|| input_err_msg(file_path))?;

        Ok(microgrid)
    }

    /// Validate parameters after reading in file
    fn validate(&self) -> Result<()> {
        check_project_lifetime(self.project.lifetime)?;
        check_discount_rate(self.project.discount_rate)?;

        if self.project.salvage_type == SalvageType::ConsistentSalvage
            && self.project.discount_rate == Dimensionless(0.0)
        {
            warn!(
                "The salvage type is set to '{}' with a zero discount rate. Linear salvage will be \
                used instead.",
                self.project.salvage_type
            );
        }

        if self.nondispatchables.is_empty() {
            warn!("The microgrid has no non-dispatchable sources");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const MICROGRID_TOML: &str = r#"
[project]
lifetime = 25
discount_rate = 0.05
salvage_type = "ConsistentSalvage"
currency = "€"

[generator]
power_rated = 1800.0
fuel_price = 1.0
investment_price = 400.0
om_price_hours = 0.02
lifetime_hours = 15000.0

[storage]
energy_rated = 5000.0
investment_price = 350.0
om_price = 10.0
lifetime_calendar = 15.0
lifetime_cycles = 3000.0
salvage_price_ratio = 0.5

[[nondispatchables]]
kind = "photovoltaic"
power_rated = 3000.0
investment_price = 1200.0
om_price = 20.0
lifetime = 25.0

[[nondispatchables]]
kind = "wind_power"
power_rated = 900.0
investment_price = 3500.0
om_price = 100.0
lifetime = 25.0

[[nondispatchables]]
kind = "pv_inverter"
power_rated = 1000.0
ilr = 1.2
investment_price_ac = 150.0
investment_price_dc = 800.0
om_price_ac = 5.0
om_price_dc = 15.0
lifetime_ac = 10.0
lifetime_dc = 25.0
"#;

    /// Write `contents` to a microgrid file in a new temporary directory
    fn write_microgrid_file(contents: &str) -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        let mut file = File::create(dir.path().join(MICROGRID_FILE_NAME)).unwrap();
        write!(file, "{contents}").unwrap();
        dir
    }

    #[test]
    fn test_microgrid_from_path() {
        let dir = write_microgrid_file(MICROGRID_TOML);
        let microgrid = Microgrid::from_path(dir.path()).unwrap();

        assert_eq!(microgrid.project.lifetime, 25);
        assert_eq!(microgrid.project.discount_rate, Dimensionless(0.05));
        assert_eq!(
            microgrid.project.salvage_type,
            SalvageType::ConsistentSalvage
        );
        assert_eq!(microgrid.project.currency, "€");

        // Price ratios default to 1
        assert_eq!(
            microgrid.generator.replacement_price_ratio,
            Dimensionless(1.0)
        );
        assert_eq!(microgrid.storage.salvage_price_ratio, Dimensionless(0.5));

        let kinds: Vec<_> = microgrid
            .nondispatchables
            .iter()
            .map(NonDispatchable::kind)
            .collect();
        assert_eq!(kinds, ["photovoltaic", "wind_power", "pv_inverter"]);
        let NonDispatchable::PvInverter(pv) = &microgrid.nondispatchables[2] else {
            panic!("Expected a PV inverter");
        };
        assert_eq!(pv.ilr, Dimensionless(1.2));
    }

    #[test]
    fn test_microgrid_from_path_project_defaults() {
        let contents = MICROGRID_TOML
            .replace("salvage_type = \"ConsistentSalvage\"\n", "")
            .replace("currency = \"€\"\n", "");
        let dir = write_microgrid_file(&contents);
        let microgrid = Microgrid::from_path(dir.path()).unwrap();
        assert_eq!(microgrid.project.salvage_type, SalvageType::LinearSalvage);
        assert_eq!(microgrid.project.currency, "$");
    }

    #[test]
    fn test_microgrid_from_path_unknown_salvage_type() {
        let contents = MICROGRID_TOML.replace("ConsistentSalvage", "ExponentialSalvage");
        let dir = write_microgrid_file(&contents);
        let err = Microgrid::from_path(dir.path()).unwrap_err();
        assert!(
            err.chain()
                .any(|cause| cause.to_string().contains("ExponentialSalvage")),
            "Error does not name the salvage type: {err:?}"
        );
    }

    #[test]
    fn test_microgrid_from_path_invalid_lifetime() {
        let contents = MICROGRID_TOML.replace("lifetime = 25\n", "lifetime = 0\n");
        let dir = write_microgrid_file(&contents);
        let err = Microgrid::from_path(dir.path()).unwrap_err();
        assert_eq!(
            err.to_string(),
            input_err_msg(dir.path().join(MICROGRID_FILE_NAME))
        );
        assert_eq!(
            err.root_cause().to_string(),
            "`lifetime` must be greater than zero (got 0)"
        );
    }

    #[rstest]
    #[case("LinearSalvage", SalvageType::LinearSalvage)]
    #[case("ConsistentSalvage", SalvageType::ConsistentSalvage)]
    #[case("linearsalvage", SalvageType::LinearSalvage)]
    #[case("CONSISTENTSALVAGE", SalvageType::ConsistentSalvage)]
    fn test_salvage_type_from_str(#[case] s: &str, #[case] expected: SalvageType) {
        assert_eq!(s.parse::<SalvageType>().unwrap(), expected);
    }

    #[rstest]
    #[case(SalvageType::LinearSalvage, "LinearSalvage")]
    #[case(SalvageType::ConsistentSalvage, "ConsistentSalvage")]
    fn test_salvage_type_display(#[case] salvage_type: SalvageType, #[case] expected: &str) {
        assert_eq!(salvage_type.to_string(), expected);
    }

    #[rstest]
    #[case("ExponentialSalvage")]
    #[case("Linear")]
    #[case("")]
    fn test_salvage_type_from_str_unsupported(#[case] s: &str) {
        assert_eq!(
            s.parse::<SalvageType>().unwrap_err().to_string(),
            format!("invalid SalvageType: {s}")
        );
    }

    #[rstest]
    #[case(1, true)]
    #[case(25, true)]
    #[case(0, false)]
    fn test_check_project_lifetime(#[case] lifetime: u32, #[case] expected_valid: bool) {
        assert_eq!(check_project_lifetime(lifetime).is_ok(), expected_valid);
    }

    #[rstest]
    #[case(0.0, true)]
    #[case(0.05, true)]
    #[case(1.0, true)]
    #[case(-0.01, false)]
    #[case(f64::INFINITY, false)]
    #[case(f64::NAN, false)]
    fn test_check_discount_rate(#[case] discount_rate: f64, #[case] expected_valid: bool) {
        assert_eq!(
            check_discount_rate(Dimensionless(discount_rate)).is_ok(),
            expected_valid
        );
    }
}
