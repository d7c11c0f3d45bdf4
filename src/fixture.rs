//! Fixtures for tests

use crate::microgrid::{
    Battery, DieselGenerator, GenericSource, Microgrid, NonDispatchable, Project, PvInverter,
    SalvageType,
};
use crate::operation::OperationStats;
use crate::units::{
    Cycles, CyclesPerYear, Dimensionless, Energy, EnergyPerYear, FuelPerYear, Hours, HoursPerYear,
    MoneyPerEnergy, MoneyPerEnergyPerYear, MoneyPerFuel, MoneyPerPower, MoneyPerPowerHour,
    MoneyPerPowerPerYear, Power, Year,
};
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

#[fixture]
pub fn project() -> Project {
    Project::new(25, Dimensionless(0.05), SalvageType::LinearSalvage)
}

#[fixture]
pub fn generator() -> DieselGenerator {
    DieselGenerator {
        power_rated: Power(1800.0),
        fuel_price: MoneyPerFuel(1.0),
        investment_price: MoneyPerPower(400.0),
        om_price_hours: MoneyPerPowerHour(0.02),
        lifetime_hours: Hours(15000.0),
        replacement_price_ratio: Dimensionless(1.0),
        salvage_price_ratio: Dimensionless(1.0),
    }
}

#[fixture]
pub fn battery() -> Battery {
    Battery {
        energy_rated: Energy(5000.0),
        investment_price: MoneyPerEnergy(350.0),
        om_price: MoneyPerEnergyPerYear(10.0),
        lifetime_calendar: Year(15.0),
        lifetime_cycles: Cycles(3000.0),
        replacement_price_ratio: Dimensionless(1.0),
        salvage_price_ratio: Dimensionless(1.0),
    }
}

#[fixture]
pub fn photovoltaic() -> GenericSource {
    GenericSource {
        power_rated: Power(3000.0),
        investment_price: MoneyPerPower(1200.0),
        om_price: MoneyPerPowerPerYear(20.0),
        lifetime: Year(25.0),
        replacement_price_ratio: Dimensionless(1.0),
        salvage_price_ratio: Dimensionless(1.0),
    }
}

#[fixture]
pub fn wind_power() -> GenericSource {
    GenericSource {
        power_rated: Power(900.0),
        investment_price: MoneyPerPower(3500.0),
        om_price: MoneyPerPowerPerYear(100.0),
        lifetime: Year(25.0),
        replacement_price_ratio: Dimensionless(1.0),
        salvage_price_ratio: Dimensionless(1.0),
    }
}

#[fixture]
pub fn pv_inverter() -> PvInverter {
    PvInverter {
        power_rated: Power(1000.0),
        ilr: Dimensionless(1.2),
        investment_price_ac: MoneyPerPower(150.0),
        investment_price_dc: MoneyPerPower(800.0),
        om_price_ac: MoneyPerPowerPerYear(5.0),
        om_price_dc: MoneyPerPowerPerYear(15.0),
        lifetime_ac: Year(10.0),
        lifetime_dc: Year(25.0),
        replacement_price_ratio: Dimensionless(1.0),
        salvage_price_ratio: Dimensionless(1.0),
    }
}

#[fixture]
pub fn microgrid(
    project: Project,
    generator: DieselGenerator,
    battery: Battery,
    photovoltaic: GenericSource,
    wind_power: GenericSource,
) -> Microgrid {
    Microgrid {
        project,
        generator,
        storage: battery,
        nondispatchables: vec![
            NonDispatchable::Photovoltaic(photovoltaic),
            NonDispatchable::WindPower(wind_power),
        ],
    }
}

#[fixture]
pub fn oper_stats() -> OperationStats {
    OperationStats {
        served_energy: EnergyPerYear(5.6e6),
        gen_hours: HoursPerYear(1500.0),
        gen_fuel: FuelPerYear(3.5e5),
        storage_cycles: CyclesPerYear(250.0),
    }
}
