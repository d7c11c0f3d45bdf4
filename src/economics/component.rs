//! Costs of each type of microgrid component.
//!
//! Each component type has its own way of deriving the inputs of [`component_costs`] from its
//! parameters and from the operation statistics.
use super::lifecycle::component_costs;
use crate::cost_factors::CostFactors;
use crate::microgrid::{
    Battery, DieselGenerator, GenericSource, NonDispatchable, Project, PvInverter, SalvageType,
};
use crate::operation::OperationStats;
use crate::units::{CyclesPerYear, Dimensionless, HoursPerYear, Money, MoneyPerYear, Year};

/// A reference to any component of a microgrid
#[derive(Debug, Clone, Copy)]
pub enum Component<'a> {
    /// The dispatchable generator
    Generator(&'a DieselGenerator),
    /// The energy storage
    Storage(&'a Battery),
    /// A non-dispatchable source
    NonDispatchable(&'a NonDispatchable),
}

/// Calculates the net present cost of a component.
///
/// # Arguments
///
/// * `component` - The component
/// * `project` - Project lifetime and discount rate
/// * `oper_stats` - Statistics of the simulated operation of the microgrid
/// * `salvage_type` - How salvage values are computed
pub fn compute_cost(
    component: Component,
    project: &Project,
    oper_stats: &OperationStats,
    salvage_type: SalvageType,
) -> CostFactors {
    match component {
        Component::Generator(generator) => {
            generator_costs(generator, project, oper_stats, salvage_type)
        }
        Component::Storage(battery) => battery_costs(battery, project, oper_stats, salvage_type),
        Component::NonDispatchable(
            NonDispatchable::Photovoltaic(source) | NonDispatchable::WindPower(source),
        ) => generic_source_costs(source, project, salvage_type),
        Component::NonDispatchable(NonDispatchable::PvInverter(pv)) => {
            pv_inverter_costs(pv, project, salvage_type)
        }
    }
}

/// Prices of a component whose replacement and salvage prices are proportional to its investment
struct PricedComponent {
    investment: Money,
    replacement_price_ratio: Dimensionless,
    salvage_price_ratio: Dimensionless,
    om_annual: MoneyPerYear,
    fuel_annual: MoneyPerYear,
    lifetime: Year,
}

impl PricedComponent {
    fn costs(&self, project: &Project, salvage_type: SalvageType) -> CostFactors {
        component_costs(
            project,
            self.lifetime,
            self.investment,
            self.investment * self.replacement_price_ratio,
            self.investment * self.salvage_price_ratio,
            self.om_annual,
            self.fuel_annual,
            salvage_type,
        )
    }
}

/// Effective lifetime of a generator, given its annual hours of operation.
///
/// A generator which is never run is never worn, so its lifetime is infinite.
fn generator_lifetime(generator: &DieselGenerator, gen_hours: HoursPerYear) -> Year {
    if gen_hours == HoursPerYear(0.0) {
        Year(f64::INFINITY)
    } else {
        generator.lifetime_hours / gen_hours
    }
}

fn generator_costs(
    generator: &DieselGenerator,
    project: &Project,
    oper_stats: &OperationStats,
    salvage_type: SalvageType,
) -> CostFactors {
    PricedComponent {
        investment: generator.investment_price * generator.power_rated,
        replacement_price_ratio: generator.replacement_price_ratio,
        salvage_price_ratio: generator.salvage_price_ratio,
        om_annual: generator.om_price_hours * oper_stats.gen_hours * generator.power_rated,
        fuel_annual: generator.fuel_price * oper_stats.gen_fuel,
        lifetime: generator_lifetime(generator, oper_stats.gen_hours),
    }
    .costs(project, salvage_type)
}

/// Effective lifetime of a battery: limited by cycling or by age, whichever comes first
fn battery_lifetime(battery: &Battery, storage_cycles: CyclesPerYear) -> Year {
    if storage_cycles > CyclesPerYear(0.0) {
        (battery.lifetime_cycles / storage_cycles).min(battery.lifetime_calendar)
    } else {
        battery.lifetime_calendar
    }
}

fn battery_costs(
    battery: &Battery,
    project: &Project,
    oper_stats: &OperationStats,
    salvage_type: SalvageType,
) -> CostFactors {
    PricedComponent {
        investment: battery.investment_price * battery.energy_rated,
        replacement_price_ratio: battery.replacement_price_ratio,
        salvage_price_ratio: battery.salvage_price_ratio,
        om_annual: battery.om_price * battery.energy_rated,
        fuel_annual: MoneyPerYear(0.0),
        lifetime: battery_lifetime(battery, oper_stats.storage_cycles),
    }
    .costs(project, salvage_type)
}

fn generic_source_costs(
    source: &GenericSource,
    project: &Project,
    salvage_type: SalvageType,
) -> CostFactors {
    PricedComponent {
        investment: source.investment_price * source.power_rated,
        replacement_price_ratio: source.replacement_price_ratio,
        salvage_price_ratio: source.salvage_price_ratio,
        om_annual: source.om_price * source.power_rated,
        fuel_annual: MoneyPerYear(0.0),
        lifetime: source.lifetime,
    }
    .costs(project, salvage_type)
}

/// Costs of a PV plant: the inverter (AC) and the panels (DC) are costed separately and summed
fn pv_inverter_costs(pv: &PvInverter, project: &Project, salvage_type: SalvageType) -> CostFactors {
    let power_rated_dc = pv.power_rated * pv.ilr;

    let ac = PricedComponent {
        investment: pv.investment_price_ac * pv.power_rated,
        replacement_price_ratio: pv.replacement_price_ratio,
        salvage_price_ratio: pv.salvage_price_ratio,
        om_annual: pv.om_price_ac * pv.power_rated,
        fuel_annual: MoneyPerYear(0.0),
        lifetime: pv.lifetime_ac,
    };
    let dc = PricedComponent {
        investment: pv.investment_price_dc * power_rated_dc,
        replacement_price_ratio: pv.replacement_price_ratio,
        salvage_price_ratio: pv.salvage_price_ratio,
        om_annual: pv.om_price_dc * power_rated_dc,
        fuel_annual: MoneyPerYear(0.0),
        lifetime: pv.lifetime_dc,
    };

    ac.costs(project, salvage_type) + dc.costs(project, salvage_type)
}
