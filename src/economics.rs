//! Lifecycle economics of a microgrid: net present cost (NPC) and levelized cost of electricity
//! (LCOE).
use crate::cost_factors::CostFactors;
use crate::finance::capital_recovery_factor;
use crate::microgrid::Microgrid;
use crate::operation::OperationStats;
use crate::units::{Money, MoneyPerEnergy};
use log::{debug, warn};

pub mod component;
pub mod lifecycle;
pub use component::{Component, compute_cost};
pub use lifecycle::component_costs;

/// Costs of a microgrid project over its lifetime
#[derive(Debug, Clone, PartialEq)]
pub struct MicrogridCosts {
    /// Levelized cost of electricity
    pub lcoe: MoneyPerEnergy,
    /// Net present cost (equal to the total system cost)
    pub npc: Money,
    /// Costs of the whole system
    pub system: CostFactors,
    /// Costs of the generator
    pub generator: CostFactors,
    /// Costs of the storage
    pub storage: CostFactors,
    /// Costs of each non-dispatchable source, in the same order as in the microgrid
    pub nondispatchables: Vec<CostFactors>,
}

/// Calculates the lifecycle costs of a microgrid, given the statistics of its operation.
///
/// The LCOE is the annualised NPC divided by the annual served energy. It is not finite if no
/// energy is served.
pub fn economics(microgrid: &Microgrid, oper_stats: &OperationStats) -> MicrogridCosts {
    let project = &microgrid.project;
    let salvage_type = project.salvage_type;
    let cost_of = |component| compute_cost(component, project, oper_stats, salvage_type);

    let generator = cost_of(Component::Generator(&microgrid.generator));
    debug!("Generator costs: {generator}");
    let storage = cost_of(Component::Storage(&microgrid.storage));
    debug!("Storage costs: {storage}");
    let nondispatchables: Vec<_> = microgrid
        .nondispatchables
        .iter()
        .enumerate()
        .map(|(idx, source)| {
            let costs = cost_of(Component::NonDispatchable(source));
            debug!("Costs of {} source {idx}: {costs}", source.kind());
            costs
        })
        .collect();

    let crf = capital_recovery_factor(project.lifetime, project.discount_rate);
    let system = generator + storage + nondispatchables.iter().copied().sum::<CostFactors>();
    let npc = system.total;
    let lcoe = (npc * crf) / oper_stats.served_energy;
    if !lcoe.is_finite() {
        warn!("The levelized cost of electricity is not finite ({lcoe})");
    }

    MicrogridCosts {
        lcoe,
        npc,
        system,
        generator,
        storage,
        nondispatchables,
    }
}
