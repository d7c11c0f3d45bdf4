//! The lifecycle cost formula shared by all component types.
//!
//! A component is bought at the start of the project, replaced whenever it reaches the end of its
//! (effective) lifetime and sold for its remaining value at the end of the project. Annual costs
//! are incurred at the end of each project year.
use crate::cost_factors::CostFactors;
use crate::finance::{annuity_factor, discount_factor};
use crate::microgrid::{Project, SalvageType};
use crate::units::{Dimensionless, Money, MoneyPerYear, Year};

/// Calculates the net present cost of one component over the project lifetime.
///
/// # Arguments
///
/// * `project` - Project lifetime and discount rate
/// * `lifetime` - Effective lifetime of the component. May be fractional, or infinite for a
///   component which is never worn.
/// * `investment` - Initial investment
/// * `replacement` - Cost of each replacement
/// * `salvage` - Value of a new component at the end of the project
/// * `om_annual` - Annual operation & maintenance cost
/// * `fuel_annual` - Annual fuel cost
/// * `salvage_type` - How the value of the last installed component depreciates
///
/// # Returns
///
/// The discounted costs. A zero `lifetime` gives non-finite replacement costs.
#[allow(clippy::too_many_arguments)]
pub fn component_costs(
    project: &Project,
    lifetime: Year,
    investment: Money,
    replacement: Money,
    salvage: Money,
    om_annual: MoneyPerYear,
    fuel_annual: MoneyPerYear,
    salvage_type: SalvageType,
) -> CostFactors {
    let discount_rate = project.discount_rate;
    let project_lifetime = Year(f64::from(project.lifetime));
    let sum_discounts = annuity_factor(project.lifetime, discount_rate);
    let last_discount = discount_factor(discount_rate, project_lifetime.value());

    let om_cost = om_annual * sum_discounts;
    let fuel_cost = fuel_annual * sum_discounts;

    let (replacement_cost, salvage_cost) = if lifetime.is_finite() {
        let replacements = (project_lifetime / lifetime).value().ceil() - 1.0;
        let replacement_cost =
            replacement * replacement_discounts(discount_rate, lifetime, replacements);

        let remaining_value = if discount_rate == Dimensionless(0.0) {
            // Consistent depreciation is linear without discounting
            linear_salvage_fraction(project_lifetime, lifetime, replacements)
        } else {
            match salvage_type {
                SalvageType::LinearSalvage => {
                    linear_salvage_fraction(project_lifetime, lifetime, replacements)
                }
                SalvageType::ConsistentSalvage => consistent_salvage_fraction(
                    project_lifetime,
                    lifetime,
                    replacements,
                    discount_rate,
                ),
            }
        };

        (replacement_cost, -(salvage * remaining_value) * last_discount)
    } else {
        // Never worn: no replacement and sold as new
        (Money(0.0), -salvage * last_discount)
    };

    CostFactors::new(
        investment,
        replacement_cost,
        om_cost,
        fuel_cost,
        salvage_cost,
    )
}

/// Sum of the discount factors of the years in which the component is replaced.
///
/// Replacements happen every `lifetime` years, `replacements` times. The discount factors form a
/// geometric series, so the sum has a closed form and any number of replacements is allowed.
fn replacement_discounts(
    discount_rate: Dimensionless,
    lifetime: Year,
    replacements: f64,
) -> Dimensionless {
    if replacements < 1.0 {
        return Dimensionless(0.0);
    }
    if !replacements.is_finite() {
        return Dimensionless(f64::INFINITY);
    }

    // Discount factor of one component lifetime
    let ratio = discount_factor(discount_rate, lifetime.value());
    if ratio == Dimensionless(1.0) {
        return Dimensionless(replacements);
    }

    let one = Dimensionless(1.0);
    ratio * (one - ratio.powf(replacements)) / (one - ratio)
}

/// Fraction of the salvage value left at the end of the project, proportional to remaining life
fn linear_salvage_fraction(
    project_lifetime: Year,
    lifetime: Year,
    replacements: f64,
) -> Dimensionless {
    let remaining_life = lifetime * Dimensionless(1.0 + replacements) - project_lifetime;
    remaining_life / lifetime
}

/// Fraction of the salvage value left at the end of the project, depreciated at the discount rate
fn consistent_salvage_fraction(
    project_lifetime: Year,
    lifetime: Year,
    replacements: f64,
    discount_rate: Dimensionless,
) -> Dimensionless {
    let usage_duration = project_lifetime - lifetime * Dimensionless(replacements);
    let growth = Dimensionless(1.0) + discount_rate;
    let growth_life = growth.powf(lifetime.value());
    (growth_life - growth.powf(usage_duration.value())) / (growth_life - Dimensionless(1.0))
}
