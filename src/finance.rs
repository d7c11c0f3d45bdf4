//! General functions related to finance.
use crate::units::{Dimensionless, PerYear, Year};

/// Calculates the discount factor for a cash flow occurring `years` years after the start of the
/// project.
///
/// `years` need not be a whole number (e.g. replacements of a component whose effective lifetime
/// is fractional).
pub fn discount_factor(discount_rate: Dimensionless, years: f64) -> Dimensionless {
    Dimensionless(1.0) / (Dimensionless(1.0) + discount_rate).powf(years)
}

/// The discount factors for years `1..=lifetime` of a project.
pub fn discount_factors(
    lifetime: u32,
    discount_rate: Dimensionless,
) -> impl Iterator<Item = Dimensionless> {
    (1..=lifetime).map(move |year| discount_factor(discount_rate, f64::from(year)))
}

/// Calculates the annuity factor: the sum of the discount factors over the project lifetime.
///
/// Multiplying an annual cost by this factor gives its present value. A zero lifetime gives
/// (positive) zero.
pub fn annuity_factor(lifetime: u32, discount_rate: Dimensionless) -> Year {
    // `f64::sum` of an empty iterator is -0.0
    Year(
        discount_factors(lifetime, discount_rate)
            .map(f64::from)
            .fold(0.0, |acc, factor| acc + factor),
    )
}

/// Calculates the capital recovery factor (CRF) for a given lifetime and discount rate.
///
/// The CRF is the reciprocal of the [`annuity_factor`] and is used to convert a present value into
/// an equivalent uniform annual amount. A zero lifetime gives an infinite CRF.
pub fn capital_recovery_factor(lifetime: u32, discount_rate: Dimensionless) -> PerYear {
    Dimensionless(1.0) / annuity_factor(lifetime, discount_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.05, 0.0, 1.0)]
    #[case(0.05, 1.0, 0.9523809523809523)]
    #[case(0.05, 10.0, 0.6139132535407591)]
    #[case(0.0, 20.0, 1.0)]
    #[case(0.1, 2.5, 0.7879856109467703)]
    fn test_discount_factor(#[case] discount_rate: f64, #[case] years: f64, #[case] expected: f64) {
        let result = discount_factor(Dimensionless(discount_rate), years);
        assert_approx_eq!(f64, result.0, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_discount_factors() {
        let factors: Vec<_> = discount_factors(3, Dimensionless(0.1)).collect();
        assert_eq!(factors.len(), 3);
        assert_approx_eq!(Dimensionless, factors[0], Dimensionless(1.0 / 1.1), epsilon = 1e-12);
        assert_approx_eq!(Dimensionless, factors[2], Dimensionless(1.0 / 1.331), epsilon = 1e-12);
    }

    #[rstest]
    #[case(0, 0.05, 0.0)] // Edge case: lifetime==0
    #[case(20, 0.0, 20.0)] // Other edge case: discount_rate==0
    #[case(20, 0.05, 12.462210342539986)]
    #[case(25, 0.05, 14.093944566044753)]
    fn test_annuity_factor(#[case] lifetime: u32, #[case] discount_rate: f64, #[case] expected: f64) {
        let result = annuity_factor(lifetime, Dimensionless(discount_rate));
        assert_approx_eq!(Year, result, Year(expected), epsilon = 1e-10);
    }

    #[rstest]
    #[case(0.05)]
    #[case(0.0)]
    fn test_zero_lifetime_sign(#[case] discount_rate: f64) {
        let discount_rate = Dimensionless(discount_rate);
        assert!(annuity_factor(0, discount_rate).value().is_sign_positive());
        assert_eq!(
            capital_recovery_factor(0, discount_rate),
            PerYear(f64::INFINITY)
        );
    }

    #[rstest]
    #[case(0, 0.05, f64::INFINITY)] // Edge case: lifetime==0
    #[case(10, 0.0, 0.1)] // Other edge case: discount_rate==0
    #[case(10, 0.05, 0.1295045749654567)]
    #[case(5, 0.03, 0.2183545714005762)]
    fn test_capital_recovery_factor(
        #[case] lifetime: u32,
        #[case] discount_rate: f64,
        #[case] expected: f64,
    ) {
        let result = capital_recovery_factor(lifetime, Dimensionless(discount_rate));
        assert_approx_eq!(f64, result.0, expected, epsilon = 1e-10);
    }
}
