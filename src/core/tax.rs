//! Progressive tax brackets.
//!
//! Each bracket covers `(lower, next.lower]` and charges `base` plus `rate`
//! on the part of taxable income above `lower`. The table is continuous: every
//! bracket's `base` equals the tax at its `lower` bound computed by the
//! bracket below it.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxBracket {
    pub lower: f64,
    pub base: f64,
    pub rate: f64,
}

impl TaxBracket {
    fn tax_on(&self, taxable_income: f64) -> f64 {
        self.base + (taxable_income - self.lower) * self.rate
    }
}

pub const BRACKETS: [TaxBracket; 4] = [
    TaxBracket {
        lower: f64::NEG_INFINITY,
        base: 0.0,
        rate: 0.0,
    },
    TaxBracket {
        lower: 250_000.0,
        base: 0.0,
        rate: 0.05,
    },
    TaxBracket {
        lower: 500_000.0,
        base: 12_500.0,
        rate: 0.2,
    },
    TaxBracket {
        lower: 1_000_000.0,
        base: 112_500.0,
        rate: 0.3,
    },
];

/// Income minus deductions. Not floored: deductions above income give a
/// negative value, which lands in the zero-rate bracket.
pub fn taxable_income(income: f64, deductions: f64) -> f64 {
    income - deductions
}

pub fn bracket_for(taxable_income: f64) -> &'static TaxBracket {
    BRACKETS
        .iter()
        .rev()
        .find(|bracket| taxable_income > bracket.lower)
        .unwrap_or(&BRACKETS[0])
}

/// Tax owed on `income` after `deductions`. Unrounded.
pub fn compute_tax(income: f64, deductions: f64) -> f64 {
    let taxable = taxable_income(income, deductions);
    let bracket = bracket_for(taxable);
    if bracket.rate == 0.0 {
        return 0.0;
    }
    bracket.tax_on(taxable)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_zero_bracket_includes_negative_taxable_income() {
        for taxable in [-1_000_000.0, -0.01, 0.0, 1.0, 100_000.0, 249_999.99, 250_000.0] {
            assert_eq!(compute_tax(taxable, 0.0), 0.0, "taxable {}", taxable);
        }
        assert_eq!(compute_tax(100_000.0, 400_000.0), 0.0);
    }

    #[test]
    fn test_worked_scenarios() {
        assert_close(compute_tax(300_000.0, 0.0), 2_500.0);
        assert_close(compute_tax(700_000.0, 100_000.0), 32_500.0);
        assert_close(compute_tax(1_200_000.0, 0.0), 172_500.0);
    }

    #[test]
    fn test_boundaries_are_continuous() {
        let eps = 1e-6;
        for (boundary, expected) in [
            (250_000.0, 0.0),
            (500_000.0, 12_500.0),
            (1_000_000.0, 112_500.0),
        ] {
            assert_close(compute_tax(boundary, 0.0), expected);
            assert!((compute_tax(boundary - eps, 0.0) - expected).abs() < 1e-3);
            assert!((compute_tax(boundary + eps, 0.0) - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn test_third_bracket_is_linear_above_500k() {
        for x in [1.0, 50_000.0, 250_000.0, 500_000.0] {
            assert_close(compute_tax(500_000.0 + x, 0.0), 12_500.0 + x * 0.2);
        }
    }

    #[test]
    fn test_bracket_bases_match_tax_at_lower_bound() {
        for pair in BRACKETS.windows(2).skip(1) {
            let (below, above) = (pair[0], pair[1]);
            assert_close(below.tax_on(above.lower), above.base);
        }
    }

    #[test]
    fn test_bracket_lookup_uses_right_closed_ranges() {
        assert_eq!(bracket_for(250_000.0).rate, 0.0);
        assert_eq!(bracket_for(250_000.01).rate, 0.05);
        assert_eq!(bracket_for(500_000.0).rate, 0.05);
        assert_eq!(bracket_for(1_000_000.0).rate, 0.2);
        assert_eq!(bracket_for(1_000_000.5).rate, 0.3);
        assert_eq!(bracket_for(-50.0).rate, 0.0);
    }

    #[test]
    fn test_compute_tax_is_pure() {
        let first = compute_tax(812_345.67, 12_345.67);
        for _ in 0..10 {
            assert_eq!(compute_tax(812_345.67, 12_345.67), first);
        }
    }

    #[test]
    fn test_taxable_income_is_not_floored() {
        assert_eq!(taxable_income(100.0, 250.0), -150.0);
    }
}
