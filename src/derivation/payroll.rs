use crate::derivation::time_interval::round2;
use crate::error::{DerivationError, DerivationResult};
use crate::model::{PayrollBreakdown, PayrollInput, PeriodMetrics};

/// Salary for the month with loss-of-pay days deducted at
/// `base_salary / standard_working_days` per day.
pub fn compute_payroll(
    metrics: &PeriodMetrics,
    input: PayrollInput,
) -> DerivationResult<PayrollBreakdown> {
    for (name, value) in [
        ("base_salary", input.base_salary),
        ("bonus", input.bonus),
        ("deductions", input.deductions),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(DerivationError::ConfigurationError(format!(
                "{name} must be a non-negative amount"
            )));
        }
    }

    let per_day_salary = if metrics.standard_working_days == 0 {
        0.0
    } else {
        input.base_salary / f64::from(metrics.standard_working_days)
    };
    let lop_deduction = round2(per_day_salary * f64::from(metrics.lop_days));
    let gross_salary = round2(input.base_salary + input.bonus);
    let net_salary = round2((gross_salary - input.deductions - lop_deduction).max(0.0));

    Ok(PayrollBreakdown {
        base_salary: input.base_salary,
        bonus: input.bonus,
        deductions: input.deductions,
        per_day_salary: round2(per_day_salary),
        payable_days: metrics.standard_working_days.saturating_sub(metrics.lop_days),
        lop_deduction,
        gross_salary,
        net_salary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(standard: u32, lop: u32) -> PeriodMetrics {
        PeriodMetrics {
            standard_working_days: standard,
            lop_days: lop,
            ..PeriodMetrics::zeroed("e1", 2024, 3)
        }
    }

    #[test]
    fn test_lop_deduction() {
        let input = PayrollInput {
            base_salary: 52000.0,
            bonus: 5000.0,
            deductions: 2000.0,
        };
        let p = compute_payroll(&metrics(26, 5), input).unwrap();
        assert_eq!(p.per_day_salary, 2000.0);
        assert_eq!(p.lop_deduction, 10000.0);
        assert_eq!(p.gross_salary, 57000.0);
        assert_eq!(p.net_salary, 45000.0);
        assert_eq!(p.payable_days, 21);
    }

    #[test]
    fn test_no_standard_days_means_no_deduction() {
        let input = PayrollInput {
            base_salary: 1000.0,
            ..Default::default()
        };
        let p = compute_payroll(&metrics(0, 0), input).unwrap();
        assert_eq!(p.lop_deduction, 0.0);
        assert_eq!(p.net_salary, 1000.0);
    }

    #[test]
    fn test_net_salary_never_negative() {
        let input = PayrollInput {
            base_salary: 2600.0,
            bonus: 0.0,
            deductions: 500.0,
        };
        let p = compute_payroll(&metrics(26, 26), input).unwrap();
        assert_eq!(p.lop_deduction, 2600.0);
        assert_eq!(p.net_salary, 0.0);
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let input = PayrollInput {
            base_salary: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            compute_payroll(&metrics(26, 0), input),
            Err(DerivationError::ConfigurationError(_))
        ));
    }
}
