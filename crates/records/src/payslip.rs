use revline_core::{DocumentError, DocumentResult, Money, YearMonth};

/// One salary deduction (EPF, SOCSO, advance, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deduction {
    pub title: String,
    pub amount: Money,
}

impl Deduction {
    pub fn new(title: impl Into<String>, amount: Money) -> DocumentResult<Self> {
        if amount.is_negative() {
            return Err(DocumentError::invalid("deduction amount must not be negative"));
        }
        Ok(Self {
            title: title.into(),
            amount,
        })
    }
}

/// Immutable snapshot of an employee's monthly salary, ready for printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayslipRecord {
    employee_id: String,
    employee_name: String,
    month: YearMonth,
    base_salary: Money,
    deductions: Vec<Deduction>,
}

impl PayslipRecord {
    pub fn new(
        employee_id: impl Into<String>,
        employee_name: impl Into<String>,
        month: YearMonth,
        base_salary: Money,
        deductions: Vec<Deduction>,
    ) -> DocumentResult<Self> {
        let employee_id = employee_id.into();
        let employee_name = employee_name.into();
        if employee_id.trim().is_empty() {
            return Err(DocumentError::MissingRequiredField("employeeId"));
        }
        if employee_name.trim().is_empty() {
            return Err(DocumentError::MissingRequiredField("employeeName"));
        }
        if base_salary.is_negative() {
            return Err(DocumentError::invalid("base salary must not be negative"));
        }
        if deductions.iter().any(|d| d.amount.is_negative()) {
            return Err(DocumentError::invalid("deduction amount must not be negative"));
        }

        Ok(Self {
            employee_id,
            employee_name,
            month,
            base_salary,
            deductions,
        })
    }

    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    pub fn employee_name(&self) -> &str {
        &self.employee_name
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn base_salary(&self) -> Money {
        self.base_salary
    }

    pub fn deductions(&self) -> &[Deduction] {
        &self.deductions
    }

    pub fn total_deductions(&self) -> DocumentResult<Money> {
        self.deductions
            .iter()
            .try_fold(Money::ZERO, |acc, d| acc.checked_add(d.amount))
    }

    /// `base_salary − total_deductions`. Not clamped: deductions may exceed the base.
    pub fn net_salary(&self) -> DocumentResult<Money> {
        Ok(self.base_salary - self.total_deductions()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month() -> YearMonth {
        YearMonth::new(2026, 9).unwrap()
    }

    fn deduction(title: &str, cents: i64) -> Deduction {
        Deduction::new(title, Money::from_cents(cents)).unwrap()
    }

    #[test]
    fn net_salary_subtracts_all_deductions() {
        let slip = PayslipRecord::new(
            "7",
            "Alice",
            month(),
            Money::from_cents(300_000),
            vec![deduction("EPF", 33_000), deduction("SOCSO", 1_475)],
        )
        .unwrap();
        assert_eq!(slip.total_deductions().unwrap(), Money::from_cents(34_475));
        assert_eq!(slip.net_salary().unwrap(), Money::from_cents(265_525));
    }

    #[test]
    fn net_salary_can_go_negative() {
        let slip = PayslipRecord::new(
            "7",
            "Alice",
            month(),
            Money::from_cents(100_000),
            vec![deduction("Advance", 120_000)],
        )
        .unwrap();
        assert_eq!(slip.net_salary().unwrap(), Money::from_cents(-20_000));
    }

    #[test]
    fn missing_employee_name_is_reported() {
        let err = PayslipRecord::new("7", "", month(), Money::ZERO, vec![]).unwrap_err();
        assert_eq!(err, DocumentError::MissingRequiredField("employeeName"));
    }

    #[test]
    fn negative_deduction_is_rejected() {
        assert!(Deduction::new("Bonus", Money::from_cents(-1)).is_err());
    }
}
