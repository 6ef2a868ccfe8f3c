//! Aggregate views over a record collection. None of these mutate a record.

use crate::employee::Employee;

/// Arithmetic mean of all salaries, `0.0` for an empty collection
pub fn mean_salary(records: &[Employee]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }

    let count = records.len() as f64;
    let total: f64 = records.iter().map(|employee| employee.salary).sum();
    if total.is_finite() {
        total / count
    } else {
        // The sum overflowed; scaling each term first keeps the mean finite
        records.iter().map(|employee| employee.salary / count).sum()
    }
}

/// The first record, in input order, carrying the maximum salary.
///
/// Returns the `Employee::default()` sentinel for an empty collection.
pub fn highest_paid(records: &[Employee]) -> Employee {
    records
        .iter()
        .fold(None::<&Employee>, |best, candidate| match best {
            Some(best) if best.salary >= candidate.salary => Some(best),
            _ => Some(candidate),
        })
        .cloned()
        .unwrap_or_default()
}

/// Records in ascending `id` order; equal ids keep their input order
pub fn sort_by_id(records: &[Employee]) -> Vec<Employee> {
    let mut sorted = records.to_vec();
    // `sort_by_key` is stable
    sorted.sort_by_key(|employee| employee.id);
    sorted
}

/// The three derived views the report is built from
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub mean_salary: f64,
    pub highest_paid: Employee,
    pub sorted: Vec<Employee>,
}

impl Summary {
    pub fn compute(records: &[Employee]) -> Self {
        Self {
            mean_salary: mean_salary(records),
            highest_paid: highest_paid(records),
            sorted: sort_by_id(records),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }
}
