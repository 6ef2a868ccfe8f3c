/// A single validated employee record.
///
/// `Default` yields the empty sentinel record returned by
/// [`highest_paid`](crate::aggregate::highest_paid) for an empty collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Employee {
    pub name: String,
    pub id: i64,
    pub department: String,
    pub salary: f64,
}

impl Employee {
    pub fn new(
        name: impl Into<String>,
        id: i64,
        department: impl Into<String>,
        salary: f64,
    ) -> Self {
        Self {
            name: name.into(),
            id,
            department: department.into(),
            salary,
        }
    }

    /// True for the sentinel produced by `Employee::default()`
    pub fn is_sentinel(&self) -> bool {
        self.name.is_empty() && self.department.is_empty() && self.id == 0 && self.salary == 0.0
    }
}
