//! Pre-built record datasets for grouping and sorting tests.

use serde::{Deserialize, Serialize};

/// A small employee record with a department to group on and a salary to sort
/// or fold over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleEmployee {
    pub id: u32,
    pub name: String,
    pub dept: String,
    pub salary: u32,
}

/// Six employees over three departments, first seen in the order
/// `eng`, `ops`, `sales`. Salaries contain ties.
#[must_use]
pub fn sample_employees() -> Vec<SampleEmployee> {
    let rows = [
        (1, "ana", "eng", 120),
        (2, "ben", "ops", 90),
        (3, "cy", "eng", 110),
        (4, "dee", "sales", 90),
        (5, "eli", "eng", 120),
        (6, "fay", "ops", 95),
    ];
    rows.into_iter()
        .map(|(id, name, dept, salary)| SampleEmployee {
            id,
            name: name.to_string(),
            dept: dept.to_string(),
            salary,
        })
        .collect()
}

/// [`sample_employees`] as JSON objects.
#[cfg(feature = "json")]
#[must_use]
pub fn sample_employee_records() -> Vec<serde_json::Value> {
    sample_employees()
        .into_iter()
        .map(|e| serde_json::json!({
            "id": e.id,
            "name": e.name,
            "dept": e.dept,
            "salary": e.salary,
        }))
        .collect()
}
