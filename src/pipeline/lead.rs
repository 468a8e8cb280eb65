//! Lead and employee records

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Lead identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(pub Uuid);

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Employee identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub Uuid);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A lead as held in client memory.
///
/// Stage membership lives in the board, not on the lead, so the
/// one-bucket invariant has a single source of truth. The descriptive
/// fields are irrelevant to the state machine and never mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Lead identifier
    pub id: LeadId,
    /// Company name
    #[serde(default)]
    pub company: String,
    /// Contact person
    #[serde(default)]
    pub contact: String,
    /// Deal value
    #[serde(default)]
    pub value: Option<f64>,
    /// Assigned employee; `None` is the unassigned sentinel
    #[serde(default)]
    pub assigned_employee_id: Option<EmployeeId>,
}

/// An employee eligible as an assignment target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Employee identifier
    pub id: EmployeeId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Email address
    #[serde(default)]
    pub email: String,
}

/// Bucket key of the assignment board: one bucket per employee plus the
/// unassigned bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentSlot {
    /// The unassigned bucket
    Unassigned,
    /// An employee's bucket
    Employee(EmployeeId),
}

impl AssignmentSlot {
    /// The assignee this slot represents, `None` for unassigned.
    pub fn employee_id(&self) -> Option<EmployeeId> {
        match self {
            AssignmentSlot::Unassigned => None,
            AssignmentSlot::Employee(id) => Some(*id),
        }
    }
}

impl From<Option<EmployeeId>> for AssignmentSlot {
    fn from(assignee: Option<EmployeeId>) -> Self {
        match assignee {
            None => AssignmentSlot::Unassigned,
            Some(id) => AssignmentSlot::Employee(id),
        }
    }
}

impl Serialize for AssignmentSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AssignmentSlot::Unassigned => serializer.serialize_str("unassigned"),
            AssignmentSlot::Employee(id) => id.serialize(serializer),
        }
    }
}

impl fmt::Display for AssignmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentSlot::Unassigned => f.write_str("unassigned"),
            AssignmentSlot::Employee(id) => id.fmt(f),
        }
    }
}
