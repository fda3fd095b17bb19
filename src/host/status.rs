use std::fmt;

/// Workload status reported to the orchestrator.
///
/// Each variant carries the operator-visible message shown next to the
/// status level in the model's unit listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The workload is running and serving.
    Active(String),
    /// The unit is busy installing or reconfiguring the workload.
    Maintenance(String),
    /// The unit needs operator intervention before it can proceed.
    Blocked(String),
    /// The unit is waiting on something outside its control.
    Waiting(String),
}

impl Status {
    /// Status level keyword as the `status-set` tool expects it.
    pub fn level(&self) -> &'static str {
        match self {
            Status::Active(_) => "active",
            Status::Maintenance(_) => "maintenance",
            Status::Blocked(_) => "blocked",
            Status::Waiting(_) => "waiting",
        }
    }

    /// Operator-visible message attached to the status.
    pub fn message(&self) -> &str {
        match self {
            Status::Active(message)
            | Status::Maintenance(message)
            | Status::Blocked(message)
            | Status::Waiting(message) => message,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level(), self.message())
    }
}
