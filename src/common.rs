//! Shared identifiers used across workers and the orchestrator

/// Type-safe wrapper for worker ID to prevent confusion with request counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct WorkerId(pub u32);

impl From<u32> for WorkerId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for WorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
