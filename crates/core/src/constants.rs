//! Constants shared across the infra workspace

// Resource manager defaults
pub const DEFAULT_MANAGER_NAME: &str = "resources";
pub const DEFAULT_STACK_CAPACITY: usize = 2;

// Label used for entries registered without a resource value
pub const DEFERRED_ACTION_LABEL: &str = "deferred action";

// Separator used when none is given
pub const DEFAULT_SEPARATOR: &str = ", ";

// Logging
pub const INFRA_LOG_VAR: &str = "INFRA_LOG";
pub const DEFAULT_LOG_FILTER: &str = "info";
