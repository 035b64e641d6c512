// Single source of truth for all default values.

// --- Engine ---
pub const DEFAULT_MAX_PARENTS: usize = 10;
pub const DEFAULT_MAX_TERMS: usize = 1 << 24;

// --- Document ---
pub const DEFAULT_NEW_NODE_PRIOR: f64 = 0.5;
pub const DEFAULT_CLONE_OFFSET: [f64; 2] = [20.0, 20.0];
pub const DEFAULT_NODE_KIND: &str = "variable";

// --- Tracing ---
pub const LOG_ENV_VAR: &str = "CBN_LOG";
pub const DEFAULT_LOG_FILTER: &str = "cbn=info";
