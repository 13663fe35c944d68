//! Structured logging schema and field name constants for taxon.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by the same field names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, activation), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration (terms, entries, text nodes) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "api", "index", "db", "core"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "maintainer", "query", "rewriter", "router", "pool"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "index_location", "term_page", "rewrite", "resolve"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Taxonomy name being operated on.
pub const TAXONOMY: &str = "taxonomy";

/// Content location (URL) being indexed or listed.
pub const LOCATION: &str = "location";

/// Term being resolved.
pub const TERM: &str = "term";

/// Requested page number.
pub const PAGE: &str = "page";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of terms extracted for a location.
pub const TERM_COUNT: &str = "term_count";

/// Number of entries upserted during a reindex.
pub const ADDED: &str = "added";

/// Number of stale entries deleted during a reindex.
pub const REMOVED: &str = "removed";

/// Number of entries whose sort key changed during a reindex.
pub const UPDATED: &str = "updated";

/// Total items behind a paginated listing.
pub const TOTAL: &str = "total";

// ─── Database fields ───────────────────────────────────────────────────────

/// Number of active connections in the pool.
pub const POOL_SIZE: &str = "pool_size";

/// Number of idle connections in the pool.
pub const POOL_IDLE: &str = "pool_idle";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
