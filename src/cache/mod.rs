// Cache module for upstream responses.
// Holds GitHub data in memory for a fixed TTL per resource kind.

pub mod clock;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{CacheStats, CachedData, TtlCache};
