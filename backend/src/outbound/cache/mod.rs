//! Response cache adapters.
//!
//! [`InMemoryResponseCache`] keeps entries in process and suits a single
//! node or tests; [`RedisResponseCache`] shares entries across nodes.

mod in_memory;
mod redis;

pub use in_memory::InMemoryResponseCache;
pub use redis::RedisResponseCache;
