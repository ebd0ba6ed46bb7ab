pub mod freshness;
pub mod proxy;
pub mod store;

pub use proxy::ProxyCache;
pub use store::{MatchCacheRecord, MatchCacheStore};
