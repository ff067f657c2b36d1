//! Configuration module

mod site;

pub use site::BlogConfig;
pub use site::CacheConfig;
