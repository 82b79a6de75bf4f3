pub mod classifier;
pub mod config;

pub use classifier::{classify, Verdict};
pub use config::DenylistConfig;
