pub mod collector;
pub mod extractor;
pub mod hub;
pub mod ledger;
pub mod reconciler;
pub mod retweeter;
pub mod sheet;
pub mod stats;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;
pub mod webhook;
