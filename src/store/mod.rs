//! Reactive in-memory state
//!
//! `Store<T>` is the publish/subscribe primitive; `RecordStore` and
//! `PreferenceStore` are the two stores the dashboard observes.

pub mod observable;
pub mod preferences;
pub mod records;

pub use observable::{Store, Subscription};
pub use preferences::PreferenceStore;
pub use records::{RecordSet, RecordStore};
