//! Event catalog: the fixed, ordered set of events a session can emit

pub mod catalog;

pub use catalog::EventCatalog;
