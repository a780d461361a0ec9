//! Request middleware.
//!
//! Currently only request correlation; see [`trace`].

pub mod trace;

pub use trace::Trace;
