//! Embassy async tasks

pub mod expander;

pub use expander::{expander_task, Expander};
