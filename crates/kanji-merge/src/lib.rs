#![deny(unsafe_code)]

pub mod ids;
pub mod merge;

pub use crate::ids::{IdAssignment, assign_ids};
pub use crate::merge::{MergeOutcome, merge};
