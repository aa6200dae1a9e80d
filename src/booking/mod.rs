//! Core booking domain: the quest catalog, venue settings, the slot
//! generator, the availability rules engine, and the pricing engine.
//!
//! Everything in here except the occupancy lookups is a pure function of
//! its inputs; the engines are consulted both when rendering choices and
//! once more right before a booking is committed.

pub mod availability;
pub mod catalog;
pub mod pricing;
pub mod settings;
pub mod slots;

pub use availability::*;
pub use catalog::*;
pub use pricing::*;
pub use settings::*;
pub use slots::*;
