//! Motion functions, one per animation kind.
//!
//! Every function maps an item plus the frame context to a
//! [`StrategyOutput`](super::context::StrategyOutput). None of them mutate
//! the item; state changes are returned and applied by the engine.

pub mod basic;
pub mod fields;
pub mod flocking;
pub mod geometric;
pub mod orbital;
pub mod pointer;
pub mod waves;
