//! Animation strategies: the kind catalog, its parameters, and the angle
//! math shared by the engine.

pub mod angle;
pub mod catalog;
pub mod context;
pub mod kind;
pub mod strategies;

pub use self::context::{FrameContext, StrategyOutput, StrategyRuntime};
pub use self::kind::AnimationKind;
