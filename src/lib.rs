// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Procedural animation engine for 2D grids of oriented vectors.
//!
//! A container is filled with a grid of short vectors whose headings are
//! driven by a selectable strategy (waves, noise flow fields, vortices,
//! pointer interaction, flocking, pulses). The crate computes positions,
//! angles and scale factors each tick; drawing is left to the host.
//!
//! # Key entry points
//!
//! - [`engine::VectorGridEngine`] - owns the items and advances them per tick
//! - [`options::Options`] - grid, vector, animation and culling settings
//! - [`animation::AnimationKind`] - the strategy catalog and its parameters
//! - [`pulse::PulseController`] - transient pulses layered over any strategy
//! - [`scheduler::AnimationLoop`] - paces ticks against display callbacks
//!
//! # Frame pipeline
//!
//! layout (rebuilt only when stale) → strategy evaluation → pulse
//! composition → angle smoothing → dynamic scale. The host then reads
//! [`engine::VectorGridEngine::items`] directly, or asks for culled,
//! colored [`frame::VectorPrimitive`]s through
//! [`engine::VectorGridEngine::frame`].

pub mod animation;
pub mod culling;
pub mod engine;
pub mod error;
pub mod frame;
pub mod item;
pub mod layout;
pub mod options;
pub mod pulse;
pub mod scheduler;
pub mod util;

pub use engine::{VectorGridCommand, VectorGridEngine};
pub use error::VectorGridError;
pub use item::{AnimatedVectorItem, AnimationState};
pub use options::Options;
