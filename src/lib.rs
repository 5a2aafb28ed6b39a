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

//! Camera composition for 3D robot-soccer match viewers.
//!
//! Fieldview manages one coherent viewpoint over a simulated soccer match.
//! The camera is driven by free user navigation, by scripted positioning
//! that reacts to referee decisions, and by automatic tracking of a
//! selected player or the ball. The same camera maps screen clicks back to
//! scene objects and field positions.
//!
//! # Key entry points
//!
//! - [`session::CameraSession`] - owns the camera, controller and tracking
//!   overlay and advances them once per frame
//! - [`camera::ProjectionCamera`] - pose, lens, stereo rig and matrices
//! - [`controller::CameraController`] - pluggable positioning strategies
//! - [`tracking::TargetTracker`] - smooth follow of a selected entity
//! - [`picking::ObjectPicker`] - screen point to object or field position
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Frame order
//!
//! Each [`session::CameraSession::update`] runs camera integration, then
//! the controller, then the tracking overlay. Game-state notifications
//! arrive synchronously between frames through
//! [`game::GameStateListener`]; controllers only queue edits there and
//! apply them on their next advance.
//!
//! Everything here is single-threaded: the session and the game state are
//! confined to the frame thread.

pub mod camera;
pub mod controller;
pub mod error;
pub mod game;
pub mod options;
pub mod picking;
pub mod session;
pub mod tracking;
pub mod util;
pub mod viewport;

pub use camera::{CameraPose, ProjectionCamera};
pub use error::CameraError;
pub use game::GameState;
pub use options::Options;
pub use session::{CameraSession, FrameReport};
pub use viewport::{SurfaceCapabilities, Viewport};
