//! locomotion_core: first-person player locomotion.
//!
//! The crate owns the camera-relative input filter, the movement controller
//! (speed/direction blending and velocity integration), the camera rig
//! (mouse look, head bob, mesh alignment), and the locomotion state machine
//! driving them. The host supplies collision resolution through the
//! [`host::CharacterBody`] trait and the two frame-loop ticks; everything
//! else lives here.

#![deny(warnings, clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::struct_excessive_bools,
    clippy::must_use_candidate,
    clippy::float_cmp,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::doc_markdown,
    clippy::similar_names,
    clippy::if_not_else,
    clippy::items_after_statements,
    clippy::suboptimal_flops,
    clippy::return_self_not_must_use
)]

pub mod camera;
pub mod fsm;
pub mod host;
pub mod input;
pub mod movement;
pub mod player;
pub mod tasks;

pub use data_runtime::configs::locomotion::LocomotionCfg;
pub use player::{Player, PlayerState};
