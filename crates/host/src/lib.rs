//! Cardspace Host
//!
//! Owns a live [`Workspace`](cardspace_core_layout::Workspace) and serves the
//! line-delimited JSON protocol from `cardspace-ipc` over stdio.

pub mod bridge;
pub mod config;
pub mod input;
pub mod state;

pub use bridge::UpdateRecorder;
pub use config::Config;
pub use input::{read_frame, Frame};
pub use state::HostState;
