//! Coordination core for **Snow Relief**, a click-through overlay that
//! renders a visual-snow relief effect on every monitor.
//!
//! The crate owns every rule about *which* windows exist and *who* gets
//! told what, and none of the rendering. It is split along two seams:
//!
//! * [`host::WindowHost`] and [`host::ShortcutRegistry`] abstract the GUI
//!   runtime (window creation, show/hide, messaging, global shortcuts), so
//!   the coordinator can be driven by the Tauri shell or by a test double.
//! * [`coordinator::Coordinator`] holds the whole application state and
//!   reacts to [`coordinator::AppEvent`]s one at a time on a single thread.
//!
//! Content pages talk to the coordinator with named [`command::Command`]s;
//! the router fans most of them out to every overlay window.

pub mod command;
pub mod config;
pub mod coordinator;
pub mod display;
pub mod error;
pub mod host;
pub mod lifecycle;
pub mod links;
pub mod window;

pub use error::Error;
