//! Terminal UI for the dashboard
//!
//! This module contains:
//! - Layout engine (snapshot + size -> regions)
//! - Draw surface (regions -> ratatui widgets)
//! - Event handling and the event loop
//! - Terminal setup and management

pub mod app;
pub mod colors;
pub mod events;
pub mod layout;
pub mod render;
mod terminal;

pub use app::{run, App, Events, LoopState, Transition};
pub use events::{DashEvent, EventSource};
pub use layout::{layout, Region, RegionContent};
pub use render::draw_regions;
pub use terminal::TerminalManager;
