//! Host editor integration
//!
//! Everything that touches a live editor: the adapter trait hosts
//! implement, the listener that drives the cache from view lifecycle
//! events, and the palette commands.

pub mod adapter;
pub mod commands;
pub mod listener;

pub use adapter::{EditorAdapter, ViewId};
pub use commands::CacheCommands;
pub use listener::{UNFOLD_ALL_COMMAND, ViewEventListener};
