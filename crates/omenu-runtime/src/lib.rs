#![forbid(unsafe_code)]

//! Runtime: resize debouncing and resize notification sources.

pub mod debounce;
pub mod listeners;

pub use debounce::{
    DebounceAction, DebounceConfig, DebounceLog, DebounceStats, ResizeDebouncer,
};
pub use listeners::{ListenerId, ResizeListeners, ResizeSource, next_listener_id};
