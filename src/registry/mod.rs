// ABOUTME: Registry module - the named set of configured providers.
// ABOUTME: Tracks which provider answers single-turn requests.

mod registry;

pub use registry::*;
