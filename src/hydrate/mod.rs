//! Reconciling server-rendered style elements with a new cache instance.
//!
//! This module provides:
//!
//! - [`StyleElementDirectory`]: The capability the sweep needs from a document
//! - [`MemoryDocument`]: An arena-backed document implementing it
//! - [`Detached`]: A directory with no document, for non-browser hosts
//! - [`hydrate_styles`]: The sweep itself
//! - [`HydrationReport`]: What a sweep did

mod directory;
mod memory;
mod sweep;

pub use directory::{Detached, NodeId, Scope, StyleElementDirectory};
pub use memory::MemoryDocument;
pub use sweep::{hydrate_styles, HydrationReport};
