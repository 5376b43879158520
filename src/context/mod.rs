//! Hierarchical style configuration.
//!
//! This module provides:
//!
//! - [`StyleRoot`]: The explicit root of a provider tree, owning the default cache
//! - [`StyleContextProps`]: The resolved configuration seen by a subtree
//! - [`StyleProviderProps`]: Partial overrides supplied by one provider
//! - [`StyleProvider`]: Merges overrides onto the parent, memoized by value
//! - [`merge_context`]: The unmemoized merge
//! - [`MemoCell`]: Last-input memoization with a pluggable comparator
//!
//! Providers resolve parent-first: a child always receives its parent's
//! already resolved `Arc<StyleContextProps>`.

mod memo;
mod merge;
mod props;
mod provider;
mod root;

pub use memo::MemoCell;
pub use merge::merge_context;
pub use props::{
    Container, HashPriority, Linters, MockMode, StyleContextProps, StyleProviderProps, Transformers,
};
pub use provider::StyleProvider;
pub use root::StyleRoot;
