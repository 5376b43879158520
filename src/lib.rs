//! # cssinjs-context
//!
//! Runtime bookkeeping for a CSS-in-JS style injector: a reference-counted
//! style cache, the hydration sweep that reconciles server-rendered `<style>`
//! elements with a freshly created cache, and a hierarchical provider context
//! that hands configuration down to style-injection code.
//!
//! ## Core Concepts
//!
//! - [`CacheEntity`]: Reference-counted cache keyed by content/identity hash
//! - [`create_cache`]: Creates a cache instance, sweeping the document if one is bound
//! - [`StyleElementDirectory`]: Abstract capability for finding and moving style elements
//! - [`MemoryDocument`]: In-memory document used outside the browser and in tests
//! - [`StyleRoot`]: Explicit root of a provider tree; owns the default cache
//! - [`StyleProvider`]: Merges parent configuration with local overrides, memoized by value
//! - [`Keyframes`]: Named animation whose public name can be namespaced per cache
//!
//! ## Quick Start
//!
//! ```rust
//! use cssinjs_context::{HashPriority, StyleProvider, StyleProviderProps, StyleRoot};
//!
//! let root = StyleRoot::new();
//! let parent = root.context();
//!
//! let mut provider = StyleProvider::new();
//! let ctx = provider.resolve(
//!     &root,
//!     &parent,
//!     StyleProviderProps::new().hash_priority(HashPriority::High),
//! );
//!
//! assert_eq!(ctx.priority(), HashPriority::High);
//! assert!(ctx.default_cache);
//! ```
//!
//! ## Hydration
//!
//! Style elements rendered on the server carry [`ATTR_MARK`]. When a cache is
//! created against a document, those elements are claimed by the new cache,
//! moved to the front of `<head>`, and deduplicated by hash.
//!
//! ```rust
//! use cssinjs_context::{create_cache, MemoryDocument, ATTR_MARK};
//!
//! let mut doc = MemoryDocument::new();
//! let body = doc.body().unwrap();
//! doc.add_style(body, "h1", ".a{color:red}");
//! doc.add_style(body, "h1", ".a{color:red}");
//!
//! let cache = create_cache(Some(&mut doc));
//! assert!(!cache.instance_id().is_empty());
//! assert_eq!(doc.styles_with(ATTR_MARK).len(), 1);
//! ```

pub mod cache;
pub mod config;
pub mod context;
pub mod css;
pub mod error;
pub mod hydrate;

/// Attribute carrying the design-token hash of an injected style element.
pub const ATTR_TOKEN: &str = "data-token-hash";

/// Attribute carrying the content hash of an injected style element.
pub const ATTR_MARK: &str = "data-css-hash";

/// Attribute carrying the cache path of an injected style element.
pub const ATTR_CACHE_PATH: &str = "data-cache-path";

/// Name of the non-serialized element property that records which cache
/// instance owns a style element.
pub const CSS_IN_JS_INSTANCE: &str = "__cssinjs_instance__";

// Re-export the public surface at the crate root
pub use cache::{create_cache, path_key, CacheEntity, CacheValue};
pub use config::StyleConfig;
pub use context::{
    merge_context, Container, HashPriority, MemoCell, MockMode, StyleContextProps,
    StyleProvider, StyleProviderProps, StyleRoot,
};
pub use css::{
    transformer_fn, CssInterpolation, CssObject, Keyframes, Linter, LinterInfo, Transformer,
    ValueWrapper, MULTI_VALUE, SKIP_CHECK,
};
pub use error::ConfigError;
pub use hydrate::{
    hydrate_styles, Detached, HydrationReport, MemoryDocument, NodeId, Scope,
    StyleElementDirectory,
};
