//! Merging provider overrides onto the parent configuration.

use std::sync::Arc;

use super::props::{StyleContextProps, StyleProviderProps};
use super::root::StyleRoot;

/// Resolves the configuration of one provider.
///
/// Every field supplied in `overrides` replaces the parent's value; every
/// other field is inherited. The cache is chosen as follows:
///
/// - an explicit `overrides.cache` always wins;
/// - a provider directly under the root that overrides nothing reuses the
///   root's default cache;
/// - while the whole chain runs on auto-created caches, each provider gets a
///   brand-new cache from `root` (and with it a hydration sweep) instead of
///   sharing its parent's;
/// - below a provider that supplied its own cache, that cache is inherited.
///
/// `default_cache` stays true only while no provider on the path supplied a
/// cache.
pub fn merge_context(
    parent: &StyleContextProps,
    overrides: &StyleProviderProps,
    root: &StyleRoot,
) -> StyleContextProps {
    let cache = match &overrides.cache {
        Some(cache) => Arc::clone(cache),
        None if parent.is_root && overrides.is_empty() => Arc::clone(&parent.cache),
        None if parent.default_cache => root.create_cache(),
        None => Arc::clone(&parent.cache),
    };

    StyleContextProps {
        auto_clear: overrides.auto_clear.or(parent.auto_clear),
        mock: overrides.mock.or(parent.mock),
        cache,
        default_cache: overrides.cache.is_none() && parent.default_cache,
        hash_priority: overrides.hash_priority.or(parent.hash_priority),
        container: overrides.container.or(parent.container),
        ssr_inline: overrides.ssr_inline.or(parent.ssr_inline),
        transformers: overrides
            .transformers
            .clone()
            .or_else(|| parent.transformers.clone()),
        linters: overrides
            .linters
            .clone()
            .or_else(|| parent.linters.clone()),
        is_root: false,
    }
}
