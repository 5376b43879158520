//! Memoized providers.

use std::sync::Arc;

use super::memo::MemoCell;
use super::merge::merge_context;
use super::props::{StyleContextProps, StyleProviderProps};
use super::root::StyleRoot;

type Deps = (Arc<StyleContextProps>, StyleProviderProps);

// Both sides compare by value: `Arc<T>: PartialEq` delegates to `T`.
fn inputs_changed(prev: &Deps, next: &Deps) -> bool {
    prev.0 != next.0 || prev.1 != next.1
}

/// One provider in the tree.
///
/// Keep a `StyleProvider` alive for as long as the component it belongs to is
/// mounted, and call [`resolve`](Self::resolve) on every render. The merged
/// configuration is rebuilt only when the parent configuration or the
/// overrides change by value; otherwise the previous `Arc` is returned.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use cssinjs_context::{StyleProvider, StyleProviderProps, StyleRoot};
///
/// let root = StyleRoot::new();
/// let parent = root.context();
/// let mut provider = StyleProvider::new();
///
/// let first = provider.resolve(&root, &parent, StyleProviderProps::new().ssr_inline(true));
/// let second = provider.resolve(&root, &parent, StyleProviderProps::new().ssr_inline(true));
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
#[derive(Debug)]
pub struct StyleProvider {
    memo: MemoCell<Deps, Arc<StyleContextProps>>,
}

impl StyleProvider {
    pub fn new() -> Self {
        Self {
            memo: MemoCell::new(inputs_changed),
        }
    }

    /// Resolves this provider's configuration for the current render.
    pub fn resolve(
        &mut self,
        root: &StyleRoot,
        parent: &Arc<StyleContextProps>,
        props: StyleProviderProps,
    ) -> Arc<StyleContextProps> {
        self.memo
            .get_or_update((Arc::clone(parent), props), |(parent, props)| {
                log::debug!("recomputing style context: {:?}", props);
                Arc::new(merge_context(parent, props, root))
            })
    }

    /// The configuration produced by the last [`resolve`](Self::resolve).
    pub fn current(&self) -> Option<Arc<StyleContextProps>> {
        self.memo.value().cloned()
    }
}

impl Default for StyleProvider {
    fn default() -> Self {
        Self::new()
    }
}
