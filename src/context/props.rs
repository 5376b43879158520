//! Resolved configuration and provider overrides.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cache::CacheEntity;
use crate::css::{CssObject, Linter, LinterInfo, Transformer};
use crate::hydrate::NodeId;

/// Priority of hashed selectors.
///
/// `Low` wraps the hash class in `:where(...)` so it adds no specificity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashPriority {
    #[default]
    Low,
    High,
}

/// Forces server or client behaviour. Test only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MockMode {
    Server,
    Client,
}

/// Where styles get injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    Element(NodeId),
    ShadowRoot(NodeId),
}

impl Container {
    pub fn node(self) -> NodeId {
        match self {
            Container::Element(node) | Container::ShadowRoot(node) => node,
        }
    }
}

pub type Transformers = Vec<Arc<dyn Transformer>>;
pub type Linters = Vec<Arc<dyn Linter>>;

/// The configuration visible to one subtree.
///
/// Exactly one cache is active per subtree. `default_cache` is true only when
/// no provider on the path from the root supplied its own cache.
#[derive(Clone)]
pub struct StyleContextProps {
    pub auto_clear: Option<bool>,
    pub mock: Option<MockMode>,
    pub cache: Arc<CacheEntity>,
    pub default_cache: bool,
    pub hash_priority: Option<HashPriority>,
    pub container: Option<Container>,
    pub ssr_inline: Option<bool>,
    pub transformers: Option<Transformers>,
    pub linters: Option<Linters>,
    pub(crate) is_root: bool,
}

impl StyleContextProps {
    /// Builds a root context around `cache`.
    pub(crate) fn root(cache: Arc<CacheEntity>) -> Self {
        Self {
            auto_clear: None,
            mock: None,
            cache,
            default_cache: true,
            hash_priority: Some(HashPriority::Low),
            container: None,
            ssr_inline: None,
            transformers: None,
            linters: None,
            is_root: true,
        }
    }

    /// Whether this is the context of a [`StyleRoot`](crate::StyleRoot) rather than of a provider.
    pub fn is_root(&self) -> bool {
        self.is_root
    }

    /// Effective hash priority.
    pub fn priority(&self) -> HashPriority {
        self.hash_priority.unwrap_or_default()
    }

    /// Whether cache entries should be dropped when their last reference goes.
    pub fn should_auto_clear(&self) -> bool {
        self.auto_clear.unwrap_or(false)
    }

    /// Runs every transformer over `css`, in order.
    pub fn transform(&self, css: CssObject) -> CssObject {
        self.transformers
            .iter()
            .flatten()
            .fold(css, |css, transformer| transformer.visit(css))
    }

    /// Runs every linter over one declaration, in order.
    pub fn lint(&self, key: &str, value: &str, info: &LinterInfo) {
        for linter in self.linters.iter().flatten() {
            linter.lint(key, value, info);
        }
    }
}

impl PartialEq for StyleContextProps {
    fn eq(&self, other: &Self) -> bool {
        self.auto_clear == other.auto_clear
            && self.mock == other.mock
            && Arc::ptr_eq(&self.cache, &other.cache)
            && self.default_cache == other.default_cache
            && self.hash_priority == other.hash_priority
            && self.container == other.container
            && self.ssr_inline == other.ssr_inline
            && same_entries(&self.transformers, &other.transformers)
            && same_entries(&self.linters, &other.linters)
            && self.is_root == other.is_root
    }
}

impl fmt::Debug for StyleContextProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleContextProps")
            .field("auto_clear", &self.auto_clear)
            .field("mock", &self.mock)
            .field("cache", &self.cache.instance_id())
            .field("default_cache", &self.default_cache)
            .field("hash_priority", &self.hash_priority)
            .field("container", &self.container)
            .field("ssr_inline", &self.ssr_inline)
            .field("transformers", &self.transformers.as_ref().map(Vec::len))
            .field("linters", &self.linters.as_ref().map(Vec::len))
            .finish()
    }
}

/// Overrides supplied by one provider. `None` means "inherit".
///
/// # Example
///
/// ```rust
/// use cssinjs_context::{HashPriority, StyleProviderProps};
///
/// let props = StyleProviderProps::new()
///     .hash_priority(HashPriority::High)
///     .auto_clear(true);
/// assert!(!props.is_empty());
/// assert!(StyleProviderProps::new().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct StyleProviderProps {
    pub auto_clear: Option<bool>,
    pub mock: Option<MockMode>,
    pub cache: Option<Arc<CacheEntity>>,
    /// Accepted for parity with the resolved props; always recomputed by the merge.
    pub default_cache: Option<bool>,
    pub hash_priority: Option<HashPriority>,
    pub container: Option<Container>,
    pub ssr_inline: Option<bool>,
    pub transformers: Option<Transformers>,
    pub linters: Option<Linters>,
}

impl StyleProviderProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn auto_clear(mut self, auto_clear: bool) -> Self {
        self.auto_clear = Some(auto_clear);
        self
    }

    pub fn mock(mut self, mock: MockMode) -> Self {
        self.mock = Some(mock);
        self
    }

    /// Supplies an explicit cache, shared with descendants that do not supply their own.
    pub fn cache(mut self, cache: Arc<CacheEntity>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn default_cache(mut self, default_cache: bool) -> Self {
        self.default_cache = Some(default_cache);
        self
    }

    pub fn hash_priority(mut self, priority: HashPriority) -> Self {
        self.hash_priority = Some(priority);
        self
    }

    pub fn container(mut self, container: Container) -> Self {
        self.container = Some(container);
        self
    }

    pub fn ssr_inline(mut self, ssr_inline: bool) -> Self {
        self.ssr_inline = Some(ssr_inline);
        self
    }

    /// Replaces the transformer list.
    pub fn transformers(mut self, transformers: Vec<Arc<dyn Transformer>>) -> Self {
        self.transformers = Some(transformers);
        self
    }

    /// Appends one transformer.
    pub fn transformer(mut self, transformer: Arc<dyn Transformer>) -> Self {
        self.transformers.get_or_insert_with(Vec::new).push(transformer);
        self
    }

    /// Replaces the linter list.
    pub fn linters(mut self, linters: Vec<Arc<dyn Linter>>) -> Self {
        self.linters = Some(linters);
        self
    }

    /// Appends one linter.
    pub fn linter(mut self, linter: Arc<dyn Linter>) -> Self {
        self.linters.get_or_insert_with(Vec::new).push(linter);
        self
    }

    /// Whether no field was supplied.
    pub fn is_empty(&self) -> bool {
        self.auto_clear.is_none()
            && self.mock.is_none()
            && self.cache.is_none()
            && self.default_cache.is_none()
            && self.hash_priority.is_none()
            && self.container.is_none()
            && self.ssr_inline.is_none()
            && self.transformers.is_none()
            && self.linters.is_none()
    }
}

impl PartialEq for StyleProviderProps {
    fn eq(&self, other: &Self) -> bool {
        self.auto_clear == other.auto_clear
            && self.mock == other.mock
            && match (&self.cache, &other.cache) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
            && self.default_cache == other.default_cache
            && self.hash_priority == other.hash_priority
            && self.container == other.container
            && self.ssr_inline == other.ssr_inline
            && same_entries(&self.transformers, &other.transformers)
            && same_entries(&self.linters, &other.linters)
    }
}

impl fmt::Debug for StyleProviderProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleProviderProps")
            .field("auto_clear", &self.auto_clear)
            .field("mock", &self.mock)
            .field("cache", &self.cache.as_ref().map(|c| c.instance_id().to_string()))
            .field("default_cache", &self.default_cache)
            .field("hash_priority", &self.hash_priority)
            .field("container", &self.container)
            .field("ssr_inline", &self.ssr_inline)
            .field("transformers", &self.transformers.as_ref().map(Vec::len))
            .field("linters", &self.linters.as_ref().map(Vec::len))
            .finish()
    }
}

// Lists compare structurally; their function entries only equal themselves.
fn same_entries<T: ?Sized>(a: &Option<Vec<Arc<T>>>, b: &Option<Vec<Arc<T>>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| Arc::ptr_eq(x, y))
        }
        (None, None) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::{transformer_fn, CssInterpolation};

    fn noop() -> Arc<dyn Transformer> {
        transformer_fn(|css| css)
    }

    #[test]
    fn test_hash_priority_default_is_low() {
        assert_eq!(HashPriority::default(), HashPriority::Low);
    }

    #[test]
    fn test_props_equal_by_value() {
        let a = StyleProviderProps::new().hash_priority(HashPriority::High).ssr_inline(true);
        let b = StyleProviderProps::new().hash_priority(HashPriority::High).ssr_inline(true);
        assert_eq!(a, b);
        assert_ne!(a, b.auto_clear(false));
    }

    #[test]
    fn test_props_cache_compares_by_identity() {
        let cache = Arc::new(CacheEntity::new("x"));
        let twin = Arc::new(CacheEntity::new("x"));
        let a = StyleProviderProps::new().cache(Arc::clone(&cache));
        assert_eq!(a, StyleProviderProps::new().cache(cache));
        assert_ne!(a, StyleProviderProps::new().cache(twin));
    }

    #[test]
    fn test_transformer_lists_compare_by_entry_identity() {
        let t = noop();
        let a = StyleProviderProps::new().transformers(vec![Arc::clone(&t)]);
        let b = StyleProviderProps::new().transformers(vec![Arc::clone(&t)]);
        let c = StyleProviderProps::new().transformers(vec![noop()]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, StyleProviderProps::new().transformers(vec![]));
        assert_ne!(a, StyleProviderProps::new());
    }

    #[test]
    fn test_is_empty_tracks_every_field() {
        assert!(StyleProviderProps::new().is_empty());
        assert!(!StyleProviderProps::new().default_cache(true).is_empty());
        assert!(!StyleProviderProps::new().linters(vec![]).is_empty());
        assert!(!StyleProviderProps::new()
            .container(Container::Element(NodeId::new(1)))
            .is_empty());
    }

    #[test]
    fn test_builder_appends() {
        let props = StyleProviderProps::new().transformer(noop()).transformer(noop());
        assert_eq!(props.transformers.map(|t| t.len()), Some(2));
    }

    #[test]
    fn test_root_context_defaults() {
        let ctx = StyleContextProps::root(Arc::new(CacheEntity::new("root")));
        assert!(ctx.is_root());
        assert!(ctx.default_cache);
        assert_eq!(ctx.priority(), HashPriority::Low);
        assert!(!ctx.should_auto_clear());
    }

    #[test]
    fn test_transform_applies_in_order() {
        let mut ctx = StyleContextProps::root(Arc::new(CacheEntity::new("root")));
        ctx.transformers = Some(vec![
            transformer_fn(|css: CssObject| css.with("order", "first")),
            transformer_fn(|css: CssObject| css.with("order", "second")),
        ]);

        let out = ctx.transform(CssObject::new());
        assert_eq!(
            out.get("order"),
            Some(&CssInterpolation::Str("second".to_string()))
        );
    }

    #[test]
    fn test_transform_without_transformers_is_identity() {
        let ctx = StyleContextProps::root(Arc::new(CacheEntity::new("root")));
        let css = CssObject::new().with("color", "red");
        assert_eq!(ctx.transform(css.clone()), css);
    }

    #[test]
    fn test_lint_runs_every_linter() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = |calls: Arc<AtomicUsize>| -> Arc<dyn Linter> {
            Arc::new(move |_: &str, _: &str, _: &LinterInfo| {
                calls.fetch_add(1, Ordering::SeqCst);
            })
        };

        let mut ctx = StyleContextProps::root(Arc::new(CacheEntity::new("root")));
        ctx.linters = Some(vec![counter(Arc::clone(&calls)), counter(Arc::clone(&calls))]);
        ctx.lint("color", "red", &LinterInfo::default());

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
