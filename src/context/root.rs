//! The explicit root of a provider tree.

use std::fmt;
use std::sync::{Arc, Mutex};

use once_cell::sync::OnceCell;

use super::props::StyleContextProps;
use crate::cache::{create_cache, CacheEntity};
use crate::hydrate::StyleElementDirectory;

type SharedDirectory = Arc<Mutex<dyn StyleElementDirectory + Send>>;

/// Entry point of a provider tree.
///
/// Holds the optional document binding every cache in the tree sweeps on
/// creation, and the default cache used by the root context. The default
/// cache is created on first use and at most once per root.
///
/// # Example
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use cssinjs_context::{MemoryDocument, StyleRoot, ATTR_MARK};
///
/// let doc = Arc::new(Mutex::new(MemoryDocument::new()));
/// {
///     let mut doc = doc.lock().unwrap();
///     let body = doc.body().unwrap();
///     doc.add_style(body, "abc", ".a{}");
/// }
///
/// let root = StyleRoot::with_document(doc.clone());
/// let ctx = root.context();
/// assert!(ctx.default_cache);
///
/// let doc = doc.lock().unwrap();
/// let head = doc.head().unwrap();
/// assert_eq!(doc.children(head), doc.styles_with(ATTR_MARK).as_slice());
/// ```
pub struct StyleRoot {
    document: Option<SharedDirectory>,
    default_cache: OnceCell<Arc<CacheEntity>>,
    context: OnceCell<Arc<StyleContextProps>>,
}

impl StyleRoot {
    /// Creates a root for a host without a document.
    pub fn new() -> Self {
        Self {
            document: None,
            default_cache: OnceCell::new(),
            context: OnceCell::new(),
        }
    }

    /// Creates a root whose caches sweep `document` when they are created.
    ///
    /// Creating a cache locks `document`, and [`context`](Self::context) or
    /// [`StyleProvider::resolve`](crate::StyleProvider::resolve) may create
    /// one. Drop any guard you hold on `document` before calling them, or the
    /// call deadlocks.
    pub fn with_document<D>(document: Arc<Mutex<D>>) -> Self
    where
        D: StyleElementDirectory + Send + 'static,
    {
        let document: SharedDirectory = document;
        Self {
            document: Some(document),
            ..Self::new()
        }
    }

    /// Whether a document is bound.
    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    /// Creates a new cache, sweeping the bound document if there is one.
    pub fn create_cache(&self) -> Arc<CacheEntity> {
        match &self.document {
            Some(document) => {
                let mut guard = match document.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => {
                        log::warn!("style document lock was poisoned; sweeping anyway");
                        poisoned.into_inner()
                    }
                };
                let directory: &mut dyn StyleElementDirectory = &mut *guard;
                create_cache(Some(directory))
            }
            None => create_cache(None),
        }
    }

    /// The default cache, created on first call.
    pub fn default_cache(&self) -> &Arc<CacheEntity> {
        self.default_cache.get_or_init(|| self.create_cache())
    }

    /// The root configuration: default cache, low hash priority, nothing else set.
    pub fn context(&self) -> Arc<StyleContextProps> {
        Arc::clone(self.context.get_or_init(|| {
            Arc::new(StyleContextProps::root(Arc::clone(self.default_cache())))
        }))
    }
}

impl Default for StyleRoot {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StyleRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleRoot")
            .field("has_document", &self.has_document())
            .field(
                "default_cache",
                &self.default_cache.get().map(|c| c.instance_id().to_string()),
            )
            .finish()
    }
}
