//! Transformer and linter capabilities carried by the context.

use std::fmt;
use std::sync::Arc;

use super::interpolation::CssObject;

/// A pre-injection visitor that may rewrite a style object.
///
/// The default `visit` returns the object unchanged, so implementors only
/// override it when they actually transform something.
pub trait Transformer: Send + Sync {
    fn visit(&self, css: CssObject) -> CssObject {
        css
    }
}

/// Adapts a closure into a [`Transformer`].
pub struct FnTransformer<F>(F);

impl<F> Transformer for FnTransformer<F>
where
    F: Fn(CssObject) -> CssObject + Send + Sync,
{
    fn visit(&self, css: CssObject) -> CssObject {
        (self.0)(css)
    }
}

impl<F> fmt::Debug for FnTransformer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnTransformer")
    }
}

/// Wraps a closure as a shareable transformer.
///
/// # Example
///
/// ```rust
/// use cssinjs_context::{transformer_fn, CssObject, Transformer};
///
/// let uppercase_keys = transformer_fn(|css: CssObject| {
///     css.into_iter().map(|(k, v)| (k.to_uppercase(), v)).collect()
/// });
///
/// let out = uppercase_keys.visit(CssObject::new().with("color", "red"));
/// assert!(out.get("COLOR").is_some());
/// ```
pub fn transformer_fn<F>(f: F) -> Arc<dyn Transformer>
where
    F: Fn(CssObject) -> CssObject + Send + Sync + 'static,
{
    Arc::new(FnTransformer(f))
}

/// Where a declaration being linted came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinterInfo {
    /// Cache path of the style being linted.
    pub path: Option<String>,
    pub hash_id: Option<String>,
    /// Selectors enclosing the declaration, outermost first.
    pub parent_selectors: Vec<String>,
}

/// A post-transform check over individual declarations.
///
/// Linters report through whatever channel they choose; they never alter the
/// style or stop injection.
pub trait Linter: Send + Sync {
    fn lint(&self, key: &str, value: &str, info: &LinterInfo);
}

impl<F> Linter for F
where
    F: Fn(&str, &str, &LinterInfo) + Send + Sync,
{
    fn lint(&self, key: &str, value: &str, info: &LinterInfo) {
        self(key, value, info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Identity;
    impl Transformer for Identity {}

    #[test]
    fn test_default_visit_is_identity() {
        let css = CssObject::new().with("color", "red");
        assert_eq!(Identity.visit(css.clone()), css);
    }

    #[test]
    fn test_transformer_fn() {
        let drop_color = transformer_fn(|mut css: CssObject| {
            css.remove("color");
            css
        });
        let out = drop_color.visit(CssObject::new().with("color", "red").with("margin", 0));
        assert!(out.get("color").is_none());
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_closure_linter() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let linter = move |key: &str, value: &str, _info: &LinterInfo| {
            sink.lock().unwrap().push(format!("{}={}", key, value));
        };

        linter.lint("color", "red", &LinterInfo::default());
        assert_eq!(*seen.lock().unwrap(), vec!["color=red".to_string()]);
    }
}
