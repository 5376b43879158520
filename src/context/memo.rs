//! Last-input memoization.

use std::fmt;

type ShouldUpdate<D> = Box<dyn Fn(&D, &D) -> bool + Send + Sync>;

/// Remembers the last inputs and the value computed from them.
///
/// On each call the comparator decides whether the new inputs differ from
/// the remembered ones. If they do not, the cached value is returned and the
/// remembered inputs are kept as they were.
///
/// # Example
///
/// ```rust
/// use cssinjs_context::MemoCell;
///
/// let mut memo = MemoCell::new(|prev: &String, next: &String| {
///     !prev.eq_ignore_ascii_case(next)
/// });
///
/// let a = memo.get_or_update("Red".to_string(), |s| s.len());
/// let b = memo.get_or_update("RED".to_string(), |_| unreachable!());
/// assert_eq!(a, b);
/// ```
pub struct MemoCell<D, V> {
    last: Option<(D, V)>,
    should_update: ShouldUpdate<D>,
}

impl<D, V: Clone> MemoCell<D, V> {
    /// Creates an empty cell. `should_update(prev, next)` returns true when
    /// `next` must be recomputed.
    pub fn new<F>(should_update: F) -> Self
    where
        F: Fn(&D, &D) -> bool + Send + Sync + 'static,
    {
        Self {
            last: None,
            should_update: Box::new(should_update),
        }
    }

    /// Returns the remembered value, recomputing it first if `deps` changed.
    pub fn get_or_update<F>(&mut self, deps: D, compute: F) -> V
    where
        F: FnOnce(&D) -> V,
    {
        if let Some((prev, value)) = &self.last {
            if !(self.should_update)(prev, &deps) {
                return value.clone();
            }
        }

        let value = compute(&deps);
        self.last = Some((deps, value.clone()));
        value
    }

    /// The remembered value, if any.
    pub fn value(&self) -> Option<&V> {
        self.last.as_ref().map(|(_, value)| value)
    }

    /// Forgets the remembered inputs and value.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl<D: PartialEq + 'static, V: Clone> Default for MemoCell<D, V> {
    /// A cell that recomputes whenever the inputs are not `==`.
    fn default() -> Self {
        Self::new(|prev: &D, next: &D| prev != next)
    }
}

impl<D, V> fmt::Debug for MemoCell<D, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoCell")
            .field("filled", &self.last.is_some())
            .finish()
    }
}
