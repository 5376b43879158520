//! The document capability used by the hydration sweep.

/// Opaque handle to a node in a [`StyleElementDirectory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Wraps a binding-specific node index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the binding-specific node index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Where to search for style elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Descendants of `<body>` only.
    Body,
    /// The whole document.
    Document,
}

/// Attribute-based discovery and relocation of `<style>` elements.
///
/// Implementations wrap a concrete DOM binding. All operations are total:
/// unknown handles are ignored and lookups on them return nothing.
///
/// The instance tag is a property of the element object, not an attribute. It
/// must never be serialized into the document.
pub trait StyleElementDirectory {
    /// Whether a document with both `<head>` and `<body>` is available.
    fn is_document_backed(&self) -> bool;

    /// `<style>` elements carrying `attr`, in document order.
    fn find_by_attribute(&self, scope: Scope, attr: &str) -> Vec<NodeId>;

    /// Reads an attribute of an element.
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// The first child node of `<head>`, if any.
    fn first_head_child(&self) -> Option<NodeId>;

    /// Moves `node` into `<head>` just before `before`, or to the end of
    /// `<head>` when `before` is `None`.
    fn move_before_in_head(&mut self, node: NodeId, before: Option<NodeId>);

    /// Detaches `node` from the document.
    fn remove(&mut self, node: NodeId);

    /// Records which cache instance owns `node`.
    fn tag_with_instance(&mut self, node: NodeId, instance_id: &str);

    /// Reads the owning cache instance of `node`.
    fn read_instance_tag(&self, node: NodeId) -> Option<String>;
}

/// A directory for hosts without a document.
///
/// Reports itself as not document-backed, finds nothing, and ignores every
/// mutation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl StyleElementDirectory for Detached {
    fn is_document_backed(&self) -> bool {
        false
    }

    fn find_by_attribute(&self, _scope: Scope, _attr: &str) -> Vec<NodeId> {
        Vec::new()
    }

    fn attribute(&self, _node: NodeId, _name: &str) -> Option<String> {
        None
    }

    fn first_head_child(&self) -> Option<NodeId> {
        None
    }

    fn move_before_in_head(&mut self, _node: NodeId, _before: Option<NodeId>) {}

    fn remove(&mut self, _node: NodeId) {}

    fn tag_with_instance(&mut self, _node: NodeId, _instance_id: &str) {}

    fn read_instance_tag(&self, _node: NodeId) -> Option<String> {
        None
    }
}
