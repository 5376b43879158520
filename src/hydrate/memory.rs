//! Arena-backed in-memory document.

use super::directory::{NodeId, Scope, StyleElementDirectory};

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    // Owning cache instance; never serialized.
    instance_tag: Option<String>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            instance_tag: None,
        }
    }
}

/// A minimal HTML document held in memory.
///
/// Nodes live in an arena and are addressed by [`NodeId`]. Removing a node
/// detaches it from its parent but keeps it in the arena, so handles stay
/// valid and detached nodes can still be inspected. The arena is never
/// compacted: memory grows with every node created, including removed ones.
///
/// # Example
///
/// ```rust
/// use cssinjs_context::MemoryDocument;
///
/// let mut doc = MemoryDocument::new();
/// let body = doc.body().unwrap();
/// doc.add_style(body, "abc", ".a{color:red}");
///
/// assert_eq!(
///     doc.to_html(),
///     r#"<html><head></head><body><style data-css-hash="abc">.a{color:red}</style></body></html>"#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    root: NodeId,
    head: Option<NodeId>,
    body: Option<NodeId>,
}

impl MemoryDocument {
    /// Creates `<html><head></head><body></body></html>`.
    pub fn new() -> Self {
        let mut doc = Self::empty();
        let head = doc.create_element("head");
        let body = doc.create_element("body");
        doc.append_child(doc.root, head);
        doc.append_child(doc.root, body);
        doc.head = Some(head);
        doc.body = Some(body);
        doc
    }

    /// Creates a bare `<html>` root with neither head nor body.
    ///
    /// Such a document is not document-backed for the purposes of hydration.
    pub fn empty() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Element {
                tag: "html".to_string(),
                attributes: Vec::new(),
            })],
            root: NodeId::new(0),
            head: None,
            body: None,
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// The `<html>` element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    pub fn body(&self) -> Option<NodeId> {
        self.body
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.allocate(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
        })
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.allocate(NodeKind::Text(text.to_string()))
    }

    fn allocate(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(kind));
        id
    }

    /// Sets or replaces an attribute. Ignored for text nodes.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(Node {
            kind: NodeKind::Element { attributes, .. },
            ..
        }) = self.node_mut(node)
        {
            match attributes.iter_mut().find(|(key, _)| key == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    /// Reads an attribute.
    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.node(node)?.kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    /// Lowercase tag name, or `None` for text nodes.
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        match &self.node(node)?.kind {
            NodeKind::Element { tag, .. } => Some(tag.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Appends `child` to `parent`, detaching it from its previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_before(parent, child, None);
    }

    /// Inserts `child` into `parent` before `reference`.
    ///
    /// Appends when `reference` is `None` or is not a child of `parent`.
    /// Inserting a node into itself or its own descendant is ignored.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        if self.node(parent).is_none() || self.node(child).is_none() {
            return;
        }
        if self.is_inclusive_ancestor(child, parent) {
            return;
        }

        self.detach(child);

        let Some(parent_node) = self.node_mut(parent) else {
            return;
        };
        let position = reference.and_then(|r| parent_node.children.iter().position(|&c| c == r));
        match position {
            Some(index) => parent_node.children.insert(index, child),
            None => parent_node.children.push(child),
        }

        if let Some(child_node) = self.node_mut(child) {
            child_node.parent = Some(parent);
        }
    }

    /// Appends a text node to `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let node = self.create_text(text);
        self.append_child(parent, node);
        node
    }

    /// Appends `<style data-css-hash="{hash}">{css}</style>` to `parent`.
    pub fn add_style(&mut self, parent: NodeId, hash: &str, css: &str) -> NodeId {
        let style = self.create_element("style");
        self.set_attribute(style, crate::ATTR_MARK, hash);
        self.append_text(style, css);
        self.append_child(parent, style);
        style
    }

    /// Detaches `node` from its parent. The node itself stays in the arena.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.retain(|&c| c != node);
        }
        if let Some(child_node) = self.node_mut(node) {
            child_node.parent = None;
        }
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether `node` is reachable from the document root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.is_inclusive_ancestor(self.root, node)
    }

    /// Owning cache instance of `node`, if it was tagged.
    pub fn instance_tag(&self, node: NodeId) -> Option<&str> {
        self.node(node)?.instance_tag.as_deref()
    }

    /// Descendants of `node` in document (pre-)order, excluding `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Connected `<style>` elements carrying `attr`, in document order.
    pub fn styles_with(&self, attr: &str) -> Vec<NodeId> {
        self.styles_under(self.root, attr)
    }

    fn styles_under(&self, scope: NodeId, attr: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&id| self.tag_name(id) == Some("style"))
            .filter(|&id| self.get_attribute(id, attr).is_some())
            .collect()
    }

    /// Concatenated text of `node` and its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        std::iter::once(node)
            .chain(self.descendants(node))
            .filter_map(|id| match &self.node(id)?.kind {
                NodeKind::Text(text) => Some(text.as_str()),
                NodeKind::Element { .. } => None,
            })
            .collect()
    }

    /// Serializes the connected document to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_node(self.root, false, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, raw_text: bool, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(text) if raw_text => out.push_str(text),
            NodeKind::Text(text) => out.push_str(&escape(text, false)),
            NodeKind::Element { tag, attributes } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape(value, true));
                    out.push('"');
                }
                out.push('>');
                let raw = matches!(tag.as_str(), "style" | "script");
                for &child in &node.children {
                    self.write_node(child, raw, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

fn escape(text: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

impl StyleElementDirectory for MemoryDocument {
    fn is_document_backed(&self) -> bool {
        self.head.is_some() && self.body.is_some()
    }

    fn find_by_attribute(&self, scope: Scope, attr: &str) -> Vec<NodeId> {
        match scope {
            Scope::Body => self
                .body
                .map(|body| self.styles_under(body, attr))
                .unwrap_or_default(),
            Scope::Document => self.styles_under(self.root, attr),
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.get_attribute(node, name).map(str::to_string)
    }

    fn first_head_child(&self) -> Option<NodeId> {
        self.head
            .and_then(|head| self.children(head).first().copied())
    }

    fn move_before_in_head(&mut self, node: NodeId, before: Option<NodeId>) {
        if let Some(head) = self.head {
            self.insert_before(head, node, before);
        }
    }

    fn remove(&mut self, node: NodeId) {
        self.detach(node);
    }

    fn tag_with_instance(&mut self, node: NodeId, instance_id: &str) {
        if let Some(n) = self.node_mut(node) {
            n.instance_tag = Some(instance_id.to_string());
        }
    }

    fn read_instance_tag(&self, node: NodeId) -> Option<String> {
        self.instance_tag(node).map(str::to_string)
    }
}
