//! The loaded document and its decoded node tree.

use indexmap::IndexMap;
use log::{debug, trace};

use xmigraph_parser::{Element, Span, error::ParseError};

use crate::{entity::Entity, record::Record};

/// A loaded model document.
///
/// Owns the element tree with every element's attributes already decoded
/// into a [`Record`]. The document never changes after construction, so
/// any number of [`Entity`] views may be handed out and shared across
/// threads.
#[derive(Debug)]
pub struct Document {
    root: Node,
}

/// One element of the document together with its decoded record.
#[derive(Debug)]
pub(crate) struct Node {
    tag: String,
    raw: IndexMap<String, String>,
    record: Record,
    children: Vec<Node>,
    span: Span,
}

impl Document {
    /// Parse markup and build the document.
    ///
    /// # Errors
    ///
    /// Returns the loader's [`ParseError`] if `source` is not well-formed.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let root = xmigraph_parser::load(source)?;
        Ok(Self::from_element(root))
    }

    /// Build the document from an already loaded element tree.
    pub fn from_element(root: Element) -> Self {
        let root = Node::from_element(root);
        debug!(nodes = root.count(); "Document built");
        Self { root }
    }

    /// The root entity, origin of guid and absolute-path resolution.
    pub fn root(&self) -> Entity<'_> {
        Entity::new(self, &self.root)
    }

    /// Document-wide guid lookup; the first match in pre-order wins.
    pub fn node_by_guid(&self, guid: &str) -> Option<Entity<'_>> {
        self.root().node_by_guid(guid)
    }

    /// Resolve a `/`-separated path of relids from the root.
    pub fn node_by_path(&self, path: &str) -> Option<Entity<'_>> {
        self.root().node_by_relative_path(path)
    }

    /// Every meta node of the document, in pre-order.
    pub fn all_meta_nodes(&self) -> Vec<Entity<'_>> {
        let metas: Vec<_> = self
            .root
            .pre_order()
            .filter(|node| node.record.is_meta())
            .map(|node| Entity::new(self, node))
            .collect();
        trace!(count = metas.len(); "Collected meta nodes");
        metas
    }

    /// Total number of elements in the document.
    pub fn len(&self) -> usize {
        self.root.count()
    }

    /// A document always has a root, so it is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub(crate) fn root_node(&self) -> &Node {
        &self.root
    }
}

impl From<Element> for Document {
    fn from(root: Element) -> Self {
        Self::from_element(root)
    }
}

impl Node {
    fn from_element(element: Element) -> Self {
        let (tag, raw, children, span) = element.into_parts();
        let record = Record::decode(raw.iter().map(|(key, value)| (key.as_str(), value.as_str())));
        Self {
            tag,
            raw,
            record,
            children: children.into_iter().map(Node::from_element).collect(),
            span,
        }
    }

    pub(crate) fn tag(&self) -> &str {
        &self.tag
    }

    pub(crate) fn raw_attribute(&self, key: &str) -> Option<&str> {
        self.raw.get(key).map(String::as_str)
    }

    pub(crate) fn record(&self) -> &Record {
        &self.record
    }

    pub(crate) fn children(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn span(&self) -> Span {
        self.span
    }

    /// Pre-order walk of this node's subtree, starting with the node itself.
    pub(crate) fn pre_order(&self) -> impl Iterator<Item = &Node> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// First node in pre-order whose guid equals `guid`.
    pub(crate) fn find_by_guid(&self, guid: &str) -> Option<&Node> {
        self.pre_order().find(|node| node.record.guid() == Some(guid))
    }

    /// Chain of nodes from `self` down to `target`, both included.
    ///
    /// Returns `None` when `target` is not in this subtree.
    pub(crate) fn trail_to<'a>(&'a self, target: &Node) -> Option<Vec<&'a Node>> {
        let mut trail = Vec::new();
        self.collect_trail(target, &mut trail).then_some(trail)
    }

    fn collect_trail<'a>(&'a self, target: &Node, trail: &mut Vec<&'a Node>) -> bool {
        trail.push(self);
        if std::ptr::eq(self, target) {
            return true;
        }
        for child in &self.children {
            if child.collect_trail(target, trail) {
                return true;
            }
        }
        trail.pop();
        false
    }

    fn count(&self) -> usize {
        self.pre_order().count()
    }
}
