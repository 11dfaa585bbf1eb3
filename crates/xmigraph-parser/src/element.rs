//! The raw element tree produced by the loader.

use indexmap::IndexMap;

use crate::span::Span;

/// A node of the parsed document.
///
/// Carries the tag name, the attributes in document order, the ordered
/// child elements, and the span of the element in the source (start tag
/// through end tag). Elements are never modified once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: IndexMap<String, String>,
    children: Vec<Element>,
    span: Span,
}

impl Element {
    /// Create an element with no attributes, no children and an empty span.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
            span: Span::default(),
        }
    }

    /// Add or replace an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Append a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Set the source span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// The tag (type) name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The value of a raw attribute.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// All raw attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// The ordered immediate children.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Immediate children whose tag equals `tag`.
    pub fn children_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// The span of this element in the source.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Pre-order traversal of this element and all of its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Take the parts of the element apart.
    pub fn into_parts(self) -> (String, IndexMap<String, String>, Vec<Element>, Span) {
        (self.tag, self.attributes, self.children, self.span)
    }

    pub(crate) fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    pub(crate) fn extend_span(&mut self, span: Span) {
        self.span = self.span.union(span);
    }
}

/// Pre-order iterator returned by [`Element::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("root")
            .with_child(
                Element::new("state")
                    .with_attribute("relid", "a")
                    .with_child(Element::new("port").with_attribute("relid", "p")),
            )
            .with_child(Element::new("transition").with_attribute("relid", "t"))
            .with_child(Element::new("state").with_attribute("relid", "b"))
    }

    #[test]
    fn test_children_by_tag_is_not_recursive() {
        let root = sample();
        let states: Vec<_> = root
            .children_by_tag("state")
            .filter_map(|child| child.attribute("relid"))
            .collect();
        assert_eq!(states, vec!["a", "b"]);
        assert_eq!(root.children_by_tag("port").count(), 0);
    }

    #[test]
    fn test_descendants_pre_order() {
        let root = sample();
        let order: Vec<_> = root
            .descendants()
            .map(|el| el.attribute("relid").unwrap_or("-"))
            .collect();
        assert_eq!(order, vec!["-", "a", "p", "t", "b"]);
    }

    #[test]
    fn test_attributes_keep_document_order() {
        let element = Element::new("node")
            .with_attribute("id", "1")
            .with_attribute("atr-name", "x")
            .with_attribute("base", "2");
        let keys: Vec<_> = element.attributes().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["id", "atr-name", "base"]);
    }
}
