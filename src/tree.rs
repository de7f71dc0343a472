//! Owned markup tree built from html5ever's RcDom.

use std::collections::BTreeMap;

use html5ever::tendril::TendrilSink;
use html5ever::{LocalName, Namespace, ParseOpts, QualName, parse_fragment};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub children: Vec<MarkupNode>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// The inline `style` declaration string, empty when absent.
    pub fn style(&self) -> &str {
        self.attr("style").unwrap_or("")
    }

    /// Descendant elements in document order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }
}

// Children are released iteratively so dropping a deep tree cannot overflow.
impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let MarkupNode::Element(mut element) = node {
                pending.append(&mut element.children);
            }
        }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a MarkupNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if let MarkupNode::Element(element) = node {
                self.stack.extend(element.children.iter().rev());
                return Some(element);
            }
        }
        None
    }
}

impl MarkupNode {
    pub fn text(content: impl Into<String>) -> Self {
        MarkupNode::Text(content.into())
    }

    pub fn element<'a>(
        tag: &str,
        attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
        children: Vec<MarkupNode>,
    ) -> Self {
        MarkupNode::Element(Element {
            tag: tag.to_ascii_lowercase(),
            attrs: attrs
                .into_iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value.to_string()))
                .collect(),
            children,
        })
    }
}

/// Parse a markup fragment as it would appear inside `<body>`.
pub fn parse(markup: &str) -> Vec<MarkupNode> {
    let context = QualName::new(
        None,
        Namespace::from(HTML_NAMESPACE),
        LocalName::from("body"),
    );
    let dom = parse_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new())
        .one(markup);

    // Fragment parsing wraps the result in a synthetic <html> element.
    let top = dom.document.children.borrow();
    let roots: Vec<Handle> = match top.as_slice() {
        [only] if is_element_named(only, "html") => only.children.borrow().clone(),
        _ => top.clone(),
    };
    convert(roots)
}

fn is_element_named(handle: &Handle, tag: &str) -> bool {
    matches!(&handle.data, NodeData::Element { name, .. } if &*name.local == tag)
}

struct Frame {
    element: Option<Element>,
    pending: std::vec::IntoIter<Handle>,
    built: Vec<MarkupNode>,
}

impl Frame {
    fn new(element: Option<Element>, handles: Vec<Handle>) -> Self {
        Self {
            element,
            pending: handles.into_iter(),
            built: Vec::new(),
        }
    }
}

// Builds the owned tree with an explicit stack; nesting depth is unbounded.
fn convert(roots: Vec<Handle>) -> Vec<MarkupNode> {
    let mut stack = vec![Frame::new(None, roots)];
    while let Some(frame) = stack.last_mut() {
        match frame.pending.next() {
            Some(handle) => match &handle.data {
                NodeData::Text { contents } => {
                    let contents = contents.borrow();
                    let text: &str = &contents;
                    frame.built.push(MarkupNode::Text(text.to_string()));
                }
                NodeData::Element { name, attrs, .. } => {
                    let attrs = attrs
                        .borrow()
                        .iter()
                        .map(|attr| (attr.name.local.to_string(), String::from(&*attr.value)))
                        .collect();
                    let element = Element {
                        tag: name.local.to_string(),
                        attrs,
                        children: Vec::new(),
                    };
                    let children = handle.children.borrow().clone();
                    stack.push(Frame::new(Some(element), children));
                }
                NodeData::Document
                | NodeData::Doctype { .. }
                | NodeData::Comment { .. }
                | NodeData::ProcessingInstruction { .. } => {}
            },
            None => {
                let Some(Frame { element, built, .. }) = stack.pop() else {
                    break;
                };
                let Some(mut element) = element else {
                    return built;
                };
                element.children = built;
                if let Some(parent) = stack.last_mut() {
                    parent.built.push(MarkupNode::Element(element));
                }
            }
        }
    }
    Vec::new()
}
