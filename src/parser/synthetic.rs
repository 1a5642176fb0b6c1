//! A hand-built element tree for exercising extractors without HTML.

use super::{Fragment, Query};

#[derive(Debug, Clone, Default)]
pub struct Node {
    pub tag: String,
    pub classes: Vec<String>,
    pub text: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: &str) -> Self {
        Node {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    fn gather<'a>(&'a self, query: &Query, out: &mut Vec<&'a Node>) {
        for child in &self.children {
            if query.matches(&child.tag, child.classes.iter().map(String::as_str)) {
                out.push(child);
            }
            child.gather(query, out);
        }
    }
}

impl<'a> Fragment for &'a Node {
    fn find_all(&self, query: &Query) -> Vec<Self> {
        let node: &'a Node = *self;
        let mut out = Vec::new();
        node.gather(query, &mut out);
        out
    }

    fn text_content(&self) -> String {
        let mut text = self.text.clone();
        for child in &self.children {
            text.push_str(&child.text_content());
        }
        text
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }
}
