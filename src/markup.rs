//! Minimal HTML tree used by the renderer.
//!
//! Tag and attribute names are `&'static str`, so only code can choose them.
//! Every text node and attribute value is escaped when the tree is written out,
//! which means backend data can never open or close markup.

use std::fmt::Write;

pub enum Node {
    Element(Element),
    Text(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

pub struct Element {
    tag: &'static str,
    classes: Vec<String>,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Appends whitespace-separated classes; blank input is ignored.
    pub fn class(mut self, class: &str) -> Self {
        self.classes
            .extend(class.split_whitespace().map(str::to_string));
        self
    }

    pub fn class_if(self, condition: bool, class: &str) -> Self {
        if condition { self.class(class) } else { self }
    }

    pub fn attr(mut self, name: &'static str, value: impl ToString) -> Self {
        self.attrs.push((name, value.to_string()));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn child_opt(self, child: Option<impl Into<Node>>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    #[cfg(test)]
    pub(crate) fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        for (name, value) in &self.attrs {
            let _ = write!(out, " {name}=\"{}\"", escape(value));
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(element) => element.write_to(out),
                Node::Text(text) => out.push_str(&escape(text)),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<b class="x">Tom & Jerry's</b>"#),
            "&lt;b class=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/b&gt;"
        );
    }

    #[test]
    fn escaped_text_reads_back_unchanged() {
        for raw in [
            "<script>alert('x')</script>",
            "a && b > c",
            "&lt; already escaped",
            "\"quoted\" 'single'",
            "plain",
        ] {
            let escaped = escape(raw);
            assert!(!escaped.contains('<') && !escaped.contains('>'));

            let html = Element::new("p").attr("title", raw).text(raw).render();
            let doc = roxmltree::Document::parse(&html).unwrap();
            let p = doc.root_element();
            assert_eq!(p.tag_name().name(), "p");
            assert_eq!(p.children().count(), 1);
            assert_eq!(p.attribute("title"), Some(raw));
            assert_eq!(p.text(), Some(raw));
        }
    }

    #[test]
    fn text_and_attributes_are_escaped_on_render() {
        let html = Element::new("div")
            .class("row <evil>")
            .attr("title", "\"><img src=x>")
            .text("<b>bold</b>")
            .render();

        assert_eq!(
            html,
            "<div class=\"row &lt;evil&gt;\" title=\"&quot;&gt;&lt;img src=x&gt;\">&lt;b&gt;bold&lt;/b&gt;</div>"
        );
    }

    #[test]
    fn nested_children_keep_order() {
        let html = Element::new("ul")
            .children(["a", "b"].map(|t| Element::new("li").text(t)))
            .render();
        assert_eq!(html, "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn blank_classes_are_skipped() {
        let element = Element::new("span").class("").class("  badge  ").class_if(false, "hidden");
        assert!(element.has_class("badge"));
        assert_eq!(element.render(), "<span class=\"badge\"></span>");
    }
}
