//! Minimal element tree rendered through maud.
//!
//! Every text node and attribute value goes through maud's escaper on
//! serialization, whether it came from the backend config, the user or a
//! static label. The only unescaped content is the bundled stylesheet.

use std::fmt::Write as _;

use maud::{Escaper, Render, html};

const VOID_TAGS: [&str; 5] = ["br", "hr", "img", "input", "meta"];

/// Named UI regions a host can address without string lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Launcher,
    Panel,
    Body,
    Categories,
    Form,
    FormStatus,
    TicketList,
    Success,
}

impl Region {
    pub fn id(self) -> &'static str {
        match self {
            Self::Launcher => "fab",
            Self::Panel => "panel",
            Self::Body => "panel-body",
            Self::Categories => "categories",
            Self::Form => "support-form",
            Self::FormStatus => "form-status",
            Self::TicketList => "ticket-list",
            Self::Success => "success",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Trusted static markup emitted verbatim.
    Raw(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, Option<String>)>,
    children: Vec<Node>,
    region: Option<Region>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
            region: None,
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, Some(value.into())));
        self
    }

    /// Boolean attribute such as `disabled`.
    pub fn flag(mut self, name: &'static str) -> Self {
        self.attrs.push((name, None));
        self
    }

    pub fn flag_if(self, name: &'static str, on: bool) -> Self {
        if on { self.flag(name) } else { self }
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Mark this element as a named region; also sets its `id`.
    pub fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self.attr("id", region.id())
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn child_if(self, child: Option<Element>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn raw(mut self, markup: &'static str) -> Self {
        self.children.push(Node::Raw(markup));
        self
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_deref().unwrap_or(""))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Concatenated text of this element and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
                Node::Raw(_) => {}
            }
        }
    }

    /// Depth-first search for the element tagged with `region`.
    pub fn find_region(&self, region: Region) -> Option<&Element> {
        if self.region == Some(region) {
            return Some(self);
        }
        self.child_elements()
            .find_map(|child| child.find_region(region))
    }

    /// All descendants (including self) carrying `class`.
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.walk(&mut |element| {
            if element.has_class(class) {
                found.push(element);
            }
        });
        found
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        visit(self);
        for child in self.child_elements() {
            child.walk(visit);
        }
    }

    pub fn to_html(&self) -> String {
        html! { (self) }.into_string()
    }
}

impl Render for Element {
    fn render_to(&self, buffer: &mut String) {
        buffer.push('<');
        buffer.push_str(self.tag);
        for (name, value) in &self.attrs {
            buffer.push(' ');
            buffer.push_str(name);
            if let Some(value) = value {
                buffer.push_str("=\"");
                let _ = Escaper::new(buffer).write_str(value);
                buffer.push('"');
            }
        }
        buffer.push('>');
        if VOID_TAGS.contains(&self.tag) {
            return;
        }
        for node in &self.children {
            match node {
                Node::Element(element) => element.render_to(buffer),
                Node::Text(text) => text.render_to(buffer),
                Node::Raw(markup) => buffer.push_str(markup),
            }
        }
        buffer.push_str("</");
        buffer.push_str(self.tag);
        buffer.push('>');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_text_and_attributes() {
        let element = Element::new("button")
            .attr("data-id", "x\" onclick=\"boom")
            .text("<script>alert('hi')</script> & more");
        assert_eq!(
            element.to_html(),
            "<button data-id=\"x&quot; onclick=&quot;boom\">\
             &lt;script&gt;alert('hi')&lt;/script&gt; &amp; more</button>"
        );
    }

    #[test]
    fn void_and_boolean_attributes() {
        let input = Element::new("input")
            .attr("type", "text")
            .flag_if("disabled", true)
            .flag_if("required", false);
        assert_eq!(input.to_html(), "<input type=\"text\" disabled>");
        assert_eq!(input.get_attr("disabled"), Some(""));
        assert_eq!(input.get_attr("required"), None);
    }

    #[test]
    fn regions_are_found_by_handle() {
        let tree = Element::new("div").region(Region::Panel).child(
            Element::new("div")
                .region(Region::Body)
                .child(Element::new("p").class("loading hint").text("Loading...")),
        );
        let body = tree.find_region(Region::Body).unwrap();
        assert_eq!(body.get_attr("id"), Some("panel-body"));
        assert_eq!(body.text_content(), "Loading...");
        assert!(tree.find_region(Region::TicketList).is_none());
        assert_eq!(tree.find_by_class("hint").len(), 1);
    }

    #[test]
    fn splices_into_maud_templates() {
        let note = Element::new("p").text("a < b");
        let page = html! { section { (note) } };
        assert_eq!(page.into_string(), "<section><p>a &lt; b</p></section>");
    }

    #[test]
    fn raw_stylesheet_is_not_escaped() {
        let style = Element::new("style").raw(".a > .b { color: red; }");
        assert_eq!(style.to_html(), "<style>.a > .b { color: red; }</style>");
    }
}
