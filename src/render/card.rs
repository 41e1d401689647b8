use crate::{
    core::record::{NormalizedRecord, Record, RecordKind},
    render::escape::{escape_text, resolve_href},
};

const COLUMN_CLASS: &str = "col-12 col-md-10 offset-md-1";
const CARD_CLASS: &str = "card h-100 shadow-sm";
const EXTERNAL_REL: &str = "noopener noreferrer";

/// A node of rendered markup. Text and attribute values hold raw strings and
/// are escaped only when serialized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Element {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Depth-first search over this element and its descendants.
    pub fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|node| match node {
            Node::Element(element) => element.find(predicate),
            Node::Text(_) => None,
        })
    }

    pub fn find_all<'a>(&'a self, predicate: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if predicate(self) {
            out.push(self);
        }
        for node in &self.children {
            if let Node::Element(element) = node {
                element.find_all(predicate, out);
            }
        }
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => out.push_str(&element.text_content()),
            }
        }
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_text(value));
            out.push('"');
        }
        out.push('>');
        if is_void(self.tag) {
            return;
        }
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(&escape_text(text)),
                Node::Element(element) => element.write_html(out),
            }
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "img" | "br" | "hr" | "meta" | "link" | "input")
}

/// Builds the column-wrapped card for one record.
pub fn render_card(record: &Record, kind: RecordKind) -> Element {
    let fields = record.normalize(kind);
    let card = match kind {
        RecordKind::Project => project_card(&fields),
        RecordKind::Achievement => achievement_card(&fields),
    };
    Element::new("div").class(COLUMN_CLASS).child(card)
}

fn card_body(fields: &NormalizedRecord) -> Element {
    let mut body = Element::new("div")
        .class("card-body")
        .child(Element::new("h5").class("card-title").text(&fields.title))
        .child(
            Element::new("h6")
                .class("card-subtitle mb-2 text-muted")
                .text(&fields.date),
        )
        .child(Element::new("p").class("card-text").text(&fields.description));

    let src = fields
        .image
        .as_deref()
        .map(resolve_href)
        .unwrap_or_default();
    if !src.is_empty() {
        body = body.child(
            Element::new("img")
                .class("img-fluid mt-3")
                .attr("src", src)
                .attr("alt", format!("{} screenshot", fields.title)),
        );
    }
    body
}

fn external_link(class: &str, href: String, label: &str) -> Element {
    Element::new("a")
        .class(class)
        .attr("href", href)
        .attr("target", "_blank")
        .attr("rel", EXTERNAL_REL)
        .text(label)
}

fn resolved_link(link: &Option<String>) -> Option<String> {
    link.as_deref()
        .map(resolve_href)
        .filter(|href| !href.is_empty() && href != "#")
}

/// Runs image and link fields through href resolution, dropping the ones
/// that cannot be used as a URL.
pub fn sanitize_urls(mut fields: NormalizedRecord) -> NormalizedRecord {
    fields.image = resolved_link(&fields.image);
    fields.primary_link = resolved_link(&fields.primary_link);
    fields.secondary_link = resolved_link(&fields.secondary_link);
    fields
}

fn project_card(fields: &NormalizedRecord) -> Element {
    let live = resolved_link(&fields.primary_link);
    let code = resolved_link(&fields.secondary_link);

    let mut footer = Element::new("div").class("card-footer text-end");
    let has_links = live.is_some() || code.is_some();
    if let Some(href) = live {
        footer = footer.child(external_link("btn btn-sm btn-primary", href, "Live"));
    }
    if let Some(href) = code {
        footer = footer.child(external_link(
            "btn btn-sm btn-outline-primary ms-2",
            href,
            "Code",
        ));
    }
    if !has_links {
        footer = footer.child(
            Element::new("button")
                .class("btn btn-sm btn-primary")
                .attr("disabled", "disabled")
                .text("Details"),
        );
    }

    Element::new("article")
        .class(CARD_CLASS)
        .child(card_body(fields))
        .child(footer)
}

fn achievement_card(fields: &NormalizedRecord) -> Element {
    let link = resolved_link(&fields.secondary_link).or_else(|| resolved_link(&fields.primary_link));

    let mut footer = Element::new("div").class("card-footer text-end");
    if link.is_none() {
        footer = footer.child(Element::new("span").class("text-muted small").text("No link"));
    }
    if let Some(category) = &fields.category {
        footer = footer.child(
            Element::new("span")
                .class("badge bg-secondary ms-2")
                .text(category),
        );
    }

    let card = Element::new("article")
        .class(CARD_CLASS)
        .child(card_body(fields))
        .child(footer);

    match link {
        Some(href) => Element::new("a")
            .class("card-link text-reset text-decoration-none")
            .attr("href", href)
            .attr("target", "_blank")
            .attr("rel", EXTERNAL_REL)
            .child(card),
        None => card,
    }
}
