use tracing::info;

use crate::{
    core::record::{Record, RecordKind},
    render::card::{render_card, Element},
};

pub const LOAD_FAILURE_MESSAGE: &str = "Could not load data.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerState {
    Empty,
    Populated,
}

/// The element cards are rendered into. Only clearing and appending are
/// supported; every pass starts from an empty child list.
#[derive(Clone, Debug)]
pub struct Container {
    id: String,
    children: Vec<Element>,
    state: ContainerState,
}

impl Container {
    pub fn new(id: impl Into<String>) -> Self {
        Container {
            id: id.into(),
            children: Vec::new(),
            state: ContainerState::Empty,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> ContainerState {
        self.state
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn to_element(&self) -> Element {
        self.children.iter().cloned().fold(
            Element::new("div").attr("id", self.id.clone()).class("row g-4"),
            Element::child,
        )
    }

    pub fn to_html(&self) -> String {
        self.to_element().to_html()
    }
}

/// Replaces the container's children with one card per record, in order.
pub fn render_all(records: &[Record], container: &mut Container, kind: RecordKind) {
    container.clear();
    for record in records {
        container.append(render_card(record, kind));
    }
    container.state = ContainerState::Populated;
    info!("Rendered {} {} into #{}", records.len(), kind, container.id);
}

/// Replaces the container's children with the single load-failure message.
pub fn render_failure(container: &mut Container) {
    container.clear();
    container.append(
        Element::new("div")
            .class("col-12")
            .child(Element::new("p").class("text-danger").text(LOAD_FAILURE_MESSAGE)),
    );
    container.state = ContainerState::Populated;
}
