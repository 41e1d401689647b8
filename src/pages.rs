use crate::{
    core::{
        data::{load_records, DataSource},
        record::RecordKind,
        settings::Settings,
    },
    render::{
        card::Element,
        container::{render_all, render_failure, Container},
        escape::escape_text,
    },
};
use tracing::{error, info};

/// What a page needs rendered: which records, into which container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageTarget {
    pub kind: RecordKind,
    pub container_id: &'static str,
}

impl PageTarget {
    pub fn for_kind(kind: RecordKind) -> Self {
        let container_id = match kind {
            RecordKind::Project => "projects-container",
            RecordKind::Achievement => "achievements-container",
        };
        PageTarget { kind, container_id }
    }

    pub fn source(&self, settings: &Settings) -> DataSource {
        DataSource::resolve(&settings.data_root.value, &settings.file_for(self.kind))
    }
}

/// Maps a request path to the page it shows. Only page-shaped paths count:
/// the last segment has no extension or ends in `.html`. Projects win when a
/// path mentions both.
pub fn route(path: &str) -> Option<PageTarget> {
    if !is_page_path(path) {
        return None;
    }
    if path.contains("projects") {
        Some(PageTarget::for_kind(RecordKind::Project))
    } else if path.contains("achievements") {
        Some(PageTarget::for_kind(RecordKind::Achievement))
    } else {
        None
    }
}

fn is_page_path(path: &str) -> bool {
    let last = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    !last.contains('.') || last.ends_with(".html")
}

/// One fetch, one render pass. Load failures end up as the diagnostic inside
/// the container and are not returned.
pub async fn render_target(target: &PageTarget, settings: &Settings) -> Container {
    let source = target.source(settings);
    let mut container = Container::new(target.container_id);
    info!("Loading {} from {}", target.kind, source.describe());
    match load_records(&source).await {
        Ok(records) => render_all(&records, &mut container, target.kind),
        Err(err) => {
            error!("Failed to load or parse {}: {}", source.describe(), err);
            render_failure(&mut container);
        }
    }
    container
}

pub fn page_document(target: &PageTarget, container: &Container) -> String {
    let heading = match target.kind {
        RecordKind::Project => "Projects",
        RecordKind::Achievement => "Achievements",
    };
    let main = Element::new("main")
        .class("container py-4")
        .child(Element::new("h1").class("mb-4").text(heading))
        .child(container.to_element());
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n<title>{}</title>\n<link rel=\"stylesheet\" href=\"/assets/css/site.css\">\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_text(heading),
        main.to_html()
    )
}
