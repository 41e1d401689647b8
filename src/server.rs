use std::io::Result;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{
    http::header::{CacheControl, CacheDirective, ContentType},
    web::{self, resource, scope, Data, Path},
    App, HttpRequest, HttpResponse, HttpServer,
};
use tracing::{error, info};

use crate::{
    core::{
        data::load_records,
        record::{NormalizedRecord, RecordKind},
        settings::Settings,
    },
    pages::{page_document, render_target, route, PageTarget},
    render::card::sanitize_urls,
};

pub const ASSETS_DIR: &str = "assets";

pub async fn start_server(settings: Settings) -> Result<()> {
    let addr = settings.addr();
    let settings = Data::new(settings);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(settings.clone())
            .configure(configure)
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_header()
                    .allow_any_method(),
            )
    })
    .bind(addr)?;
    info!("Server started at {}", addr);
    server.run().await
}

/// Routes shared by the binary and the tests. Expects `Data<Settings>`.
/// Static files under `assets/` are served before any page is considered.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        scope("/v1")
            .service(resource("/folio").route(web::get().to(status_handler)))
            .service(resource("/records/{kind}").route(web::get().to(records_handler))),
    )
    .service(Files::new("/assets", ASSETS_DIR))
    .default_service(web::to(page_handler));
}

async fn status_handler() -> HttpResponse {
    HttpResponse::Ok().body("folio is running")
}

async fn records_handler(kind: Path<String>, settings: Data<Settings>) -> HttpResponse {
    let kind = match RecordKind::from_plural(&kind) {
        Some(kind) => kind,
        None => return HttpResponse::NotFound().body(format!("Unknown record kind \"{}\".", kind)),
    };
    let source = PageTarget::for_kind(kind).source(&settings);
    match load_records(&source).await {
        Ok(records) => {
            let normalized: Vec<NormalizedRecord> = records
                .iter()
                .map(|record| sanitize_urls(record.normalize(kind)))
                .collect();
            HttpResponse::Ok()
                .insert_header(CacheControl(vec![CacheDirective::NoStore]))
                .json(normalized)
        }
        Err(err) => {
            error!("Failed to load {}: {}", kind, err);
            HttpResponse::BadGateway().body("Could not load data.")
        }
    }
}

async fn page_handler(req: HttpRequest, settings: Data<Settings>) -> HttpResponse {
    let target = match route(req.path()) {
        Some(target) => target,
        None => {
            info!("{} is not a projects or achievements page", req.path());
            return HttpResponse::NotFound().body("Not a projects or achievements page.");
        }
    };
    let container = render_target(&target, &settings).await;
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .insert_header(CacheControl(vec![CacheDirective::NoStore]))
        .body(page_document(&target, &container))
}
