use std::io::{Error, ErrorKind, Result};

use folio_render::{core::settings::Settings, server::start_server};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

#[actix_web::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load().map_err(|err| {
        error!("Settings load error: {}", err);
        Error::new(ErrorKind::InvalidData, err.to_string())
    })?;
    start_server(settings).await
}
