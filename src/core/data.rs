use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use actix_web::http::header::{CacheControl, CacheDirective};
use awc::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{core::record::Record, error::LoadError};

/// Where one JSON file is read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    Local(PathBuf),
    Remote(String),
}

impl DataSource {
    /// Joins `file_name` onto the data root. Roots starting with `http://` or
    /// `https://` are fetched over HTTP; anything else is a local directory.
    pub fn resolve(data_root: &str, file_name: &str) -> Self {
        let root = data_root.trim();
        if root.starts_with("http://") || root.starts_with("https://") {
            DataSource::Remote(format!("{}/{}", root.trim_end_matches('/'), file_name))
        } else {
            DataSource::Local(PathBuf::from(root).join(file_name))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::Local(path) => path.display().to_string(),
            DataSource::Remote(url) => url.clone(),
        }
    }
}

pub async fn load_records(source: &DataSource) -> Result<Vec<Record>, LoadError> {
    let body = match source {
        DataSource::Local(path) => load_from_storage(path)?,
        DataSource::Remote(url) => load_from_cdn(url).await?,
    };
    parse_records(&source.describe(), &body)
}

pub fn parse_records(source_path: &str, body: &[u8]) -> Result<Vec<Record>, LoadError> {
    let value: Value = serde_json::from_slice(body).map_err(|error| LoadError::Parse {
        source_path: source_path.to_string(),
        error,
    })?;
    match value {
        Value::Array(items) => {
            debug!("{} records in {}", items.len(), source_path);
            Ok(items.into_iter().map(Record::from).collect())
        }
        _ => Err(LoadError::NotArray {
            source_path: source_path.to_string(),
        }),
    }
}

fn load_from_storage(path: &Path) -> Result<Vec<u8>, LoadError> {
    let fetch_error = |error: std::io::Error| LoadError::Fetch {
        source_path: path.display().to_string(),
        reason: error.to_string(),
    };
    let file = File::open(path).map_err(fetch_error)?;
    let mut buffer: Vec<u8> = Vec::new();
    let mut reader = BufReader::new(file);
    let size = reader.read_to_end(&mut buffer).map_err(fetch_error)?;
    info!("Local data size: {} ({})", size, path.display());
    Ok(buffer)
}

async fn load_from_cdn(url: &str) -> Result<Vec<u8>, LoadError> {
    let client = Client::default();
    let mut response = client
        .get(url)
        .insert_header(CacheControl(vec![CacheDirective::NoCache]))
        .send()
        .await
        .map_err(|error| LoadError::Fetch {
            source_path: url.to_string(),
            reason: error.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        warn!("Remote data request for {} answered {}", url, status);
        return Err(LoadError::Status {
            source_path: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.body().await.map_err(|error| LoadError::Fetch {
        source_path: url.to_string(),
        reason: error.to_string(),
    })?;
    info!("Remote data size: {} ({})", body.len(), url);
    Ok(body.to_vec())
}
