use crate::services::library_browser::LibraryRef;
use crate::services::{BrowseError, LibraryBrowser};
use actix_web::web::{Data, Query};
use actix_web::{HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

#[derive(Debug, Deserialize)]
pub(crate) struct BrowseQuery {
    path: String,
}

#[derive(Debug, Serialize)]
struct RefDto {
    #[serde(rename = "type")]
    ref_type: &'static str,
    uri: String,
    name: String,
}

impl From<&LibraryRef> for RefDto {
    fn from(library_ref: &LibraryRef) -> Self {
        let ref_type = match library_ref {
            LibraryRef::Directory { .. } => "directory",
            LibraryRef::Track { .. } => "track",
            LibraryRef::Album { .. } => "album",
        };

        Self {
            ref_type,
            uri: library_ref.wire_uri(),
            name: library_ref.name().to_string(),
        }
    }
}

pub(crate) async fn browse_library(
    library_browser: Data<Arc<LibraryBrowser>>,
    query: Query<BrowseQuery>,
) -> impl Responder {
    match library_browser.browse(&query.path).await {
        Ok(refs) => HttpResponse::Ok().json(refs.iter().map(RefDto::from).collect::<Vec<_>>()),
        Err(error @ (BrowseError::InvalidPath(_) | BrowseError::UnknownKind(_))) => {
            HttpResponse::BadRequest().body(error.to_string())
        }
        Err(error) => {
            error!(?error, path = %query.path, "Browse failed");
            HttpResponse::BadGateway().finish()
        }
    }
}
