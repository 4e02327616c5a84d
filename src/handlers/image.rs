//! Image upload, download, and deletion handlers
//!
//! Objects are keyed `{user_id}/{object_id}.{ext}` so the download and
//! delete routes address them by two path segments, and ownership falls
//! out of the key itself.

use futures_util::TryStreamExt;
use log::info;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;
use warp::http::{header, Response, StatusCode};
use warp::multipart::FormData;
use warp::{Buf, Rejection, Reply};

use super::{AppState, Envelope};
use crate::auth::Identity;
use crate::constants::MAX_IMAGE_UPLOAD_BYTES;
use crate::error::FerrotaskError;
use crate::storage::traits::StoredObject;

/// Metadata returned after a successful upload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub url: String,
    pub key: String,
    pub size: usize,
    pub content_type: String,
}

/// Deletion acknowledgment body
#[derive(Debug, Serialize)]
pub struct ImageDeleteData {
    pub message: String,
}

/// One fully buffered multipart field
struct UploadedField {
    name: String,
    filename: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

async fn collect_fields(form: FormData) -> Result<Vec<UploadedField>, Rejection> {
    form.and_then(|mut part| async move {
        let name = part.name().to_string();
        let filename = part.filename().map(str::to_string);
        let content_type = part.content_type().map(str::to_string);

        let mut data = Vec::new();
        // data() yields one chunk at a time until the part is drained
        while let Some(buf) = part.data().await {
            let mut buf = buf?;
            while buf.has_remaining() {
                let chunk = buf.chunk();
                data.extend_from_slice(chunk);
                let len = chunk.len();
                buf.advance(len);
            }
        }

        Ok(UploadedField {
            name,
            filename,
            content_type,
            data,
        })
    })
    .try_collect()
    .await
    .map_err(|e| {
        warp::reject::custom(FerrotaskError::ValidationError(format!(
            "Malformed multipart body: {}",
            e
        )))
    })
}

fn file_extension(filename: Option<&str>) -> String {
    filename
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_else(|| "bin".to_string())
}

/// POST /images
pub async fn upload_image(
    identity: Identity,
    form: FormData,
    state: Arc<AppState>,
) -> Result<impl Reply, Rejection> {
    let fields = collect_fields(form).await?;
    let field = fields
        .into_iter()
        .find(|field| field.name == "image")
        .ok_or_else(|| {
            warp::reject::custom(FerrotaskError::ValidationError(
                "An image file is required".to_string(),
            ))
        })?;

    let content_type = field.content_type.unwrap_or_default();
    if !content_type.starts_with("image/") {
        return Err(warp::reject::custom(FerrotaskError::ValidationError(
            "The uploaded file must be an image".to_string(),
        )));
    }
    if field.data.len() > MAX_IMAGE_UPLOAD_BYTES {
        return Err(warp::reject::custom(FerrotaskError::ValidationError(
            "Image must be 5 MB or smaller".to_string(),
        )));
    }

    let extension = file_extension(field.filename.as_deref());
    let key = format!("{}/{}.{}", identity.user_id, Uuid::new_v4(), extension);
    let object = StoredObject::new(&key, field.data, &content_type);
    let size = object.size;

    state
        .objects
        .put_object(object)
        .await
        .map_err(warp::reject::custom)?;
    info!("User {} uploaded {} ({} bytes)", identity.user_id, key, size);

    Ok(warp::reply::with_status(
        warp::reply::json(&Envelope::new(ImageData {
            url: format!("/images/{}", key),
            key,
            size,
            content_type,
        })),
        StatusCode::CREATED,
    ))
}

/// GET /images/{user_id}/{image_id}
///
/// Public route; keys are unguessable so possession of the URL is the
/// access model, matching the upload response's `url` field.
pub async fn get_image(
    user_id: String,
    image_id: String,
    state: Arc<AppState>,
) -> Result<impl Reply, Rejection> {
    let key = format!("{}/{}", user_id, image_id);
    let object = state
        .objects
        .get_object(&key)
        .await
        .map_err(warp::reject::custom)?
        .ok_or_else(|| warp::reject::custom(FerrotaskError::NotFound("Image".to_string())))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, object.content_type)
        .header(header::CACHE_CONTROL, "public, max-age=31536000")
        .header(header::ETAG, format!("\"{}\"", object.etag))
        .body(object.data)
        .map_err(|e| {
            warp::reject::custom(FerrotaskError::SystemError(format!(
                "Failed to build image response: {}",
                e
            )))
        })
}

/// DELETE /images/{user_id}/{image_id}
pub async fn delete_image(
    user_id: String,
    image_id: String,
    identity: Identity,
    state: Arc<AppState>,
) -> Result<impl Reply, Rejection> {
    // Ownership is checked before existence so callers cannot probe for
    // other users' keys
    if identity.user_id != user_id {
        return Err(warp::reject::custom(FerrotaskError::Forbidden(
            "You do not have permission to delete this image".to_string(),
        )));
    }

    let key = format!("{}/{}", user_id, image_id);
    let deleted = state
        .objects
        .delete_object(&key)
        .await
        .map_err(warp::reject::custom)?;

    if !deleted {
        return Err(warp::reject::custom(FerrotaskError::NotFound(
            "Image".to_string(),
        )));
    }
    info!("User {} deleted {}", identity.user_id, key);

    Ok(warp::reply::json(&Envelope::new(ImageDeleteData {
        message: "Image deleted successfully".to_string(),
    })))
}
