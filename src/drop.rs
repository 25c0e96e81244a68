//! Drop resolution: turns a dropped payload at a screen location into a document request.
//!
//! Two payload kinds are accepted: an image/URL reference (which becomes the
//! background) and a plain-text glyph (which becomes a new item at the drop
//! location). Anything else is rejected and the drop is reported as a no-op.

#[cfg(test)]
#[path = "drop_test.rs"]
mod drop_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Point};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DropError {
    #[error("unsupported drop payload: {0}")]
    UnsupportedPayload(String),
}

/// A single item offered by a drag source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum Payload {
    /// Reference to an image, by URL.
    Image(String),
    /// A glyph string.
    Text(String),
    /// Anything the canvas doesn't understand, by content type.
    Other(String),
}

impl Payload {
    /// Classify a payload by its content type.
    #[must_use]
    pub fn from_content_type(content_type: &str, data: &str) -> Self {
        let content_type = content_type.trim().to_ascii_lowercase();
        match content_type.as_str() {
            "public.image" | "public.url" | "public.file-url" | "text/uri-list" => Self::Image(data.to_owned()),
            "public.text" | "public.plain-text" | "public.utf8-plain-text" | "text/plain" => {
                Self::Text(data.to_owned())
            }
            ct if ct.starts_with("image/") => Self::Image(data.to_owned()),
            _ => Self::Other(content_type),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Image(_) => "image".to_owned(),
            Self::Text(_) => "text".to_owned(),
            Self::Other(content_type) => content_type.clone(),
        }
    }
}

/// Document mutation requested by a drop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DropRequest {
    /// Replace the background. Backgrounds are not positioned, so the drop location is unused.
    SetBackground { url: String },
    /// Place a new item at a document-space location.
    AddItem { text: String, location: Point, size: f64 },
}

/// Resolve one payload dropped at `screen`.
///
/// `camera` should carry the steady view transform: a drop is not a gesture
/// and must not see another gesture's transient deltas.
///
/// # Errors
///
/// Returns `UnsupportedPayload` when the payload is neither an image reference nor text.
pub fn resolve_drop(screen: Point, camera: &Camera, payload: &Payload, default_size: f64) -> Result<DropRequest, DropError> {
    match payload {
        Payload::Image(url) => Ok(DropRequest::SetBackground { url: url.clone() }),
        Payload::Text(text) => Ok(DropRequest::AddItem {
            text: text.clone(),
            location: camera.screen_to_document(screen),
            size: default_size,
        }),
        Payload::Other(_) => Err(DropError::UnsupportedPayload(payload.describe())),
    }
}

/// Resolve everything a drag source offered in one drop.
///
/// The first image reference wins and yields a single background request.
/// Without one, every text payload yields an item at the same location.
///
/// # Errors
///
/// Returns `UnsupportedPayload` when no payload is an image reference or text.
pub fn resolve_drop_all(
    screen: Point,
    camera: &Camera,
    payloads: &[Payload],
    default_size: f64,
) -> Result<Vec<DropRequest>, DropError> {
    if let Some(image) = payloads.iter().find(|p| matches!(p, Payload::Image(_))) {
        return Ok(vec![resolve_drop(screen, camera, image, default_size)?]);
    }

    let requests = payloads
        .iter()
        .filter(|p| matches!(p, Payload::Text(_)))
        .map(|p| resolve_drop(screen, camera, p, default_size))
        .collect::<Result<Vec<_>, _>>()?;

    if requests.is_empty() {
        let offered = payloads.iter().map(Payload::describe).collect::<Vec<_>>().join(", ");
        let offered = if offered.is_empty() { "nothing".to_owned() } else { offered };
        return Err(DropError::UnsupportedPayload(offered));
    }
    Ok(requests)
}
