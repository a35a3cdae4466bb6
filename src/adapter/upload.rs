use crate::llm::InlineImage;
use axum::body::Bytes;
use base64::{Engine as _, engine::general_purpose};
use image::ImageFormat;

/// Used when neither the upload nor its contents say what the image is.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// One uploaded image as received from the client.
#[derive(Debug, Clone, Default)]
pub struct ImageUpload {
    pub bytes: Bytes,
    /// Content type declared on the upload, if any.
    pub content_type: Option<String>,
    /// `None` when the field was sent as plain text rather than a file.
    pub file_name: Option<String>,
}

impl ImageUpload {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: None,
            file_name: Some("upload".to_string()),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_file_name(mut self, file_name: Option<String>) -> Self {
        self.file_name = file_name;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Declared `image/*` type first, then the file signature, then the default.
pub fn detect_mime_type(upload: &ImageUpload) -> String {
    if let Some(declared) = upload.content_type.as_deref().and_then(declared_image_type) {
        return declared;
    }

    image::guess_format(&upload.bytes)
        .ok()
        .and_then(format_mime_type)
        .unwrap_or(DEFAULT_MIME_TYPE)
        .to_string()
}

fn declared_image_type(content_type: &str) -> Option<String> {
    let essence = content_type.split(';').next()?.trim().to_ascii_lowercase();
    let is_image = essence
        .strip_prefix("image/")
        .is_some_and(|subtype| !subtype.is_empty());
    is_image.then_some(essence)
}

fn format_mime_type(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Gif => Some("image/gif"),
        ImageFormat::WebP => Some("image/webp"),
        ImageFormat::Bmp => Some("image/bmp"),
        ImageFormat::Tiff => Some("image/tiff"),
        _ => None,
    }
}

pub fn encode_image(upload: &ImageUpload) -> InlineImage {
    InlineImage {
        mime_type: detect_mime_type(upload),
        data: general_purpose::STANDARD.encode(&upload.bytes),
    }
}
