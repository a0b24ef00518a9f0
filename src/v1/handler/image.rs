use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::warn;

use super::{
    error::{store_failure, RequestError},
    response::BookResponse,
};
use crate::v1::{book::ImagePayload, storage::file::read_image_file};

pub const IMAGE_UPLOAD: &str = "image upload";

/// Resolves an optional image payload to the bytes to upload, before any store is written.
///
/// Undecodable base64 is a client error; an unreadable file is reported like a failed upload.
pub async fn load_image(image: Option<&ImagePayload>) -> Result<Option<Vec<u8>>, BookResponse> {
    let bytes = match image {
        None => return Ok(None),
        Some(ImagePayload::Encoded(data)) => STANDARD.decode(data.trim()).map_err(|e| {
            warn!("Rejecting image payload: {}", e);
            BookResponse::from(RequestError::InvalidImage(
                "Invalid base64 image data".to_string(),
            ))
        })?,
        Some(ImagePayload::File(path)) => read_image_file(path)
            .await
            .map_err(|e| store_failure(&e, IMAGE_UPLOAD))?,
    };
    Ok(Some(bytes))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn decodes_base64() {
        let bytes = load_image(Some(&ImagePayload::Encoded("aGVsbG8=\n".into())))
            .await
            .unwrap();
        assert_eq!(bytes, Some(b"hello".to_vec()));
        assert_eq!(load_image(None).await.unwrap(), None);
    }

    #[tokio::test]
    async fn bad_base64_is_a_client_error() {
        let response = load_image(Some(&ImagePayload::Encoded("not base64!".into())))
            .await
            .unwrap_err();
        assert_eq!(response.status_code, Some(400));
        assert_eq!(response.body, Some(json!("Invalid base64 image data")));
    }

    #[tokio::test]
    async fn unreadable_file_is_a_server_error() {
        let response = load_image(Some(&ImagePayload::File(PathBuf::from("/no/such/file.jpg"))))
            .await
            .unwrap_err();
        assert_eq!(response.status_code, Some(500));
    }
}
