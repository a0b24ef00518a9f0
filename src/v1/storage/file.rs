use std::path::Path;

use tracing::debug;

use crate::v1::store::StoreError;

/// Reads an image referenced by a local path so it can be uploaded.
pub async fn read_image_file(path: &Path) -> Result<Vec<u8>, StoreError> {
    debug!("Reading image file[{}]", path.display());
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        StoreError::Io(std::io::Error::new(
            e.kind(),
            format!("cannot read image file {}: {}", path.display(), e),
        ))
    })?;
    debug!("Image file[{}] read, {} bytes", path.display(), bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn reads_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\xff\xd8jpeg").unwrap();
        let bytes = read_image_file(file.path()).await.unwrap();
        assert_eq!(bytes, b"\xff\xd8jpeg");
    }

    #[tokio::test]
    async fn missing_file_names_the_path() {
        let err = read_image_file(Path::new("/no/such/cover.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(err.to_string().contains("/no/such/cover.jpg"));
    }
}
