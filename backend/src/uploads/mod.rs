//! Upload intake - validate and persist incoming media files.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::config::Settings;
use crate::error::{UploadError, UploadResult};
use crate::models::{MediaKind, NewMediaFile};

/// A file part received from a multipart form.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl IncomingFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Reject content types outside the allow-list.
pub fn check_content_type(mime: &str, settings: &Settings) -> UploadResult<MediaKind> {
    if !settings.is_allowed_type(mime) {
        return Err(UploadError::TypeNotAllowed(mime.to_string()));
    }
    MediaKind::from_mime(mime).ok_or_else(|| UploadError::TypeNotAllowed(mime.to_string()))
}

pub fn check_size(size: usize, max: usize) -> UploadResult<()> {
    if size > max {
        return Err(UploadError::TooLarge { size, max });
    }
    Ok(())
}

/// Keep only the final path component of a client-supplied name.
pub fn sanitize_filename(name: &str) -> UploadResult<String> {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base == "." || base == ".." {
        return Err(UploadError::InvalidFilename(name.to_string()));
    }
    Ok(base.to_string())
}

/// Fresh `uuid` name that keeps the original extension.
pub fn unique_filename(original: &str) -> String {
    let id = Uuid::new_v4();
    match Path::new(original).extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{}.{}", id, ext),
        _ => id.to_string(),
    }
}

/// Write `bytes` to `dir/filename`, creating the directory on demand.
pub async fn save_bytes(dir: &Path, filename: &str, bytes: &[u8]) -> UploadResult<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(filename);
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}

/// Save under the client's own name (legacy `/upload/` endpoint).
pub async fn store_original(
    file: &IncomingFile,
    kind: MediaKind,
    settings: &Settings,
    trip_id: Option<u64>,
) -> UploadResult<NewMediaFile> {
    let name = sanitize_filename(&file.name)?;
    let path = save_bytes(&settings.upload_dir, &name, &file.bytes).await?;
    Ok(record(file, kind, name.clone(), name, path, trip_id))
}

/// Save under a generated name (trip upload endpoint).
pub async fn store_unique(
    file: &IncomingFile,
    kind: MediaKind,
    settings: &Settings,
    trip_id: u64,
) -> UploadResult<NewMediaFile> {
    let original = sanitize_filename(&file.name)?;
    let name = unique_filename(&original);
    let path = save_bytes(&settings.upload_dir, &name, &file.bytes).await?;
    Ok(record(file, kind, name, original, path, Some(trip_id)))
}

fn record(
    file: &IncomingFile,
    kind: MediaKind,
    filename: String,
    original_filename: String,
    path: PathBuf,
    trip_id: Option<u64>,
) -> NewMediaFile {
    NewMediaFile {
        filename,
        original_filename,
        file_path: path.to_string_lossy().into_owned(),
        file_size: file.size() as u64,
        mime_type: file.content_type.clone(),
        file_type: kind,
        trip_id,
    }
}

/// Remove a stored file; a file already gone is not an error.
pub async fn remove_file(path: &str) -> UploadResult<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn settings_in(dir: &Path) -> Settings {
        Settings {
            upload_dir: dir.to_path_buf(),
            ..Settings::default()
        }
    }

    fn incoming(name: &str, mime: &str) -> IncomingFile {
        IncomingFile {
            name: name.to_string(),
            content_type: mime.to_string(),
            bytes: b"data".to_vec(),
        }
    }

    #[test]
    fn test_content_type() {
        let settings = Settings::default();
        assert_eq!(check_content_type("video/mp4", &settings).unwrap(), MediaKind::Video);
        assert_eq!(check_content_type("image/png", &settings).unwrap(), MediaKind::Image);
        let err = check_content_type("text/plain", &settings).unwrap_err();
        assert_eq!(err.to_string(), "File type text/plain not allowed");
    }

    #[test]
    fn test_allowed_but_not_media_is_rejected() {
        let settings = Settings {
            allowed_file_types: vec!["application/pdf".into()],
            ..Settings::default()
        };
        assert!(check_content_type("application/pdf", &settings).is_err());
    }

    #[test]
    fn test_size_limit() {
        assert!(check_size(10, 10).is_ok());
        assert!(matches!(check_size(11, 10), Err(UploadError::TooLarge { size: 11, max: 10 })));
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("beach.mp4").unwrap(), "beach.mp4");
        assert_eq!(sanitize_filename("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_filename("C:\\photos\\sea.jpg").unwrap(), "sea.jpg");
        assert!(sanitize_filename("dir/").is_err());
        assert!(sanitize_filename("..").is_err());
    }

    #[test]
    fn test_unique_filename_keeps_extension() {
        let a = unique_filename("beach.mp4");
        let b = unique_filename("beach.mp4");
        assert!(a.ends_with(".mp4"));
        assert_ne!(a, b);
        assert!(!unique_filename("README").contains('.'));
    }

    #[tokio::test]
    async fn test_store_original_and_unique() {
        let dir = tempdir().unwrap();
        let settings = settings_in(&dir.path().join("uploads"));

        let file = incoming("beach.mp4", "video/mp4");
        let rec = store_original(&file, MediaKind::Video, &settings, None).await.unwrap();
        assert_eq!(rec.filename, "beach.mp4");
        assert_eq!(rec.file_size, 4);
        assert!(Path::new(&rec.file_path).exists());

        let rec = store_unique(&file, MediaKind::Video, &settings, 3).await.unwrap();
        assert_eq!(rec.original_filename, "beach.mp4");
        assert_ne!(rec.filename, "beach.mp4");
        assert_eq!(rec.trip_id, Some(3));
        assert_eq!(std::fs::read(&rec.file_path).unwrap(), b"data");
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_ok() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.jpg");
        assert!(remove_file(path.to_str().unwrap()).await.is_ok());
    }
}
