//! File intake: filtering, identifiers, previews and the accepted file list.
//!
//! Browser specifics (`File`, `URL.createObjectURL`) sit behind the
//! [`MediaFile`] and [`PreviewUrls`] traits so the list logic runs anywhere.

use rand::Rng;
use std::fmt;
use std::rc::Rc;

use crate::config::MEDIA_ID_LEN;
use crate::types::MediaKind;

/// A file handle as seen by the intake surface.
pub trait MediaFile {
    fn name(&self) -> String;
    fn mime_type(&self) -> String;
}

impl MediaFile for web_sys::File {
    fn name(&self) -> String {
        web_sys::File::name(self)
    }

    fn mime_type(&self) -> String {
        self.type_()
    }
}

/// Creates and releases preview URLs for image files.
pub trait PreviewUrls<F> {
    fn create(&self, file: &F) -> Option<String>;
    fn revoke(&self, url: &str);
}

/// Object URLs backed by the browser's `URL` API.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserPreviews;

impl PreviewUrls<web_sys::File> for BrowserPreviews {
    fn create(&self, file: &web_sys::File) -> Option<String> {
        match web_sys::Url::create_object_url_with_blob(file) {
            Ok(url) => Some(url),
            Err(e) => {
                log::warn!("Could not create preview for {}: {:?}", file.name(), e);
                None
            }
        }
    }

    fn revoke(&self, url: &str) {
        if let Err(e) = web_sys::Url::revoke_object_url(url) {
            log::warn!("Could not revoke preview {}: {:?}", url, e);
        }
    }
}

struct ObjectUrl {
    url: String,
    revoke: Box<dyn Fn(&str)>,
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        (self.revoke)(&self.url);
    }
}

/// Shared handle to a preview URL.
///
/// Clones share the URL; it is revoked once the last clone is dropped,
/// i.e. when its item leaves every list that held it.
#[derive(Clone)]
pub struct PreviewUrl(Rc<ObjectUrl>);

impl PreviewUrl {
    pub fn new(url: String, revoke: impl Fn(&str) + 'static) -> Self {
        Self(Rc::new(ObjectUrl {
            url,
            revoke: Box::new(revoke),
        }))
    }

    pub fn as_str(&self) -> &str {
        &self.0.url
    }
}

impl fmt::Debug for PreviewUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PreviewUrl").field(&self.0.url).finish()
    }
}

impl PartialEq for PreviewUrl {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// Source of opaque item identifiers.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Random lowercase base-36 identifiers.
#[derive(Debug, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> String {
        const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
        let mut rng = rand::thread_rng();
        (0..MEDIA_ID_LEN)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

/// One staged file.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadedMediaItem<F> {
    pub id: String,
    pub file: F,
    /// Only images get a preview.
    pub preview: Option<PreviewUrl>,
    pub kind: MediaKind,
}

impl<F: MediaFile> UploadedMediaItem<F> {
    pub fn name(&self) -> String {
        self.file.name()
    }
}

/// The authoritative ordered list of accepted items.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaList<F> {
    items: Vec<UploadedMediaItem<F>>,
}

impl<F> Default for MediaList<F> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<F> MediaList<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[UploadedMediaItem<F>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    /// Append a freshly accepted batch, keeping arrival order.
    pub fn extend(&mut self, batch: Vec<UploadedMediaItem<F>>) {
        self.items.extend(batch);
    }

    /// Remove exactly the item with `id`. Returns whether it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.items.iter().position(|item| item.id == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Supersede the whole list. Previews of dropped items are released.
    pub fn replace(&mut self, items: Vec<UploadedMediaItem<F>>) {
        self.items = items;
    }
}

/// Turn raw files into accepted items.
///
/// Files whose MIME type is not `video/*` or `image/*` are dropped without
/// feedback. Identifiers are unique against `existing` and within the batch.
pub fn accept_files<F, P>(
    files: Vec<F>,
    existing: &MediaList<F>,
    ids: &mut impl IdSource,
    previews: &Rc<P>,
) -> Vec<UploadedMediaItem<F>>
where
    F: MediaFile,
    P: PreviewUrls<F> + 'static,
{
    let mut accepted: Vec<UploadedMediaItem<F>> = Vec::new();

    for file in files {
        let Some(kind) = MediaKind::from_mime(&file.mime_type()) else {
            log::debug!("Skipping {} ({})", file.name(), file.mime_type());
            continue;
        };

        let id = loop {
            let candidate = ids.next_id();
            if !existing.contains(&candidate) && !accepted.iter().any(|i| i.id == candidate) {
                break candidate;
            }
        };

        let preview = match kind {
            MediaKind::Image => previews.create(&file).map(|url| {
                let owner = Rc::clone(previews);
                PreviewUrl::new(url, move |u| owner.revoke(u))
            }),
            MediaKind::Video => None,
        };

        accepted.push(UploadedMediaItem {
            id,
            file,
            preview,
            kind,
        });
    }

    accepted
}
