//! Trip Store - persist trips and their media records
//!
//! Everything lives in one JSON document that is rewritten after each
//! mutation. A mutation is applied to a copy of the data and only becomes
//! visible once that copy is on disk. Ids are sequential and never reused.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{StoreError, StoreResult};
use crate::models::{MediaFile, NewMediaFile, Trip, TripCreate, TripUpdate, TripView};

/// Store shared between request handlers and background jobs.
pub type SharedStore = Arc<Mutex<TripStore>>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    last_trip_id: u64,
    last_media_id: u64,
    trips: BTreeMap<u64, Trip>,
    media: BTreeMap<u64, MediaFile>,
}

/// Repository of trips and media files.
#[derive(Debug)]
pub struct TripStore {
    /// Backing file; `None` keeps everything in memory
    path: Option<PathBuf>,
    data: StoreData,
}

impl TripStore {
    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: StoreData::default(),
        }
    }

    /// Open the store at `path`, starting empty if the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            StoreData::default()
        };
        Ok(Self {
            path: Some(path),
            data,
        })
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    fn save(&self, data: &StoreData) -> StoreResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(data)?)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Run `change` on a copy of the data and keep the copy only if it was saved.
    fn commit<T>(&mut self, change: impl FnOnce(&mut StoreData) -> StoreResult<T>) -> StoreResult<T> {
        let mut next = self.data.clone();
        let out = change(&mut next)?;
        self.save(&next)?;
        self.data = next;
        Ok(out)
    }

    // -------------------------------------------------------------------------
    // Trips
    // -------------------------------------------------------------------------

    pub fn create_trip(&mut self, input: TripCreate, owner_id: u64) -> StoreResult<Trip> {
        self.commit(|data| {
            data.last_trip_id += 1;
            let trip = Trip {
                id: data.last_trip_id,
                title: input.title,
                description: input.description,
                destination: input.destination,
                prompt: input.prompt,
                style: input.style,
                status: Default::default(),
                generated_video_url: None,
                owner_id,
                created_at: Utc::now(),
                updated_at: None,
            };
            data.trips.insert(trip.id, trip.clone());
            Ok(trip)
        })
    }

    pub fn trip(&self, id: u64) -> Option<&Trip> {
        self.data.trips.get(&id)
    }

    /// Trips of `owner_id` in id order, paginated.
    pub fn trips_by_owner(&self, owner_id: u64, skip: usize, limit: usize) -> Vec<Trip> {
        self.data
            .trips
            .values()
            .filter(|t| t.owner_id == owner_id)
            .skip(skip)
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn update_trip(&mut self, id: u64, update: TripUpdate) -> StoreResult<Trip> {
        self.commit(|data| {
            let trip = data.trips.get_mut(&id).ok_or(StoreError::TripNotFound(id))?;
            trip.apply(update);
            Ok(trip.clone())
        })
    }

    /// Remove a trip together with its media records, which are returned.
    pub fn delete_trip(&mut self, id: u64) -> StoreResult<(Trip, Vec<MediaFile>)> {
        self.commit(|data| {
            let trip = data.trips.remove(&id).ok_or(StoreError::TripNotFound(id))?;
            let media_ids: Vec<u64> = data
                .media
                .values()
                .filter(|m| m.trip_id == Some(id))
                .map(|m| m.id)
                .collect();
            let media = media_ids
                .into_iter()
                .filter_map(|mid| data.media.remove(&mid))
                .collect();
            Ok((trip, media))
        })
    }

    pub fn trip_view(&self, id: u64) -> Option<TripView> {
        self.trip(id).map(|trip| TripView {
            trip: trip.clone(),
            media_files: self.media_by_trip(id),
        })
    }

    // -------------------------------------------------------------------------
    // Media
    // -------------------------------------------------------------------------

    pub fn add_media(&mut self, new: NewMediaFile) -> StoreResult<MediaFile> {
        if let Some(trip_id) = new.trip_id {
            if !self.data.trips.contains_key(&trip_id) {
                return Err(StoreError::TripNotFound(trip_id));
            }
        }
        self.commit(|data| {
            data.last_media_id += 1;
            let media = MediaFile {
                id: data.last_media_id,
                filename: new.filename,
                original_filename: new.original_filename,
                file_path: new.file_path,
                file_size: new.file_size,
                mime_type: new.mime_type,
                file_type: new.file_type,
                trip_id: new.trip_id,
                uploaded_at: Utc::now(),
            };
            data.media.insert(media.id, media.clone());
            Ok(media)
        })
    }

    pub fn media(&self, id: u64) -> Option<&MediaFile> {
        self.data.media.get(&id)
    }

    /// Media of a trip in upload order.
    pub fn media_by_trip(&self, trip_id: u64) -> Vec<MediaFile> {
        self.data
            .media
            .values()
            .filter(|m| m.trip_id == Some(trip_id))
            .cloned()
            .collect()
    }

    pub fn remove_media(&mut self, id: u64) -> StoreResult<MediaFile> {
        self.commit(|data| data.media.remove(&id).ok_or(StoreError::MediaNotFound(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MediaKind, TripStatus, DEFAULT_OWNER_ID};
    use tempfile::tempdir;

    fn trip_input(title: &str) -> TripCreate {
        TripCreate {
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn photo(trip_id: Option<u64>, name: &str) -> NewMediaFile {
        NewMediaFile {
            filename: name.to_string(),
            original_filename: name.to_string(),
            file_path: format!("uploads/{}", name),
            file_size: 42,
            mime_type: "image/jpeg".to_string(),
            file_type: MediaKind::Image,
            trip_id,
        }
    }

    #[test]
    fn test_ids_are_sequential_from_one() {
        let mut store = TripStore::in_memory();
        let a = store.create_trip(trip_input("a"), DEFAULT_OWNER_ID).unwrap();
        let b = store.create_trip(trip_input("b"), DEFAULT_OWNER_ID).unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(a.status, TripStatus::Draft);

        store.delete_trip(2).unwrap();
        let c = store.create_trip(trip_input("c"), DEFAULT_OWNER_ID).unwrap();
        assert_eq!(c.id, 3);
    }

    #[test]
    fn test_trips_by_owner_paginates() {
        let mut store = TripStore::in_memory();
        for i in 0..5 {
            store.create_trip(trip_input(&format!("t{}", i)), DEFAULT_OWNER_ID).unwrap();
        }
        store.create_trip(trip_input("other"), 2).unwrap();

        let page = store.trips_by_owner(DEFAULT_OWNER_ID, 1, 2);
        let titles: Vec<_> = page.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["t1", "t2"]);
        assert_eq!(store.trips_by_owner(2, 0, 100).len(), 1);
    }

    #[test]
    fn test_update_missing_trip() {
        let mut store = TripStore::in_memory();
        let err = store.update_trip(9, TripUpdate::default()).unwrap_err();
        assert!(matches!(err, StoreError::TripNotFound(9)));
    }

    #[test]
    fn test_media_belongs_to_existing_trip() {
        let mut store = TripStore::in_memory();
        assert!(matches!(
            store.add_media(photo(Some(1), "a.jpg")),
            Err(StoreError::TripNotFound(1))
        ));

        let trip = store.create_trip(trip_input("a"), DEFAULT_OWNER_ID).unwrap();
        store.add_media(photo(Some(trip.id), "a.jpg")).unwrap();
        store.add_media(photo(None, "loose.jpg")).unwrap();
        store.add_media(photo(Some(trip.id), "b.jpg")).unwrap();

        let names: Vec<_> = store
            .media_by_trip(trip.id)
            .into_iter()
            .map(|m| m.filename)
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg"]);
        assert_eq!(store.trip_view(trip.id).unwrap().media_files.len(), 2);
    }

    #[test]
    fn test_delete_trip_drops_its_media() {
        let mut store = TripStore::in_memory();
        let trip = store.create_trip(trip_input("a"), DEFAULT_OWNER_ID).unwrap();
        store.add_media(photo(Some(trip.id), "a.jpg")).unwrap();
        let loose = store.add_media(photo(None, "loose.jpg")).unwrap();

        let (_, removed) = store.delete_trip(trip.id).unwrap();
        assert_eq!(removed.len(), 1);
        assert!(store.media(loose.id).is_some());
        assert!(store.trip(trip.id).is_none());
    }

    #[test]
    fn test_remove_media() {
        let mut store = TripStore::in_memory();
        let media = store.add_media(photo(None, "a.jpg")).unwrap();
        assert_eq!(store.remove_media(media.id).unwrap().filename, "a.jpg");
        assert!(matches!(store.remove_media(media.id), Err(StoreError::MediaNotFound(_))));
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        {
            let mut store = TripStore::open(&path).unwrap();
            let trip = store.create_trip(trip_input("Kyoto"), DEFAULT_OWNER_ID).unwrap();
            store.add_media(photo(Some(trip.id), "temple.jpg")).unwrap();
            store
                .update_trip(trip.id, TripUpdate {
                    style: Some("vintage".into()),
                    ..Default::default()
                })
                .unwrap();
        }

        let mut store = TripStore::open(&path).unwrap();
        let view = store.trip_view(1).unwrap();
        assert_eq!(view.trip.title, "Kyoto");
        assert_eq!(view.trip.style.as_deref(), Some("vintage"));
        assert_eq!(view.media_files[0].filename, "temple.jpg");

        let next = store.create_trip(trip_input("Osaka"), DEFAULT_OWNER_ID).unwrap();
        assert_eq!(next.id, 2);
    }

    #[test]
    fn test_failed_save_keeps_memory_unchanged() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let mut store = TripStore::open(blocker.join("store.json")).unwrap();
        assert!(store.create_trip(trip_input("Lisbon"), DEFAULT_OWNER_ID).is_err());
        assert!(store.trip(1).is_none());
        assert!(store.trips_by_owner(DEFAULT_OWNER_ID, 0, 100).is_empty());
    }

    #[test]
    fn test_failed_save_rolls_back_every_mutation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut store = TripStore::open(&path).unwrap();
        let trip = store.create_trip(trip_input("Lisbon"), DEFAULT_OWNER_ID).unwrap();
        let media = store.add_media(photo(Some(trip.id), "a.jpg")).unwrap();

        // A non-empty directory where the file should be makes every save fail.
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "").unwrap();

        let update = TripUpdate {
            title: Some("Porto".into()),
            ..Default::default()
        };
        assert!(store.update_trip(trip.id, update).is_err());
        assert_eq!(store.trip(trip.id).unwrap().title, "Lisbon");

        assert!(store.add_media(photo(Some(trip.id), "b.jpg")).is_err());
        assert_eq!(store.media_by_trip(trip.id).len(), 1);

        assert!(store.remove_media(media.id).is_err());
        assert!(store.media(media.id).is_some());

        assert!(store.delete_trip(trip.id).is_err());
        assert!(store.trip(trip.id).is_some());

        assert!(store.create_trip(trip_input("Porto"), DEFAULT_OWNER_ID).is_err());
        fs::remove_dir_all(&path).unwrap();
        let next = store.create_trip(trip_input("Porto"), DEFAULT_OWNER_ID).unwrap();
        assert_eq!(next.id, 2);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(TripStore::open(&path), Err(StoreError::Json(_))));
    }
}
