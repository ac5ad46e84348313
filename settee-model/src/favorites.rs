use crate::{ids::VideoId, video::Video};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered collection of favorited video snapshots, unique by id.
///
/// All operations are pure: they return a new set and leave `self` intact,
/// which lets the store persist the candidate before committing it.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<Video>", into = "Vec<Video>")
)]
pub struct FavoriteSet {
    entries: Vec<Video>,
}

/// Outcome of a single favorites mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteChange {
    Added,
    /// The id was already present; its snapshot was refreshed in place.
    Replaced,
    Removed,
    Unchanged,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from an arbitrary list, keeping the first entry per id.
    pub fn from_entries(entries: impl IntoIterator<Item = Video>) -> Self {
        let mut unique: Vec<Video> = Vec::new();
        for video in entries {
            if !unique.iter().any(|existing| existing.id == video.id) {
                unique.push(video);
            }
        }
        Self { entries: unique }
    }

    pub fn contains(&self, id: &VideoId) -> bool {
        self.entries.iter().any(|video| &video.id == id)
    }

    pub fn get(&self, id: &VideoId) -> Option<&Video> {
        self.entries.iter().find(|video| &video.id == id)
    }

    pub fn with_added(&self, video: Video) -> (Self, FavoriteChange) {
        let mut entries = self.entries.clone();
        match entries.iter_mut().find(|existing| existing.id == video.id) {
            Some(existing) if *existing == video => {
                (self.clone(), FavoriteChange::Unchanged)
            }
            Some(existing) => {
                *existing = video;
                (Self { entries }, FavoriteChange::Replaced)
            }
            None => {
                entries.push(video);
                (Self { entries }, FavoriteChange::Added)
            }
        }
    }

    pub fn without(&self, id: &VideoId) -> (Self, FavoriteChange) {
        if !self.contains(id) {
            return (self.clone(), FavoriteChange::Unchanged);
        }
        let entries = self
            .entries
            .iter()
            .filter(|video| &video.id != id)
            .cloned()
            .collect();
        (Self { entries }, FavoriteChange::Removed)
    }

    pub fn toggled(&self, video: Video) -> (Self, FavoriteChange) {
        if self.contains(&video.id) {
            self.without(&video.id)
        } else {
            self.with_added(video)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Video> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<Video>> for FavoriteSet {
    fn from(entries: Vec<Video>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<FavoriteSet> for Vec<Video> {
    fn from(set: FavoriteSet) -> Self {
        set.entries
    }
}

impl<'a> IntoIterator for &'a FavoriteSet {
    type Item = &'a Video;
    type IntoIter = std::slice::Iter<'a, Video>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
