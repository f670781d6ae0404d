use crate::services::library_browser::traits::{
    AlbumCandidate, ScrobblerClient, ScrobblerClientError, SearchClient, SearchClientError,
    TrackCandidate,
};
use crate::services::library_browser::types::{
    AlbumDescriptor, BrowsePath, LibraryRef, ListingKind, MatchedAlbum, MatchedTrack,
    ScrobbleRecord, TopItem, TrackDescriptor, ROOT_TOKEN,
};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub(crate) enum BrowseError {
    #[error("Invalid browse path: {0}")]
    InvalidPath(String),
    #[error("Unknown listing kind: {0}")]
    UnknownKind(String),
    #[error(transparent)]
    ScrobblerClientError(#[from] ScrobblerClientError),
    #[error(transparent)]
    SearchClientError(#[from] SearchClientError),
}

pub(crate) struct LibraryBrowser {
    scrobbler_client: Arc<dyn ScrobblerClient>,
    search_client: Arc<dyn SearchClient>,
    users: Vec<String>,
}

impl LibraryBrowser {
    pub(crate) fn new(
        scrobbler_client: Arc<dyn ScrobblerClient>,
        search_client: Arc<dyn SearchClient>,
        username: String,
        scrobbler_users: Vec<String>,
    ) -> Self {
        // Account owner first, then the configured extras, duplicates dropped.
        let mut users = Vec::new();
        for user in std::iter::once(username).chain(scrobbler_users) {
            if !users.contains(&user) {
                users.push(user);
            }
        }

        Self {
            scrobbler_client,
            search_client,
            users,
        }
    }

    pub(crate) async fn browse(&self, path: &str) -> Result<Vec<LibraryRef>, BrowseError> {
        match BrowsePath::parse(path) {
            Some(BrowsePath::Root) => Ok(self.browse_root()),
            Some(BrowsePath::UserRoot(user)) => Ok(self.browse_user_root(&user)),
            Some(BrowsePath::Listing { user, kind }) => {
                let kind =
                    ListingKind::from_id(&kind).ok_or_else(|| BrowseError::UnknownKind(kind))?;
                self.browse_listing(&user, kind).await
            }
            None => Err(BrowseError::InvalidPath(path.to_string())),
        }
    }

    fn browse_root(&self) -> Vec<LibraryRef> {
        let mut user_refs = self
            .users
            .iter()
            .map(|user| {
                LibraryRef::directory(format!("{}:{}:root", ROOT_TOKEN, user), user.clone())
            })
            .collect::<Vec<_>>();

        user_refs.sort_by(|a, b| a.name().to_lowercase().cmp(&b.name().to_lowercase()));

        user_refs
    }

    fn browse_user_root(&self, user: &str) -> Vec<LibraryRef> {
        ListingKind::ALL
            .iter()
            .map(|kind| {
                LibraryRef::directory(
                    format!("{}:{}:{}", ROOT_TOKEN, user, kind.id()),
                    format!("{}, {}", user, kind.id()),
                )
            })
            .collect()
    }

    /// The leaf pipeline: fetch, normalize, match, filter, assemble. Any
    /// user the service answers for can be resolved here, configured or not.
    async fn browse_listing(
        &self,
        user: &str,
        kind: ListingKind,
    ) -> Result<Vec<LibraryRef>, BrowseError> {
        let query = kind.query();
        let records = self.scrobbler_client.fetch_listing(user, &query).await?;

        let (track_descriptors, album_descriptors) = normalize_records(records);

        debug!(
            user,
            kind = kind.id(),
            total_tracks = track_descriptors.len(),
            total_albums = album_descriptors.len(),
            "Normalized scrobble listing"
        );

        let track_candidates = self.search_client.match_tracks(&track_descriptors).await?;
        let album_candidates = self.search_client.match_albums(&album_descriptors).await?;

        let tracks = filter_tracks(track_candidates);
        let albums = filter_albums(album_candidates);

        debug!(
            user,
            kind = kind.id(),
            matched_tracks = tracks.len(),
            matched_albums = albums.len(),
            "Matched listing against the search provider"
        );

        Ok(assemble_refs(tracks, albums))
    }
}

/// Flattens raw history records into track and album descriptors,
/// preserving order. Artist- and tag-shaped items have no playable
/// counterpart and are dropped here.
fn normalize_records(
    records: Vec<ScrobbleRecord>,
) -> (Vec<TrackDescriptor>, Vec<AlbumDescriptor>) {
    let mut tracks = Vec::new();
    let mut albums = Vec::new();

    for record in records {
        match record {
            ScrobbleRecord::Track(track)
            | ScrobbleRecord::Played(track)
            | ScrobbleRecord::Loved(track)
            | ScrobbleRecord::Top(TopItem::Track(track)) => {
                tracks.push(TrackDescriptor::from_scrobble(track));
            }
            ScrobbleRecord::Album(album) | ScrobbleRecord::Top(TopItem::Album(album)) => {
                if !album.title.is_empty() {
                    albums.push(AlbumDescriptor::from_scrobble(album));
                }
            }
            ScrobbleRecord::Top(TopItem::Artist(_)) | ScrobbleRecord::Top(TopItem::Tag(_)) => {}
        }
    }

    (tracks, albums)
}

fn filter_tracks(candidates: Vec<TrackCandidate>) -> Vec<MatchedTrack> {
    candidates
        .into_iter()
        .filter_map(|candidate| match (candidate.video_id, candidate.title) {
            (Some(video_id), Some(title)) if !video_id.is_empty() && !title.is_empty() => {
                Some(MatchedTrack { video_id, title })
            }
            _ => None,
        })
        .collect()
}

fn filter_albums(candidates: Vec<AlbumCandidate>) -> Vec<MatchedAlbum> {
    candidates
        .into_iter()
        .filter_map(|candidate| {
            if candidate.result_type.as_deref() != Some("Album") {
                return None;
            }

            match (candidate.browse_id, candidate.title) {
                (Some(browse_id), Some(title))
                    if !browse_id.is_empty()
                        && !title.is_empty()
                        && !candidate.artists.is_empty() =>
                {
                    Some(MatchedAlbum {
                        browse_id,
                        title,
                        artists: candidate.artists,
                    })
                }
                _ => None,
            }
        })
        .collect()
}

fn track_uri(video_id: &str) -> String {
    format!("yt:video:{}", video_id)
}

/// Builds the final reference list: tracks first, albums after, both in
/// filter order. The first track additionally carries the whole matched
/// batch so a player can preload metadata for the rest of the listing
/// from a single uri.
///
/// Uris must be unique within one response, so repeated matches collapse
/// into their first occurrence.
fn assemble_refs(tracks: Vec<MatchedTrack>, albums: Vec<MatchedAlbum>) -> Vec<LibraryRef> {
    let mut unique_tracks: Vec<MatchedTrack> = Vec::new();
    for track in tracks {
        if !unique_tracks.iter().any(|t| t.video_id == track.video_id) {
            unique_tracks.push(track);
        }
    }
    let tracks = unique_tracks;

    let mut unique_albums: Vec<MatchedAlbum> = Vec::new();
    for album in albums {
        if !unique_albums.iter().any(|a| a.browse_id == album.browse_id) {
            unique_albums.push(album);
        }
    }
    let albums = unique_albums;

    let mut refs = tracks
        .iter()
        .map(|track| LibraryRef::track(track_uri(&track.video_id), track.title.clone()))
        .collect::<Vec<_>>();

    if let Some(first_uri) = refs.first().map(LibraryRef::wire_uri) {
        let source = tracks
            .iter()
            .find(|track| track_uri(&track.video_id) == first_uri);

        if let Some(source) = source {
            let name = source.title.clone();
            refs[0] = LibraryRef::Track {
                uri: first_uri,
                name,
                preload: Some(tracks.clone()),
            };
        }
    }

    for album in albums {
        refs.push(LibraryRef::album(
            format!("yt:playlist:{}", album.browse_id),
            format!("{}, '{}'", album.artists.join(", "), album.title),
        ));
    }

    refs
}
