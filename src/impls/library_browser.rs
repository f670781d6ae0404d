use crate::services::library_browser::{
    AlbumCandidate, AlbumDescriptor, ListingKind, ListingQuery, ScrobbleRecord, ScrobbledAlbum,
    ScrobbledTrack, ScrobblerClient, ScrobblerClientError, SearchClient, SearchClientError,
    TopItem, TrackCandidate, TrackDescriptor,
};
use crate::services::{LastFmClient, WireAlbum, WireTrack};
use async_trait::async_trait;
use search_providers::YtMusicClient;
use std::collections::HashMap;

fn scrobbled_track(track: WireTrack) -> ScrobbledTrack {
    ScrobbledTrack {
        title: track.name,
        artist: track.artist.name,
    }
}

fn scrobbled_album(album: WireAlbum) -> ScrobbledAlbum {
    ScrobbledAlbum {
        artist: album.artist.name,
        title: album.name,
    }
}

#[async_trait]
impl ScrobblerClient for LastFmClient {
    async fn fetch_listing(
        &self,
        user: &str,
        query: &ListingQuery,
    ) -> Result<Vec<ScrobbleRecord>, ScrobblerClientError> {
        let records = match query.kind {
            ListingKind::RecentTracks => self
                .recent_tracks(user, query.limit)
                .await
                .map_err(|error| ScrobblerClientError(Box::new(error)))?
                .into_iter()
                .map(|track| ScrobbleRecord::Played(scrobbled_track(track)))
                .collect(),
            ListingKind::LovedTracks => self
                .loved_tracks(user, query.limit)
                .await
                .map_err(|error| ScrobblerClientError(Box::new(error)))?
                .into_iter()
                .map(|track| ScrobbleRecord::Loved(scrobbled_track(track)))
                .collect(),
            ListingKind::TopTracks => self
                .top_tracks(user, query.limit, query.period)
                .await
                .map_err(|error| ScrobblerClientError(Box::new(error)))?
                .into_iter()
                .map(|track| ScrobbleRecord::Top(TopItem::Track(scrobbled_track(track))))
                .collect(),
            ListingKind::TopAlbums => self
                .top_albums(user, query.limit, query.period)
                .await
                .map_err(|error| ScrobblerClientError(Box::new(error)))?
                .into_iter()
                .map(|album| ScrobbleRecord::Top(TopItem::Album(scrobbled_album(album))))
                .collect(),
            ListingKind::TopArtists => self
                .top_artists(user, query.limit, query.period)
                .await
                .map_err(|error| ScrobblerClientError(Box::new(error)))?
                .into_iter()
                .map(|artist| ScrobbleRecord::Top(TopItem::Artist(artist.name)))
                .collect(),
            ListingKind::TopTags => self
                .top_tags(user, query.limit)
                .await
                .map_err(|error| ScrobblerClientError(Box::new(error)))?
                .into_iter()
                .map(|tag| ScrobbleRecord::Top(TopItem::Tag(tag.name)))
                .collect(),
        };

        Ok(records)
    }
}

fn search_query(artists: &[String], title: &str) -> String {
    format!("{} - {}", artists.join(", "), title)
}

#[async_trait]
impl SearchClient for YtMusicClient {
    async fn match_tracks(
        &self,
        descriptors: &[TrackDescriptor],
    ) -> Result<Vec<TrackCandidate>, SearchClientError> {
        let mut candidates = Vec::new();
        // Listings repeat artists a lot; identical queries are only sent once.
        let mut cache: HashMap<String, Option<TrackCandidate>> = HashMap::new();

        for descriptor in descriptors {
            let query = search_query(&descriptor.artists, &descriptor.title);

            let candidate = match cache.get(&query) {
                Some(cached) => cached.clone(),
                None => {
                    let found = self
                        .search_songs(&query)
                        .await
                        .map_err(|error| SearchClientError(Box::new(error)))?
                        .into_iter()
                        .next()
                        .map(|song| TrackCandidate {
                            video_id: song.video_id,
                            title: song.title,
                        });
                    cache.insert(query, found.clone());
                    found
                }
            };

            if let Some(candidate) = candidate {
                candidates.push(candidate);
            }
        }

        Ok(candidates)
    }

    async fn match_albums(
        &self,
        descriptors: &[AlbumDescriptor],
    ) -> Result<Vec<AlbumCandidate>, SearchClientError> {
        let mut candidates = Vec::new();
        let mut cache: HashMap<String, Option<AlbumCandidate>> = HashMap::new();

        for descriptor in descriptors {
            let query = search_query(&descriptor.artists, &descriptor.title);

            let candidate = match cache.get(&query) {
                Some(cached) => cached.clone(),
                None => {
                    let found = self
                        .search_albums(&query)
                        .await
                        .map_err(|error| SearchClientError(Box::new(error)))?
                        .into_iter()
                        .next()
                        .map(|album| AlbumCandidate {
                            result_type: album.result_type,
                            browse_id: album.browse_id,
                            title: album.title,
                            artists: album.artists,
                        });
                    cache.insert(query, found.clone());
                    found
                }
            };

            if let Some(candidate) = candidate {
                candidates.push(candidate);
            }
        }

        Ok(candidates)
    }
}
