use crate::services::library_browser::types::{
    AlbumDescriptor, ListingQuery, ScrobbleRecord, TrackDescriptor,
};
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub(crate) struct ScrobblerClientError(pub(crate) Box<dyn std::error::Error + Send + Sync>);

/// The scrobbling service holding a user's play history. Authentication
/// happens when the concrete client is constructed; a client that exists
/// is a client that is signed in.
#[async_trait]
pub(crate) trait ScrobblerClient: Send + Sync {
    async fn fetch_listing(
        &self,
        user: &str,
        query: &ListingQuery,
    ) -> Result<Vec<ScrobbleRecord>, ScrobblerClientError>;
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub(crate) struct SearchClientError(pub(crate) Box<dyn std::error::Error + Send + Sync>);

/// Best-effort track match from the search provider. Fields may be
/// missing; the match filter decides what an incomplete candidate is worth.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TrackCandidate {
    pub(crate) video_id: Option<String>,
    pub(crate) title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct AlbumCandidate {
    pub(crate) result_type: Option<String>,
    pub(crate) browse_id: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) artists: Vec<String>,
}

/// The search provider resolving descriptors to playable candidates. Both
/// operations are batch calls: the whole listing goes out in one call, and
/// the provider may return fewer candidates than descriptors. Candidates
/// are matched back by content, never by position.
#[async_trait]
pub(crate) trait SearchClient: Send + Sync {
    async fn match_tracks(
        &self,
        descriptors: &[TrackDescriptor],
    ) -> Result<Vec<TrackCandidate>, SearchClientError>;
    async fn match_albums(
        &self,
        descriptors: &[AlbumDescriptor],
    ) -> Result<Vec<AlbumCandidate>, SearchClientError>;
}
