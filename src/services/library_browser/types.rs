use serde::{Deserialize, Serialize};

pub(crate) const ROOT_TOKEN: &str = "scrobbler";

const PRELOAD_DELIMITER: &str = ":preload:";
const PERIOD_ONE_MONTH: &str = "1month";

/// A parsed browse path. Paths are colon delimited, rooted at
/// [ROOT_TOKEN], and never stored between calls.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BrowsePath {
    Root,
    UserRoot(String),
    Listing { user: String, kind: String },
}

impl BrowsePath {
    pub(crate) fn parse(path: &str) -> Option<Self> {
        if path == ROOT_TOKEN {
            return Some(BrowsePath::Root);
        }

        let rest = path.strip_prefix(&format!("{}:", ROOT_TOKEN))?;
        let (user, kind) = rest.rsplit_once(':')?;

        if user.is_empty() || kind.is_empty() {
            return None;
        }

        if kind == "root" {
            Some(BrowsePath::UserRoot(user.to_string()))
        } else {
            Some(BrowsePath::Listing {
                user: user.to_string(),
                kind: kind.to_string(),
            })
        }
    }
}

/// The declared listings. Each kind is a fixed query against the
/// scrobbling service; the set never changes at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListingKind {
    RecentTracks,
    LovedTracks,
    TopTracks,
    TopAlbums,
    TopArtists,
    TopTags,
}

impl ListingKind {
    pub(crate) const ALL: [ListingKind; 6] = [
        ListingKind::RecentTracks,
        ListingKind::LovedTracks,
        ListingKind::TopTracks,
        ListingKind::TopAlbums,
        ListingKind::TopArtists,
        ListingKind::TopTags,
    ];

    pub(crate) fn id(&self) -> &'static str {
        match self {
            ListingKind::RecentTracks => "recent_tracks",
            ListingKind::LovedTracks => "loved_tracks",
            ListingKind::TopTracks => "top_tracks",
            ListingKind::TopAlbums => "top_albums",
            ListingKind::TopArtists => "top_artists",
            ListingKind::TopTags => "top_tags",
        }
    }

    pub(crate) fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    pub(crate) fn query(&self) -> ListingQuery {
        let period = match self {
            ListingKind::TopTracks | ListingKind::TopAlbums | ListingKind::TopArtists => {
                Some(PERIOD_ONE_MONTH)
            }
            _ => None,
        };

        ListingQuery {
            kind: *self,
            limit: 20,
            period,
        }
    }
}

/// A listing kind together with its fixed query parameters, passed to the
/// scrobbling-service client as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ListingQuery {
    pub(crate) kind: ListingKind,
    pub(crate) limit: u32,
    pub(crate) period: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScrobbledTrack {
    pub(crate) title: String,
    pub(crate) artist: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScrobbledAlbum {
    pub(crate) artist: String,
    pub(crate) title: String,
}

/// One raw history record, decoded once at the scrobbling-client boundary.
/// The pipeline never inspects wire shapes after this point.
///
/// The Last.fm decoder only emits Played, Loved and Top; the bare Track and
/// Album variants cover services that hand out unwrapped records.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ScrobbleRecord {
    Track(ScrobbledTrack),
    Album(ScrobbledAlbum),
    Played(ScrobbledTrack),
    Loved(ScrobbledTrack),
    Top(TopItem),
}

/// Payload of a top-N aggregate entry.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TopItem {
    Track(ScrobbledTrack),
    Album(ScrobbledAlbum),
    Artist(String),
    Tag(String),
}

/// Uniform track shape submitted to the search provider. Scrobbles carry
/// neither a duration nor an external id, so both stay unknown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct TrackDescriptor {
    pub(crate) title: String,
    pub(crate) artists: Vec<String>,
    pub(crate) duration_secs: Option<u32>,
    pub(crate) isrc: Option<String>,
}

impl TrackDescriptor {
    pub(crate) fn from_scrobble(track: ScrobbledTrack) -> Self {
        Self {
            title: track.title,
            artists: vec![track.artist],
            duration_secs: None,
            isrc: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct AlbumDescriptor {
    pub(crate) artists: Vec<String>,
    pub(crate) title: String,
}

impl AlbumDescriptor {
    pub(crate) fn from_scrobble(album: ScrobbledAlbum) -> Self {
        Self {
            artists: vec![album.artist],
            title: album.title,
        }
    }
}

/// A track candidate that survived filtering. Every field is known to be
/// non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct MatchedTrack {
    pub(crate) video_id: String,
    pub(crate) title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MatchedAlbum {
    pub(crate) browse_id: String,
    pub(crate) title: String,
    pub(crate) artists: Vec<String>,
}

/// A browse-tree node handed back to the host. The first track of a
/// listing carries the whole matched batch as a preload payload; the
/// `:preload:` string encoding exists only in [LibraryRef::wire_uri].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LibraryRef {
    Directory {
        uri: String,
        name: String,
    },
    Track {
        uri: String,
        name: String,
        preload: Option<Vec<MatchedTrack>>,
    },
    Album {
        uri: String,
        name: String,
    },
}

impl LibraryRef {
    pub(crate) fn directory(uri: String, name: String) -> Self {
        LibraryRef::Directory { uri, name }
    }

    pub(crate) fn track(uri: String, name: String) -> Self {
        LibraryRef::Track {
            uri,
            name,
            preload: None,
        }
    }

    pub(crate) fn album(uri: String, name: String) -> Self {
        LibraryRef::Album { uri, name }
    }

    pub(crate) fn name(&self) -> &str {
        match self {
            LibraryRef::Directory { name, .. }
            | LibraryRef::Track { name, .. }
            | LibraryRef::Album { name, .. } => name,
        }
    }

    /// The uri as it goes over the wire. A preload payload is appended to
    /// the plain uri as a serialized JSON array.
    pub(crate) fn wire_uri(&self) -> String {
        match self {
            LibraryRef::Directory { uri, .. } | LibraryRef::Album { uri, .. } => uri.clone(),
            LibraryRef::Track { uri, preload, .. } => match preload {
                Some(batch) => {
                    let payload = serde_json::to_string(batch)
                        .expect("Unable to serialize preload payload");
                    format!("{}{}{}", uri, PRELOAD_DELIMITER, payload)
                }
                None => uri.clone(),
            },
        }
    }
}

#[cfg(test)]
mod browse_path_tests {
    use super::{BrowsePath, ListingKind};

    #[test]
    fn should_parse_root_path() {
        assert_eq!(BrowsePath::parse("scrobbler"), Some(BrowsePath::Root));
    }

    #[test]
    fn should_parse_user_root_path() {
        assert_eq!(
            BrowsePath::parse("scrobbler:alice:root"),
            Some(BrowsePath::UserRoot("alice".to_string()))
        );
    }

    #[test]
    fn should_parse_listing_path() {
        assert_eq!(
            BrowsePath::parse("scrobbler:alice:top_tracks"),
            Some(BrowsePath::Listing {
                user: "alice".to_string(),
                kind: "top_tracks".to_string(),
            })
        );
    }

    #[test]
    fn should_reject_foreign_and_partial_paths() {
        assert_eq!(BrowsePath::parse("spotify:alice:root"), None);
        assert_eq!(BrowsePath::parse("scrobbler:alice"), None);
        assert_eq!(BrowsePath::parse("scrobbler::root"), None);
        assert_eq!(BrowsePath::parse("scrobbler:alice:"), None);
    }

    #[test]
    fn should_round_trip_every_listing_kind_id() {
        for kind in ListingKind::ALL {
            assert_eq!(ListingKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(ListingKind::from_id("root"), None);
        assert_eq!(ListingKind::from_id("nonsense"), None);
    }
}
