mod library_browser;
mod traits;
mod types;

pub(crate) use library_browser::*;
pub(crate) use traits::*;
pub(crate) use types::*;

#[cfg(test)]
mod tests {
    use super::library_browser::{BrowseError, LibraryBrowser};
    use super::traits::{
        AlbumCandidate, ScrobblerClient, ScrobblerClientError, SearchClient, SearchClientError,
        TrackCandidate,
    };
    use super::types::{
        AlbumDescriptor, BrowsePath, LibraryRef, ListingKind, ListingQuery, MatchedTrack,
        ScrobbleRecord, ScrobbledAlbum, ScrobbledTrack, TopItem, TrackDescriptor,
    };
    use async_trait::async_trait;
    use std::io::{Error, ErrorKind};
    use std::sync::Arc;

    fn track(title: &str) -> ScrobbledTrack {
        ScrobbledTrack {
            title: title.to_string(),
            artist: "Robert Miles".to_string(),
        }
    }

    struct ScrobblerClientMock;

    #[async_trait]
    impl ScrobblerClient for ScrobblerClientMock {
        async fn fetch_listing(
            &self,
            user: &str,
            query: &ListingQuery,
        ) -> Result<Vec<ScrobbleRecord>, ScrobblerClientError> {
            match (user, query.kind) {
                ("alice", ListingKind::TopTracks) => Ok(vec![
                    ScrobbleRecord::Top(TopItem::Track(track("Children"))),
                    ScrobbleRecord::Top(TopItem::Track(track("Fable"))),
                    ScrobbleRecord::Top(TopItem::Track(track("One and One"))),
                    ScrobbleRecord::Top(TopItem::Album(ScrobbledAlbum {
                        artist: "Robert Miles".to_string(),
                        title: "Dreamland".to_string(),
                    })),
                    ScrobbleRecord::Top(TopItem::Artist("Robert Miles".to_string())),
                ]),
                ("alice", ListingKind::LovedTracks) => {
                    Ok(vec![ScrobbleRecord::Loved(track("Children"))])
                }
                ("mallory", ListingKind::RecentTracks) => {
                    Ok(vec![ScrobbleRecord::Played(track("Fable"))])
                }
                ("erin", _) => Err(ScrobblerClientError(Box::new(Error::from(
                    ErrorKind::ConnectionReset,
                )))),
                _ => Ok(vec![]),
            }
        }
    }

    struct SearchClientMock;

    #[async_trait]
    impl SearchClient for SearchClientMock {
        async fn match_tracks(
            &self,
            descriptors: &[TrackDescriptor],
        ) -> Result<Vec<TrackCandidate>, SearchClientError> {
            Ok(descriptors
                .iter()
                .filter_map(|descriptor| match descriptor.title.as_str() {
                    "Children" => Some(TrackCandidate {
                        video_id: Some("video-children".to_string()),
                        title: Some("Children".to_string()),
                    }),
                    "Fable" => Some(TrackCandidate {
                        video_id: Some("video-fable".to_string()),
                        title: Some("Fable".to_string()),
                    }),
                    // Found, but with no playable id. Dropped by the filter.
                    "One and One" => Some(TrackCandidate {
                        video_id: None,
                        title: Some("One and One".to_string()),
                    }),
                    _ => None,
                })
                .collect())
        }

        async fn match_albums(
            &self,
            descriptors: &[AlbumDescriptor],
        ) -> Result<Vec<AlbumCandidate>, SearchClientError> {
            Ok(descriptors
                .iter()
                .filter_map(|descriptor| match descriptor.title.as_str() {
                    "Dreamland" => Some(AlbumCandidate {
                        result_type: Some("Album".to_string()),
                        browse_id: Some("MPREb_dreamland".to_string()),
                        title: Some("Dreamland".to_string()),
                        artists: vec!["Robert Miles".to_string()],
                    }),
                    _ => None,
                })
                .collect())
        }
    }

    struct FailingSearchClientMock;

    #[async_trait]
    impl SearchClient for FailingSearchClientMock {
        async fn match_tracks(
            &self,
            _descriptors: &[TrackDescriptor],
        ) -> Result<Vec<TrackCandidate>, SearchClientError> {
            Err(SearchClientError(Box::new(Error::from(
                ErrorKind::TimedOut,
            ))))
        }

        async fn match_albums(
            &self,
            _descriptors: &[AlbumDescriptor],
        ) -> Result<Vec<AlbumCandidate>, SearchClientError> {
            Err(SearchClientError(Box::new(Error::from(
                ErrorKind::TimedOut,
            ))))
        }
    }

    fn browser_with_users(username: &str, extras: &[&str]) -> LibraryBrowser {
        LibraryBrowser::new(
            Arc::new(ScrobblerClientMock),
            Arc::new(SearchClientMock),
            username.to_string(),
            extras.iter().map(|user| user.to_string()).collect(),
        )
    }

    fn browser() -> LibraryBrowser {
        browser_with_users("alice", &["Bob", "carol"])
    }

    #[actix_rt::test]
    async fn should_list_users_sorted_and_deduplicated_at_root() {
        let browser = browser_with_users("zoe", &["alice", "Bob", "alice", "zoe"]);

        let refs = browser.browse("scrobbler").await.unwrap();

        assert_eq!(
            refs,
            vec![
                LibraryRef::directory("scrobbler:alice:root".to_string(), "alice".to_string()),
                LibraryRef::directory("scrobbler:Bob:root".to_string(), "Bob".to_string()),
                LibraryRef::directory("scrobbler:zoe:root".to_string(), "zoe".to_string()),
            ]
        );
    }

    #[actix_rt::test]
    async fn should_list_one_directory_per_kind_for_a_user() {
        let refs = browser().browse("scrobbler:alice:root").await.unwrap();

        assert_eq!(refs.len(), ListingKind::ALL.len());

        for library_ref in &refs {
            let parsed = BrowsePath::parse(&library_ref.wire_uri()).unwrap();
            match parsed {
                BrowsePath::Listing { user, kind } => {
                    assert_eq!(user, "alice");
                    assert!(ListingKind::from_id(&kind).is_some());
                    assert_eq!(library_ref.name(), format!("alice, {}", kind));
                }
                other => panic!("Expected listing path, got {:?}", other),
            }
        }
    }

    #[actix_rt::test]
    async fn should_resolve_top_tracks_listing() {
        let refs = browser().browse("scrobbler:alice:top_tracks").await.unwrap();

        // Two matched tracks plus one matched album. The unmatched track and
        // the artist entry never make it through.
        assert_eq!(refs.len(), 3);

        let first_uri = refs[0].wire_uri();
        let (plain, payload) = first_uri.split_once(":preload:").unwrap();
        assert_eq!(plain, "yt:video:video-children");

        let preloaded: Vec<MatchedTrack> = serde_json::from_str(payload).unwrap();
        assert_eq!(
            preloaded,
            vec![
                MatchedTrack {
                    video_id: "video-children".to_string(),
                    title: "Children".to_string(),
                },
                MatchedTrack {
                    video_id: "video-fable".to_string(),
                    title: "Fable".to_string(),
                },
            ]
        );

        assert_eq!(
            refs[1],
            LibraryRef::track("yt:video:video-fable".to_string(), "Fable".to_string())
        );
        assert_eq!(
            refs[2],
            LibraryRef::album(
                "yt:playlist:MPREb_dreamland".to_string(),
                "Robert Miles, 'Dreamland'".to_string()
            )
        );
    }

    #[actix_rt::test]
    async fn should_resolve_loved_tracks_through_the_same_pipeline() {
        let refs = browser()
            .browse("scrobbler:alice:loved_tracks")
            .await
            .unwrap();

        assert_eq!(refs.len(), 1);
        assert!(refs[0].wire_uri().starts_with("yt:video:video-children"));
    }

    #[actix_rt::test]
    async fn should_return_empty_listing_without_error() {
        let refs = browser()
            .browse("scrobbler:alice:recent_tracks")
            .await
            .unwrap();

        assert_eq!(refs, vec![]);
    }

    #[actix_rt::test]
    async fn should_resolve_listings_for_users_absent_from_config() {
        let refs = browser()
            .browse("scrobbler:mallory:recent_tracks")
            .await
            .unwrap();

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name(), "Fable");
    }

    #[actix_rt::test]
    async fn should_never_return_references_with_empty_name_or_uri() {
        let browser = browser();

        for path in ["scrobbler", "scrobbler:alice:root", "scrobbler:alice:top_tracks"] {
            for library_ref in browser.browse(path).await.unwrap() {
                assert!(!library_ref.name().is_empty());
                assert!(!library_ref.wire_uri().is_empty());
            }
        }
    }

    #[actix_rt::test]
    async fn should_resolve_the_same_path_identically() {
        let browser = browser();

        let first = browser.browse("scrobbler:alice:top_tracks").await.unwrap();
        let second = browser.browse("scrobbler:alice:top_tracks").await.unwrap();

        assert_eq!(first, second);
    }

    #[actix_rt::test]
    async fn should_surface_scrobbler_failure_to_the_caller() {
        let result = browser().browse("scrobbler:erin:recent_tracks").await;

        assert!(matches!(result, Err(BrowseError::ScrobblerClientError(_))));
    }

    #[actix_rt::test]
    async fn should_surface_search_failure_instead_of_partial_list() {
        let browser = LibraryBrowser::new(
            Arc::new(ScrobblerClientMock),
            Arc::new(FailingSearchClientMock),
            "alice".to_string(),
            vec![],
        );

        let result = browser.browse("scrobbler:alice:top_tracks").await;

        assert!(matches!(result, Err(BrowseError::SearchClientError(_))));
    }

    #[actix_rt::test]
    async fn should_fail_on_invalid_path() {
        let result = browser().browse("bogus").await;

        assert!(matches!(result, Err(BrowseError::InvalidPath(_))));
    }

    #[actix_rt::test]
    async fn should_fail_on_unknown_listing_kind() {
        let result = browser().browse("scrobbler:alice:shouted_tracks").await;

        assert!(matches!(result, Err(BrowseError::UnknownKind(kind)) if kind == "shouted_tracks"));
    }
}
