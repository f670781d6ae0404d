use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

const LASTFM_API_ROOT: &str = "https://ws.audioscrobbler.com/2.0/";

#[derive(Debug, thiserror::Error)]
pub(crate) enum LastFmClientError {
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    #[error("Last.fm error {code}: {message}")]
    Api { code: u32, message: String },
}

/// Artist field of a track or album record. Recent tracks carry the name
/// under "#text", everything else under "name".
#[derive(Debug, Deserialize)]
pub(crate) struct WireArtist {
    #[serde(rename = "#text", alias = "name")]
    pub(crate) name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireTrack {
    pub(crate) name: String,
    pub(crate) artist: WireArtist,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireAlbum {
    pub(crate) name: String,
    pub(crate) artist: WireArtist,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireNamedEntry {
    pub(crate) name: String,
}

#[derive(Debug, Deserialize)]
struct TrackList {
    #[serde(default)]
    track: Vec<WireTrack>,
}

#[derive(Debug, Deserialize)]
struct AlbumList {
    #[serde(default)]
    album: Vec<WireAlbum>,
}

#[derive(Debug, Deserialize)]
struct ArtistList {
    #[serde(default)]
    artist: Vec<WireNamedEntry>,
}

#[derive(Debug, Deserialize)]
struct TagList {
    #[serde(default)]
    tag: Vec<WireNamedEntry>,
}

#[derive(Debug, Deserialize)]
struct RecentTracksResponse {
    recenttracks: TrackList,
}

#[derive(Debug, Deserialize)]
struct LovedTracksResponse {
    lovedtracks: TrackList,
}

#[derive(Debug, Deserialize)]
struct TopTracksResponse {
    toptracks: TrackList,
}

#[derive(Debug, Deserialize)]
struct TopAlbumsResponse {
    topalbums: AlbumList,
}

#[derive(Debug, Deserialize)]
struct TopArtistsResponse {
    topartists: ArtistList,
}

#[derive(Debug, Deserialize)]
struct TopTagsResponse {
    toptags: TagList,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    session: Session,
}

#[derive(Debug, Deserialize)]
struct Session {
    key: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: u32,
    message: String,
}

/// Write calls are signed with an md5 of the sorted parameters plus the
/// shared secret. "format" stays outside the signature.
fn sign_call(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by_key(|(name, _)| *name);

    let mut payload = String::new();
    for (name, value) in sorted {
        payload.push_str(name);
        payload.push_str(value);
    }
    payload.push_str(api_secret);

    format!("{:x}", md5::compute(payload.as_bytes()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, LastFmClientError> {
    if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(body) {
        return Err(LastFmClientError::Api {
            code: api_error.error,
            message: api_error.message,
        });
    }

    Ok(serde_json::from_str(body)?)
}

pub(crate) struct LastFmClient {
    client: Client,
    api_key: String,
    session_key: String,
}

impl LastFmClient {
    /// Creates the HTTP client and opens a mobile session. An auth failure
    /// here is terminal for the caller; there is no lazy re-login.
    pub(crate) async fn create(
        username: &str,
        password: &str,
        api_key: &str,
        api_secret: &str,
        proxy_url: Option<&str>,
        user_agent: &str,
    ) -> Result<Self, LastFmClientError> {
        let mut builder = Client::builder().user_agent(user_agent);

        if let Some(proxy_url) = proxy_url {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        let client = builder.build()?;

        let mut params = vec![
            ("method", "auth.getMobileSession"),
            ("username", username),
            ("password", password),
            ("api_key", api_key),
        ];
        let api_sig = sign_call(&params, api_secret);
        params.push(("api_sig", &api_sig));
        params.push(("format", "json"));

        let body = client
            .post(LASTFM_API_ROOT)
            .form(&params)
            .send()
            .await?
            .text()
            .await?;

        let response: SessionResponse = decode(&body)?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            session_key: response.session.key,
        })
    }

    pub(crate) async fn recent_tracks(
        &self,
        user: &str,
        limit: u32,
    ) -> Result<Vec<WireTrack>, LastFmClientError> {
        let response: RecentTracksResponse = self
            .call("user.getRecentTracks", user, limit, None)
            .await?;

        Ok(response.recenttracks.track)
    }

    pub(crate) async fn loved_tracks(
        &self,
        user: &str,
        limit: u32,
    ) -> Result<Vec<WireTrack>, LastFmClientError> {
        let response: LovedTracksResponse =
            self.call("user.getLovedTracks", user, limit, None).await?;

        Ok(response.lovedtracks.track)
    }

    pub(crate) async fn top_tracks(
        &self,
        user: &str,
        limit: u32,
        period: Option<&str>,
    ) -> Result<Vec<WireTrack>, LastFmClientError> {
        let response: TopTracksResponse =
            self.call("user.getTopTracks", user, limit, period).await?;

        Ok(response.toptracks.track)
    }

    pub(crate) async fn top_albums(
        &self,
        user: &str,
        limit: u32,
        period: Option<&str>,
    ) -> Result<Vec<WireAlbum>, LastFmClientError> {
        let response: TopAlbumsResponse =
            self.call("user.getTopAlbums", user, limit, period).await?;

        Ok(response.topalbums.album)
    }

    pub(crate) async fn top_artists(
        &self,
        user: &str,
        limit: u32,
        period: Option<&str>,
    ) -> Result<Vec<WireNamedEntry>, LastFmClientError> {
        let response: TopArtistsResponse =
            self.call("user.getTopArtists", user, limit, period).await?;

        Ok(response.topartists.artist)
    }

    pub(crate) async fn top_tags(
        &self,
        user: &str,
        limit: u32,
    ) -> Result<Vec<WireNamedEntry>, LastFmClientError> {
        let response: TopTagsResponse = self.call("user.getTopTags", user, limit, None).await?;

        Ok(response.toptags.tag)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        user: &str,
        limit: u32,
        period: Option<&str>,
    ) -> Result<T, LastFmClientError> {
        let limit = limit.to_string();
        let mut query = vec![
            ("method", method),
            ("user", user),
            ("limit", limit.as_str()),
            ("api_key", self.api_key.as_str()),
            ("sk", self.session_key.as_str()),
            ("format", "json"),
        ];

        if let Some(period) = period {
            query.push(("period", period));
        }

        debug!(method, user, "Calling Last.fm");

        let body = self
            .client
            .get(LASTFM_API_ROOT)
            .query(&query)
            .send()
            .await?
            .text()
            .await?;

        decode(&body)
    }
}
