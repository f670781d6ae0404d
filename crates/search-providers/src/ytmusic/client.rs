use crate::ytmusic::parser::{parse_album_results, parse_song_results, ParseError};
use crate::ytmusic::types::{AlbumResult, SongResult};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

const YT_MUSIC_HOST: &str = "https://music.youtube.com";
const INNERTUBE_CLIENT_NAME: &str = "WEB_REMIX";
const INNERTUBE_CLIENT_VERSION: &str = "1.20230501.01.00";

// Pre-encoded search filters for the "Songs" and "Albums" result shelves.
const SONGS_SEARCH_PARAMS: &str = "EgWKAQIIAWoMEA4QChADEAQQCRAF";
const ALBUMS_SEARCH_PARAMS: &str = "EgWKAQIYAWoMEA4QChADEAQQCRAF";

#[derive(Debug, thiserror::Error)]
pub enum YtMusicClientError {
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    #[error(transparent)]
    ParseError(#[from] ParseError),
}

pub struct YtMusicClient {
    client: Client,
}

impl YtMusicClient {
    pub fn create(
        proxy_url: Option<&str>,
        user_agent: &str,
    ) -> Result<Self, YtMusicClientError> {
        let mut builder = Client::builder().user_agent(user_agent);

        if let Some(proxy_url) = proxy_url {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    pub async fn search_songs(&self, query: &str) -> Result<Vec<SongResult>, YtMusicClientError> {
        let response = self.search(query, SONGS_SEARCH_PARAMS).await?;
        let songs = parse_song_results(&response)?;

        debug!(query, results = songs.len(), "Searched songs");

        Ok(songs)
    }

    pub async fn search_albums(
        &self,
        query: &str,
    ) -> Result<Vec<AlbumResult>, YtMusicClientError> {
        let response = self.search(query, ALBUMS_SEARCH_PARAMS).await?;
        let albums = parse_album_results(&response)?;

        debug!(query, results = albums.len(), "Searched albums");

        Ok(albums)
    }

    async fn search(&self, query: &str, params: &str) -> Result<Value, YtMusicClientError> {
        let body = json!({
            "context": {
                "client": {
                    "clientName": INNERTUBE_CLIENT_NAME,
                    "clientVersion": INNERTUBE_CLIENT_VERSION,
                    "hl": "en",
                },
            },
            "query": query,
            "params": params,
        });

        let response = self
            .client
            .post(format!("{}/youtubei/v1/search?alt=json", YT_MUSIC_HOST))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}
