use serde::Deserialize;

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_shutdown_timeout() -> u64 {
    30u64
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct LastFmCredentials {
    #[serde(rename = "lastfm_username")]
    pub(crate) username: String,
    #[serde(rename = "lastfm_password")]
    pub(crate) password: String,
    #[serde(rename = "lastfm_api_key")]
    pub(crate) api_key: String,
    #[serde(rename = "lastfm_api_secret")]
    pub(crate) api_secret: String,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Config {
    #[serde(default = "default_bind_address")]
    pub(crate) bind_address: String,
    #[serde(default = "default_shutdown_timeout")]
    pub(crate) shutdown_timeout: u64,
    #[serde(default)]
    pub(crate) scrobbler_users: Vec<String>,
    #[serde(default)]
    pub(crate) proxy: Option<String>,
    #[serde(flatten)]
    pub(crate) lastfm: LastFmCredentials,
}

impl Config {
    pub(crate) fn from_env() -> Self {
        match envy::from_env::<Self>() {
            Ok(config) => config,
            Err(error) => panic!("Missing environment variable: {:#?}", error),
        }
    }
}
