mod lastfm_client;
pub(crate) use lastfm_client::*;

pub(crate) mod library_browser;
pub(crate) use library_browser::{BrowseError, LibraryBrowser};
