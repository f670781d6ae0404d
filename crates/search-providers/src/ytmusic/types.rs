/// One song row from a YouTube Music search response. Fields arrive
/// best-effort; callers decide what an incomplete row is worth.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SongResult {
    pub video_id: Option<String>,
    pub title: Option<String>,
    pub artists: Vec<String>,
}

/// One album row from a YouTube Music search response. `result_type` is
/// the label YouTube puts on the row ("Album", "EP", "Single").
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlbumResult {
    pub result_type: Option<String>,
    pub browse_id: Option<String>,
    pub title: Option<String>,
    pub artists: Vec<String>,
}
