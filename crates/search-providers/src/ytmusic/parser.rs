use crate::ytmusic::types::{AlbumResult, SongResult};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Unexpected response structure: {0}")]
    UnexpectedStructure(&'static str),
}

/// Walks the tabbed search response down to the result rows. YouTube wraps
/// every row in a `musicResponsiveListItemRenderer`.
fn result_items(response: &Value) -> Result<Vec<&Value>, ParseError> {
    let sections = response["contents"]["tabbedSearchResultsRenderer"]["tabs"][0]["tabRenderer"]
        ["content"]["sectionListRenderer"]["contents"]
        .as_array()
        .ok_or(ParseError::UnexpectedStructure("sectionListRenderer"))?;

    let mut items = Vec::new();
    for section in sections {
        let Some(rows) = section["musicShelfRenderer"]["contents"].as_array() else {
            continue;
        };
        for row in rows {
            let item = &row["musicResponsiveListItemRenderer"];
            if !item.is_null() {
                items.push(item);
            }
        }
    }

    Ok(items)
}

/// Run texts of one flex column of a result row. Columns interleave real
/// values with "•" separators.
fn column_runs(item: &Value, index: usize) -> Vec<String> {
    item["flexColumns"][index]["musicResponsiveListItemFlexColumnRenderer"]["text"]["runs"]
        .as_array()
        .map(|runs| {
            runs.iter()
                .filter_map(|run| run["text"].as_str())
                .filter(|text| *text != " • ")
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn column_title(item: &Value) -> Option<String> {
    column_runs(item, 0).into_iter().next()
}

fn looks_like_duration(text: &str) -> bool {
    text.contains(':') && text.chars().all(|c| c.is_ascii_digit() || c == ':')
}

fn looks_like_year(text: &str) -> bool {
    text.len() == 4 && text.chars().all(|c| c.is_ascii_digit())
}

pub(crate) fn parse_song_results(response: &Value) -> Result<Vec<SongResult>, ParseError> {
    let mut songs = Vec::new();

    for item in result_items(response)? {
        let mut detail = column_runs(item, 1);

        // The detail column may lead with the result-type label and always
        // trails with the duration.
        if detail.first().map(String::as_str) == Some("Song") {
            detail.remove(0);
        }
        detail.retain(|text| !looks_like_duration(text));

        songs.push(SongResult {
            video_id: item["playlistItemData"]["videoId"]
                .as_str()
                .map(str::to_string),
            title: column_title(item),
            artists: detail,
        });
    }

    Ok(songs)
}

pub(crate) fn parse_album_results(response: &Value) -> Result<Vec<AlbumResult>, ParseError> {
    let mut albums = Vec::new();

    for item in result_items(response)? {
        let mut detail = column_runs(item, 1);

        let result_type = match detail.first() {
            Some(label) if ["Album", "EP", "Single"].contains(&label.as_str()) => {
                Some(detail.remove(0))
            }
            _ => None,
        };
        detail.retain(|text| !looks_like_year(text));

        albums.push(AlbumResult {
            result_type,
            browse_id: item["navigationEndpoint"]["browseEndpoint"]["browseId"]
                .as_str()
                .map(str::to_string),
            title: column_title(item),
            artists: detail,
        });
    }

    Ok(albums)
}
