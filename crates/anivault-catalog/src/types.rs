//! Wire types for the catalog API. Field names follow the API's camelCase
//! JSON; everything beyond the identifying fields is defaulted so a sparse
//! listing never fails the whole response.

use serde::{Deserialize, Serialize};

/// Card-level entry, as returned by the home, ongoing, completed, genre and
/// search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnimeSummary {
    pub title: String,
    pub anime_id: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub episodes: Option<String>,
    #[serde(default)]
    pub latest_release_date: Option<String>,
    #[serde(default)]
    pub score: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// The two rails of the home endpoint.
#[derive(Debug, Clone)]
pub struct HomeFeed {
    pub ongoing: Vec<AnimeSummary>,
    pub completed: Vec<AnimeSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub title: String,
    #[serde(default)]
    pub genre_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Episode link as it appears in detail and stream episode lists and in the
/// prev/next navigation of a stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeRef {
    pub title: String,
    pub episode_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Synopsis {
    #[serde(default)]
    pub paragraph_list: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnimeDetail {
    pub title: String,
    #[serde(default)]
    pub japanese: Option<String>,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub synopsis: Synopsis,
    #[serde(default)]
    pub episode_list: Vec<EpisodeRef>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub score: String,
    #[serde(default)]
    pub studios: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub aired: Option<String>,
    #[serde(rename = "type", default)]
    pub anime_type: Option<String>,
    #[serde(default)]
    pub genre_list: Vec<Genre>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StreamInfo {
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(rename = "type", default)]
    pub anime_type: Option<String>,
    #[serde(default)]
    pub genre_list: Vec<Genre>,
    #[serde(default)]
    pub episode_list: Vec<EpisodeRef>,
}

/// A playable episode, from the stream endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeStream {
    pub title: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub default_streaming_url: String,
    #[serde(default)]
    pub prev_episode: Option<EpisodeRef>,
    #[serde(default)]
    pub next_episode: Option<EpisodeRef>,
    #[serde(default)]
    pub info: StreamInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub title: String,
    pub anime_id: String,
}

/// One weekday column of the release schedule. The API labels days in either
/// English or Indonesian; `day` is passed to the schedule helper as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDay {
    #[serde(rename = "title")]
    pub day: String,
    #[serde(default)]
    pub anime_list: Vec<ScheduleEntry>,
}
