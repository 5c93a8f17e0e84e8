use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::CatalogError;
use crate::traits::CatalogSource;
use crate::types::{AnimeDetail, AnimeSummary, EpisodeStream, Genre, HomeFeed, ScheduleDay};

/// Every endpoint wraps its payload in `{ "message": ..., "data": ... }`;
/// only `data` matters.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Detail and stream endpoints nest one level deeper under `details`.
#[derive(Debug, Deserialize)]
struct DetailsData<T> {
    details: T,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnimeListData {
    #[serde(default)]
    anime_list: Vec<AnimeSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenreListData {
    #[serde(default)]
    genre_list: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleListData {
    #[serde(default)]
    schedule_list: Vec<ScheduleDay>,
}

#[derive(Debug, Deserialize)]
struct HomeData {
    #[serde(default)]
    ongoing: AnimeListData,
    #[serde(default)]
    completed: AnimeListData,
}

pub struct CatalogClient {
    client: Client,
    base_url: String,
}

/// Ids arrive from user input or upstream slugs; percent-escape them before
/// they become a path segment.
fn id_path(kind: &str, id: &str) -> String {
    format!("/{}/{}", kind, urlencoding::encode(id))
}

impl CatalogClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "catalog request");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %url, "catalog request failed");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url,
                body,
            });
        }

        Ok(response.json().await?)
    }

    pub async fn home(&self) -> Result<HomeFeed, CatalogError> {
        let res: Envelope<HomeData> = self.get_json("/home").await?;
        Ok(HomeFeed {
            ongoing: res.data.ongoing.anime_list,
            completed: res.data.completed.anime_list,
        })
    }

    pub async fn ongoing(&self, page: u32) -> Result<Vec<AnimeSummary>, CatalogError> {
        let res: Envelope<AnimeListData> =
            self.get_json(&format!("/ongoing?page={}", page)).await?;
        Ok(res.data.anime_list)
    }

    pub async fn completed(&self, page: u32) -> Result<Vec<AnimeSummary>, CatalogError> {
        let res: Envelope<AnimeListData> =
            self.get_json(&format!("/completed?page={}", page)).await?;
        Ok(res.data.anime_list)
    }

    pub async fn search(&self, query: &str) -> Result<Vec<AnimeSummary>, CatalogError> {
        let res: Envelope<AnimeListData> = self
            .get_json(&format!("/search?q={}", urlencoding::encode(query)))
            .await?;
        Ok(res.data.anime_list)
    }

    pub async fn anime(&self, anime_id: &str) -> Result<AnimeDetail, CatalogError> {
        let res: Envelope<DetailsData<AnimeDetail>> =
            self.get_json(&id_path("anime", anime_id)).await?;
        Ok(res.data.details)
    }

    pub async fn episode(&self, episode_id: &str) -> Result<EpisodeStream, CatalogError> {
        let res: Envelope<DetailsData<EpisodeStream>> =
            self.get_json(&id_path("episode", episode_id)).await?;
        Ok(res.data.details)
    }

    pub async fn schedule(&self) -> Result<Vec<ScheduleDay>, CatalogError> {
        let res: Envelope<ScheduleListData> = self.get_json("/schedule").await?;
        Ok(res.data.schedule_list)
    }

    pub async fn genres(&self) -> Result<Vec<Genre>, CatalogError> {
        let res: Envelope<GenreListData> = self.get_json("/genre").await?;
        Ok(res.data.genre_list)
    }

    pub async fn genre(&self, genre_id: &str, page: u32) -> Result<Vec<AnimeSummary>, CatalogError> {
        let res: Envelope<AnimeListData> = self
            .get_json(&format!("{}?page={}", id_path("genre", genre_id), page))
            .await?;
        Ok(res.data.anime_list)
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn ongoing(&self, page: u32) -> Result<Vec<AnimeSummary>, CatalogError> {
        CatalogClient::ongoing(self, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_envelope_decodes() {
        let json = r#"{
            "message": "Ok",
            "data": {
                "ongoing": {
                    "animeList": [
                        {
                            "title": "Sousou no Frieren",
                            "animeId": "frieren-sub-indo",
                            "poster": "https://img.example/frieren.jpg",
                            "episodes": "28",
                            "latestReleaseDate": "Jumat"
                        }
                    ]
                },
                "completed": { "animeList": [] }
            }
        }"#;

        let parsed: Envelope<HomeData> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data.ongoing.anime_list.len(), 1);
        assert_eq!(parsed.data.ongoing.anime_list[0].anime_id, "frieren-sub-indo");
        assert_eq!(
            parsed.data.ongoing.anime_list[0].episodes.as_deref(),
            Some("28")
        );
        assert!(parsed.data.completed.anime_list.is_empty());
    }

    #[test]
    fn test_stream_envelope_decodes() {
        let json = r#"{
            "message": "Ok",
            "data": {
                "details": {
                    "title": "Frieren Episode 12",
                    "poster": "https://img.example/frieren.jpg",
                    "defaultStreamingUrl": "https://stream.example/ep12",
                    "prevEpisode": { "episodeId": "frieren-episode-11", "title": "Episode 11" },
                    "nextEpisode": null,
                    "info": {
                        "duration": "24 min",
                        "type": "TV",
                        "genreList": [],
                        "episodeList": [
                            { "title": "Episode 12", "episodeId": "frieren-episode-12" }
                        ]
                    }
                }
            }
        }"#;

        let parsed: Envelope<DetailsData<EpisodeStream>> = serde_json::from_str(json).unwrap();
        let stream = parsed.data.details;
        assert_eq!(stream.default_streaming_url, "https://stream.example/ep12");
        assert_eq!(
            stream.prev_episode.as_ref().unwrap().episode_id,
            "frieren-episode-11"
        );
        assert!(stream.next_episode.is_none());
        assert_eq!(stream.info.duration.as_deref(), Some("24 min"));
        assert_eq!(stream.info.episode_list.len(), 1);
    }

    #[test]
    fn test_schedule_envelope_decodes() {
        let json = r#"{
            "message": "Ok",
            "data": {
                "scheduleList": [
                    {
                        "title": "Jumat",
                        "animeList": [
                            { "title": "Sousou no Frieren", "animeId": "frieren-sub-indo", "otakudesuUrl": "https://otakudesu.example/anime/frieren-sub-indo" }
                        ]
                    }
                ]
            }
        }"#;

        let parsed: Envelope<ScheduleListData> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data.schedule_list[0].day, "Jumat");
        assert_eq!(
            parsed.data.schedule_list[0].anime_list[0].anime_id,
            "frieren-sub-indo"
        );
    }

    #[test]
    fn test_detail_envelope_tolerates_sparse_fields() {
        let json = r#"{
            "message": "Ok",
            "data": {
                "details": {
                    "title": "Mushoku Tensei",
                    "poster": "",
                    "synopsis": { "paragraphList": [] },
                    "episodeList": []
                }
            }
        }"#;

        let parsed: Envelope<DetailsData<AnimeDetail>> = serde_json::from_str(json).unwrap();
        let detail = parsed.data.details;
        assert_eq!(detail.title, "Mushoku Tensei");
        assert_eq!(detail.status, "");
        assert_eq!(detail.score, "");
        assert!(detail.genre_list.is_empty());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            CatalogClient::new("http://localhost:3001/otakudesu/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url, "http://localhost:3001/otakudesu");
    }

    #[test]
    fn test_ids_are_escaped_into_path_segments() {
        assert_eq!(id_path("anime", "one-piece"), "/anime/one-piece");
        assert_eq!(
            id_path("episode", "weird id/../x?y"),
            "/episode/weird%20id%2F..%2Fx%3Fy"
        );
        assert_eq!(id_path("genre", "slice of life"), "/genre/slice%20of%20life");
    }
}
