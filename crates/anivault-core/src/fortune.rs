use anivault_catalog::CatalogSource;
use anivault_models::{FortuneGrade, FortuneResult, LuckyAnime, LUCKY_COLORS};
use anyhow::Result;
use chrono::NaiveDate;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::store::{ProfileStore, Slot, SlotRead};

/// Lucky anime is picked from a random page of the ongoing listing.
const LUCKY_PICK_MAX_PAGE: u32 = 3;

pub struct FortuneDraw {
    pub result: FortuneResult,
    /// False when today's draw already existed and was returned as-is.
    pub fresh: bool,
}

/// The daily omikuji. One draw per calendar day; drawing again returns the
/// stored result, and a result from a previous day is discarded on sight.
pub struct FortuneTeller {
    store: Arc<ProfileStore>,
    catalog: Option<Arc<dyn CatalogSource>>,
}

impl FortuneTeller {
    pub fn new(store: Arc<ProfileStore>, catalog: Option<Arc<dyn CatalogSource>>) -> Self {
        Self { store, catalog }
    }

    /// Today's stored draw, if any. A stale one is deleted, not returned.
    pub fn current(&self, today: NaiveDate) -> Result<Option<FortuneResult>> {
        match self.store.load::<FortuneResult>(Slot::Fortune) {
            SlotRead::Value(result) if result.date == today => Ok(Some(result)),
            SlotRead::Value(result) => {
                debug!("Discarding stale fortune from {}", result.date);
                self.store.clear(Slot::Fortune)?;
                Ok(None)
            }
            SlotRead::Absent | SlotRead::Damaged => Ok(None),
        }
    }

    pub async fn draw(&self, today: NaiveDate) -> Result<FortuneDraw> {
        if let Some(result) = self.current(today)? {
            return Ok(FortuneDraw {
                result,
                fresh: false,
            });
        }

        // Roll everything up front; thread_rng must not be held across an await.
        let (grade, lucky_color, page) = {
            let mut rng = rand::thread_rng();
            let grade = FortuneGrade::ALL[rng.gen_range(0..FortuneGrade::ALL.len())];
            let color = LUCKY_COLORS[rng.gen_range(0..LUCKY_COLORS.len())].to_string();
            (grade, color, rng.gen_range(1..=LUCKY_PICK_MAX_PAGE))
        };

        let lucky_anime = self.lucky_pick(page).await;

        let result = FortuneResult {
            date: today,
            grade,
            lucky_color,
            lucky_anime,
        };
        self.store.save(Slot::Fortune, &result)?;
        Ok(FortuneDraw {
            result,
            fresh: true,
        })
    }

    /// Best effort: no catalog, an empty listing, or a failed fetch all mean
    /// a draw without a lucky anime.
    async fn lucky_pick(&self, page: u32) -> Option<LuckyAnime> {
        let catalog = self.catalog.as_ref()?;
        match catalog.ongoing(page).await {
            Ok(list) if !list.is_empty() => {
                let index = rand::thread_rng().gen_range(0..list.len());
                let pick = &list[index];
                Some(LuckyAnime {
                    anime_id: pick.anime_id.clone(),
                    title: pick.title.clone(),
                    poster: pick.poster.clone(),
                })
            }
            Ok(_) => None,
            Err(e) => {
                warn!("Lucky anime fetch failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anivault_catalog::{AnimeSummary, CatalogError};
    use anivault_config::PathManager;
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct StubCatalog {
        items: Vec<AnimeSummary>,
    }

    #[async_trait]
    impl CatalogSource for StubCatalog {
        async fn ongoing(&self, _page: u32) -> Result<Vec<AnimeSummary>, CatalogError> {
            Ok(self.items.clone())
        }
    }

    struct FailingCatalog;

    #[async_trait]
    impl CatalogSource for FailingCatalog {
        async fn ongoing(&self, page: u32) -> Result<Vec<AnimeSummary>, CatalogError> {
            Err(CatalogError::Status {
                status: 503,
                url: format!("http://localhost:3001/otakudesu/ongoing?page={}", page),
                body: String::new(),
            })
        }
    }

    fn summary(anime_id: &str) -> AnimeSummary {
        AnimeSummary {
            title: format!("Title {}", anime_id),
            anime_id: anime_id.to_string(),
            poster: format!("https://img.example/{}.jpg", anime_id),
            episodes: None,
            latest_release_date: None,
            score: None,
            status: None,
        }
    }

    fn create_store() -> (TempDir, Arc<ProfileStore>) {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::from_base(dir.path().to_path_buf());
        let store = Arc::new(ProfileStore::new(&paths).unwrap());
        (dir, store)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    #[tokio::test]
    async fn test_draw_is_idempotent_within_a_day() {
        let (_dir, store) = create_store();
        let teller = FortuneTeller::new(store, None);

        let first = teller.draw(today()).await.unwrap();
        assert!(first.fresh);

        let second = teller.draw(today()).await.unwrap();
        assert!(!second.fresh);
        assert_eq!(second.result, first.result);
    }

    #[tokio::test]
    async fn test_draw_without_catalog_has_no_lucky_anime() {
        let (_dir, store) = create_store();
        let teller = FortuneTeller::new(store, None);

        let draw = teller.draw(today()).await.unwrap();
        assert_eq!(draw.result.date, today());
        assert!(draw.result.lucky_anime.is_none());
        assert!(FortuneGrade::ALL.contains(&draw.result.grade));
        assert!(LUCKY_COLORS.contains(&draw.result.lucky_color.as_str()));
    }

    #[tokio::test]
    async fn test_draw_picks_lucky_anime_from_catalog() {
        let (_dir, store) = create_store();
        let catalog = Arc::new(StubCatalog {
            items: vec![summary("a"), summary("b")],
        });
        let teller = FortuneTeller::new(store, Some(catalog));

        let draw = teller.draw(today()).await.unwrap();
        let lucky = draw.result.lucky_anime.expect("stub catalog has items");
        assert!(lucky.anime_id == "a" || lucky.anime_id == "b");
        assert!(!lucky.poster.is_empty());
    }

    #[tokio::test]
    async fn test_catalog_failure_still_draws() {
        let (_dir, store) = create_store();
        let teller = FortuneTeller::new(store, Some(Arc::new(FailingCatalog)));

        let draw = teller.draw(today()).await.unwrap();
        assert!(draw.fresh);
        assert!(draw.result.lucky_anime.is_none());
    }

    #[tokio::test]
    async fn test_stale_fortune_is_discarded() {
        let (_dir, store) = create_store();
        let yesterday = today().pred_opt().unwrap();

        let stale = FortuneResult {
            date: yesterday,
            grade: FortuneGrade::Blessing,
            lucky_color: "Gold".to_string(),
            lucky_anime: None,
        };
        store.save(Slot::Fortune, &stale).unwrap();

        let teller = FortuneTeller::new(store.clone(), None);
        assert!(teller.current(today()).unwrap().is_none());
        assert!(!store.exists(Slot::Fortune));

        // And a draw right after yields a fresh result for today.
        let draw = teller.draw(today()).await.unwrap();
        assert!(draw.fresh);
        assert_eq!(draw.result.date, today());
    }

    #[tokio::test]
    async fn test_next_day_gets_a_new_draw() {
        let (_dir, store) = create_store();
        let teller = FortuneTeller::new(store, None);

        let first = teller.draw(today()).await.unwrap();

        let tomorrow = today().succ_opt().unwrap();
        let second = teller.draw(tomorrow).await.unwrap();
        assert!(second.fresh);
        assert_eq!(second.result.date, tomorrow);
        assert_ne!(second.result.date, first.result.date);
    }

    #[tokio::test]
    async fn test_damaged_fortune_redraws() {
        let (dir, store) = create_store();
        let path = dir.path().join("data").join("profile").join("fortune.json");
        std::fs::write(&path, "{{{{").unwrap();

        let teller = FortuneTeller::new(store, None);
        let draw = teller.draw(today()).await.unwrap();
        assert!(draw.fresh);
    }
}
