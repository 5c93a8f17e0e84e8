use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Omikuji grades, best to worst.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FortuneGrade {
    /// 大吉
    GreatBlessing,
    /// 中吉
    MiddleBlessing,
    /// 小吉
    SmallBlessing,
    /// 吉
    Blessing,
    /// 末吉
    FutureBlessing,
    /// 凶
    Curse,
}

impl FortuneGrade {
    /// Draw pool, in grade order.
    pub const ALL: [FortuneGrade; 6] = [
        FortuneGrade::GreatBlessing,
        FortuneGrade::MiddleBlessing,
        FortuneGrade::SmallBlessing,
        FortuneGrade::Blessing,
        FortuneGrade::FutureBlessing,
        FortuneGrade::Curse,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FortuneGrade::GreatBlessing => "Great Blessing",
            FortuneGrade::MiddleBlessing => "Middle Blessing",
            FortuneGrade::SmallBlessing => "Small Blessing",
            FortuneGrade::Blessing => "Blessing",
            FortuneGrade::FutureBlessing => "Future Blessing",
            FortuneGrade::Curse => "Curse",
        }
    }

    pub fn kanji(&self) -> &'static str {
        match self {
            FortuneGrade::GreatBlessing => "大吉",
            FortuneGrade::MiddleBlessing => "中吉",
            FortuneGrade::SmallBlessing => "小吉",
            FortuneGrade::Blessing => "吉",
            FortuneGrade::FutureBlessing => "末吉",
            FortuneGrade::Curse => "凶",
        }
    }

    pub fn blurb(&self) -> &'static str {
        match self {
            FortuneGrade::GreatBlessing => "Everything will go your way today!",
            FortuneGrade::MiddleBlessing => "A good day for new anime.",
            FortuneGrade::SmallBlessing => "Unexpected filler episodes might be good.",
            FortuneGrade::Blessing => "Standard isekai vibes today.",
            FortuneGrade::FutureBlessing => "The plot twist is coming soon.",
            FortuneGrade::Curse => "Beware of spoilers on social media.",
        }
    }
}

/// Lucky color pool.
pub const LUCKY_COLORS: [&str; 10] = [
    "Red", "Blue", "Green", "Yellow", "Purple", "Pink", "Orange", "Black", "White", "Gold",
];

/// Denormalized reference to the day's recommended anime. Carries its own
/// display fields so the result stays renderable when the catalog is down.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LuckyAnime {
    pub anime_id: String,
    pub title: String,
    pub poster: String,
}

/// The day's draw. At most one of these is ever live; a result whose `date`
/// is not today is stale and gets discarded on read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FortuneResult {
    pub date: NaiveDate,
    pub grade: FortuneGrade,
    pub lucky_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lucky_anime: Option<LuckyAnime>,
}
