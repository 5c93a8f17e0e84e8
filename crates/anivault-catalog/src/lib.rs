pub mod client;
pub mod error;
pub mod schedule;
pub mod traits;
pub mod types;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use schedule::{next_release_after, next_release_date, release_day_for, weekday_from_name};
pub use traits::CatalogSource;
pub use types::{
    AnimeDetail, AnimeSummary, EpisodeRef, EpisodeStream, Genre, HomeFeed, ScheduleDay,
    ScheduleEntry, StreamInfo, Synopsis,
};
