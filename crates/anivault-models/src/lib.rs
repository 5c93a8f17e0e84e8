pub mod activity;
pub mod bookmark;
pub mod fortune;
pub mod history;
pub mod reminder;

pub use activity::ActivityLog;
pub use bookmark::BookmarkEntry;
pub use fortune::{FortuneGrade, FortuneResult, LuckyAnime, LUCKY_COLORS};
pub use history::HistoryEntry;
pub use reminder::ReminderEntry;
