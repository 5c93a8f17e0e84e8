//! Turns a schedule weekday label into a concrete next-release timestamp.
//! The catalog labels days in English or Indonesian depending on the mirror,
//! so both are accepted.

use chrono::{DateTime, Datelike, Duration, Local, TimeZone, Weekday};

use crate::types::ScheduleDay;

/// Releases land in the evening; exact hour is an estimate.
const RELEASE_HOUR: u32 = 20;

pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name.to_lowercase().as_str() {
        "sunday" | "minggu" => Some(Weekday::Sun),
        "monday" | "senin" => Some(Weekday::Mon),
        "tuesday" | "selasa" => Some(Weekday::Tue),
        "wednesday" | "rabu" => Some(Weekday::Wed),
        "thursday" | "kamis" => Some(Weekday::Thu),
        "friday" | "jumat" => Some(Weekday::Fri),
        "saturday" | "sabtu" => Some(Weekday::Sat),
        _ => None,
    }
}

/// Next release strictly after `now`, at 20:00 in `now`'s timezone. A day
/// name matching today still rolls a full week ahead, even before 20:00;
/// matching the upstream behavior keeps reminders aligned with what users
/// saw there. Returns `None` for unrecognized day names.
pub fn next_release_after<Tz: TimeZone>(day_name: &str, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let target = weekday_from_name(day_name)?;

    let mut days_until = target.num_days_from_sunday() as i64
        - now.weekday().num_days_from_sunday() as i64;
    if days_until <= 0 {
        days_until += 7;
    }

    let date = now.date_naive() + Duration::days(days_until);
    let naive = date.and_hms_opt(RELEASE_HOUR, 0, 0)?;
    now.timezone().from_local_datetime(&naive).earliest()
}

pub fn next_release_date(day_name: &str) -> Option<DateTime<Local>> {
    next_release_after(day_name, &Local::now())
}

/// Which weekday column lists this anime, if any.
pub fn release_day_for<'a>(schedule: &'a [ScheduleDay], anime_id: &str) -> Option<&'a str> {
    schedule
        .iter()
        .find(|day| day.anime_list.iter().any(|entry| entry.anime_id == anime_id))
        .map(|day| day.day.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScheduleEntry;
    use chrono::Utc;

    fn wednesday_morning() -> DateTime<Utc> {
        // 2024-06-05 is a Wednesday
        Utc.with_ymd_and_hms(2024, 6, 5, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_upcoming_day_resolves_within_week() {
        let now = wednesday_morning();
        let next = next_release_after("friday", &now).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 6, 7, 20, 0, 0).unwrap());
    }

    #[test]
    fn test_same_day_rolls_to_next_week() {
        // Still Wednesday morning, before the 20:00 slot, but the upstream
        // rule is strict: today's day name means next week.
        let now = wednesday_morning();
        let next = next_release_after("wednesday", &now).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 6, 12, 20, 0, 0).unwrap());
    }

    #[test]
    fn test_past_day_rolls_to_next_week() {
        let now = wednesday_morning();
        let next = next_release_after("monday", &now).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 6, 10, 20, 0, 0).unwrap());
    }

    #[test]
    fn test_indonesian_day_names() {
        let now = wednesday_morning();
        let next = next_release_after("Kamis", &now).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 6, 6, 20, 0, 0).unwrap());

        assert_eq!(
            next_release_after("minggu", &now),
            next_release_after("Sunday", &now)
        );
    }

    #[test]
    fn test_unknown_day_name() {
        assert!(next_release_after("someday", &wednesday_morning()).is_none());
    }

    #[test]
    fn test_release_day_lookup() {
        let schedule = vec![
            ScheduleDay {
                day: "Senin".to_string(),
                anime_list: vec![ScheduleEntry {
                    title: "One Piece".to_string(),
                    anime_id: "one-piece-sub".to_string(),
                }],
            },
            ScheduleDay {
                day: "Jumat".to_string(),
                anime_list: vec![ScheduleEntry {
                    title: "Sousou no Frieren".to_string(),
                    anime_id: "frieren-sub-indo".to_string(),
                }],
            },
        ];

        assert_eq!(release_day_for(&schedule, "frieren-sub-indo"), Some("Jumat"));
        assert_eq!(release_day_for(&schedule, "unknown"), None);
    }
}
