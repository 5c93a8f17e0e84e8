use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Calendar day -> number of watch events. Append-only: counts never
/// decrease and days are never pruned (accepted growth tradeoff).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ActivityLog(BTreeMap<NaiveDate, u32>);

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the count for `day` by one.
    pub fn bump(&mut self, day: NaiveDate) {
        *self.0.entry(day).or_insert(0) += 1;
    }

    /// Count for `day`; days never written are implicitly 0.
    pub fn count_on(&self, day: NaiveDate) -> u32 {
        self.0.get(&day).copied().unwrap_or(0)
    }

    /// Lifetime total across all days.
    pub fn total(&self) -> u64 {
        self.0.values().map(|&c| u64::from(c)).sum()
    }

    /// Number of distinct days with at least one event.
    pub fn active_days(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &u32)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_serialize_as_iso_keys() {
        let mut log = ActivityLog::new();
        log.bump(NaiveDate::from_ymd_opt(2026, 8, 25).unwrap());
        log.bump(NaiveDate::from_ymd_opt(2026, 8, 25).unwrap());

        let json = serde_json::to_string(&log).unwrap();
        assert_eq!(json, r#"{"2026-08-25":2}"#);

        let back: ActivityLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }
}
