// Weekly schedule template and today's class resolution
use super::class::ClassRecord;
use chrono::{DateTime, Datelike, FixedOffset, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One slot of the weekly template. Not a record: it has no id of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleEntry {
    pub event: String,
    pub time: String,
    pub location: String,
    pub instructor: String,
}

/// Weekday name ("Monday" .. "Sunday") to that day's entries, in display order
pub type WeeklySchedule = BTreeMap<String, Vec<ScheduleEntry>>;

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Build today's schedule-derived classes. `now` must already be expressed in
/// the facility's civil timezone; the weekday is taken from its local date.
pub fn resolve_todays_classes(schedule: &WeeklySchedule, now: DateTime<FixedOffset>) -> Vec<ClassRecord> {
    let weekday = weekday_name(now.weekday());

    schedule
        .get(weekday)
        .map(|entries| {
            entries
                .iter()
                .enumerate()
                .map(|(index, entry)| ClassRecord {
                    id: format!("schedule_{}_{}", weekday, index),
                    name: entry.event.clone(),
                    time: entry.time.clone(),
                    location: entry.location.clone(),
                    instructor: entry.instructor.clone(),
                    cancelled: false,
                    from_schedule: true,
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn saskatoon(y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        FixedOffset::west_opt(6 * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, 0, 0)
            .unwrap()
    }

    fn schedule(json: &str) -> WeeklySchedule {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_monday_yoga() {
        let schedule = schedule(r#"{"Monday": [{"event": "Yoga", "time": "9am"}]}"#);
        // 2026-10-19 is a Monday
        let classes = resolve_todays_classes(&schedule, saskatoon(2026, 10, 19, 8));

        assert_eq!(
            classes,
            vec![ClassRecord {
                id: "schedule_Monday_0".to_string(),
                name: "Yoga".to_string(),
                time: "9am".to_string(),
                location: String::new(),
                instructor: String::new(),
                cancelled: false,
                from_schedule: true,
            }]
        );
    }

    #[test]
    fn test_one_record_per_entry_with_unique_ids() {
        let schedule = schedule(
            r#"{"Wednesday": [
                {"event": "Spin", "time": "6am", "location": "Studio A", "instructor": "Kim"},
                {"event": "Aqua", "time": "10am"},
                {"event": "Spin", "time": "6pm"}
            ]}"#,
        );
        let now = saskatoon(2026, 10, 21, 12);
        let classes = resolve_todays_classes(&schedule, now);

        assert_eq!(classes.len(), 3);
        assert!(classes.iter().all(|c| c.from_schedule && !c.cancelled));
        let ids: Vec<&str> = classes.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["schedule_Wednesday_0", "schedule_Wednesday_1", "schedule_Wednesday_2"]);

        assert_eq!(resolve_todays_classes(&schedule, now), classes);
    }

    #[test]
    fn test_missing_weekday_yields_no_classes() {
        let schedule = schedule(r#"{"Monday": [{"event": "Yoga"}]}"#);
        assert!(resolve_todays_classes(&schedule, saskatoon(2026, 10, 20, 9)).is_empty());
    }

    #[test]
    fn test_weekday_follows_civil_offset_not_utc() {
        let schedule = schedule(r#"{"Sunday": [{"event": "Family Swim"}], "Monday": [{"event": "Yoga"}]}"#);
        // 23:00 Sunday in UTC-6 is already Monday in UTC
        let classes = resolve_todays_classes(&schedule, saskatoon(2026, 10, 18, 23));
        assert_eq!(classes[0].name, "Family Swim");
    }
}
