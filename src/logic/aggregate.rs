//! Daily aggregation of the 3-hour forecast list.
//!
//! Samples are grouped by the calendar date at the forecast location
//! (timestamp shifted by the location's UTC offset). Days are emitted in the
//! order they were first seen and the outlook is capped at five days.

use crate::logic::format::{date_label, local_date, ms_to_kmh, round_half_up};
use crate::models::{theme_for, DailySummary, ForecastSample, FALLBACK_CONDITION_ID};
use chrono::NaiveDate;
use std::collections::HashMap;

pub const MAX_DAYS: usize = 5;

#[derive(Debug)]
struct DailyBucket {
    date: NaiveDate,
    temperatures: Vec<Option<f64>>,
    rain_mm: f64,
    snow_mm: f64,
    wind_max: f64,
    condition_ids: Vec<u32>,
    condition_labels: Vec<String>,
}

impl DailyBucket {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            temperatures: Vec::new(),
            rain_mm: 0.0,
            snow_mm: 0.0,
            wind_max: 0.0,
            condition_ids: Vec::new(),
            condition_labels: Vec::new(),
        }
    }

    fn add(&mut self, sample: &ForecastSample) {
        self.temperatures.push(sample.temperature);
        self.rain_mm += sample.rain_mm;
        self.snow_mm += sample.snow_mm;
        if sample.wind_speed > self.wind_max {
            self.wind_max = sample.wind_speed;
        }
        if let Some(id) = sample.condition_id {
            self.condition_ids.push(id);
        }
        if let Some(label) = sample.condition_label.as_deref() {
            if !label.is_empty() && !self.condition_labels.iter().any(|l| l == label) {
                self.condition_labels.push(label.to_string());
            }
        }
    }

    fn summarize(&self) -> DailySummary {
        let temps = self.temperatures.iter().flatten().copied();
        let temp_min = temps.clone().reduce(f64::min).map(round_half_up);
        let temp_max = temps.reduce(f64::max).map(round_half_up);

        let condition_id = dominant_condition(&self.condition_ids).unwrap_or(FALLBACK_CONDITION_ID);
        let theme = theme_for(condition_id);
        let condition_text = self
            .condition_labels
            .first()
            .cloned()
            .unwrap_or_else(|| theme.text.to_string());

        DailySummary {
            date: self.date,
            day_label: date_label(self.date),
            condition_id,
            icon: theme.icon.to_string(),
            condition_text,
            temp_min,
            temp_max,
            precipitation_mm: round_half_up(self.rain_mm + self.snow_mm),
            wind_kmh: ms_to_kmh(self.wind_max),
        }
    }
}

/// Most frequent id; on a tie the id seen first wins.
pub fn dominant_condition(ids: &[u32]) -> Option<u32> {
    // id -> position in `counts`, which stays in first-seen order
    let mut index: HashMap<u32, usize> = HashMap::new();
    let mut counts: Vec<(u32, usize)> = Vec::new();
    for &id in ids {
        match index.get(&id) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(id, counts.len());
                counts.push((id, 1));
            }
        }
    }

    let mut best: Option<(u32, usize)> = None;
    for (id, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((id, count));
        }
    }
    best.map(|(id, _)| id)
}

/// Group forecast samples into at most [`MAX_DAYS`] daily summaries.
///
/// `offset_seconds` is the forecast location's UTC offset and applies to
/// every sample. Bucket membership does not depend on input order; output
/// order follows the first sample seen for each day.
pub fn aggregate_daily(samples: &[ForecastSample], offset_seconds: i64) -> Vec<DailySummary> {
    let mut positions: HashMap<NaiveDate, usize> = HashMap::new();
    let mut buckets: Vec<DailyBucket> = Vec::new();

    for sample in samples {
        let Some(date) = local_date(sample.timestamp_utc, offset_seconds) else {
            tracing::debug!(
                "Skipping forecast sample with out-of-range timestamp {}",
                sample.timestamp_utc
            );
            continue;
        };

        let pos = *positions.entry(date).or_insert_with(|| {
            buckets.push(DailyBucket::new(date));
            buckets.len() - 1
        });
        buckets[pos].add(sample);
    }

    buckets
        .iter()
        .take(MAX_DAYS)
        .map(DailyBucket::summarize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const IST: i64 = 19800;

    fn ts(day: u32, hour: u32) -> i64 {
        Utc.with_ymd_and_hms(2025, 7, day, hour, 0, 0)
            .unwrap()
            .timestamp()
    }

    fn sample(timestamp: i64, temp: f64) -> ForecastSample {
        ForecastSample {
            temperature: Some(temp),
            condition_id: Some(800),
            ..ForecastSample::new(timestamp)
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, day).unwrap()
    }

    #[test]
    fn empty_input_yields_no_days() {
        assert!(aggregate_daily(&[], IST).is_empty());
        assert!(aggregate_daily(&[], 0).is_empty());
    }

    #[test]
    fn precipitation_and_wind() {
        let samples = vec![
            ForecastSample {
                rain_mm: 1.2,
                wind_speed: 2.0,
                ..sample(ts(14, 3), 20.0)
            },
            ForecastSample {
                rain_mm: 0.3,
                wind_speed: 5.0,
                ..sample(ts(14, 6), 21.0)
            },
        ];
        let days = aggregate_daily(&samples, 0);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].precipitation_mm, 2);
        assert_eq!(days[0].wind_kmh, 18);
    }

    #[test]
    fn rain_and_snow_are_combined() {
        let samples = vec![
            ForecastSample {
                snow_mm: 0.8,
                ..sample(ts(14, 3), -1.0)
            },
            ForecastSample {
                rain_mm: 0.9,
                ..sample(ts(14, 6), 1.0)
            },
        ];
        let days = aggregate_daily(&samples, 0);
        assert_eq!(days[0].precipitation_mm, 2);
    }

    #[test]
    fn temperature_range() {
        let samples = vec![
            sample(ts(14, 3), 18.4),
            sample(ts(14, 6), 22.9),
            sample(ts(14, 9), 20.1),
        ];
        let days = aggregate_daily(&samples, 0);
        assert_eq!(days[0].temp_min, Some(18));
        assert_eq!(days[0].temp_max, Some(23));
        assert_eq!(days[0].temp_range_label(), "18° / 23°");
    }

    #[test]
    fn missing_temperatures_are_ignored() {
        let samples = vec![
            ForecastSample {
                temperature: None,
                ..sample(ts(14, 3), 0.0)
            },
            sample(ts(14, 6), -4.6),
        ];
        let days = aggregate_daily(&samples, 0);
        assert_eq!(days[0].temp_min, Some(-5));
        assert_eq!(days[0].temp_max, Some(-5));
    }

    #[test]
    fn all_missing_temperatures_keep_the_day() {
        let samples = vec![ForecastSample::new(ts(14, 3)), ForecastSample::new(ts(14, 6))];
        let days = aggregate_daily(&samples, 0);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].temp_min, None);
        assert_eq!(days[0].temp_max, None);
        assert_eq!(days[0].temp_range_label(), "--° / --°");
    }

    #[test]
    fn majority_condition() {
        assert_eq!(dominant_condition(&[500, 500, 200]), Some(500));
        assert_eq!(dominant_condition(&[200, 500, 500]), Some(500));
        assert_eq!(dominant_condition(&[500, 200]), Some(500));
        assert_eq!(dominant_condition(&[200, 500]), Some(200));
        assert_eq!(dominant_condition(&[801, 500, 500, 801]), Some(801));
        assert_eq!(dominant_condition(&[]), None);
    }

    #[test]
    fn majority_condition_drives_icon() {
        let ids = [500, 500, 200];
        let samples: Vec<_> = ids
            .iter()
            .enumerate()
            .map(|(i, &id)| ForecastSample {
                condition_id: Some(id),
                ..sample(ts(14, 3 * i as u32), 25.0)
            })
            .collect();
        let days = aggregate_daily(&samples, 0);
        assert_eq!(days[0].condition_id, 500);
        assert_eq!(days[0].icon, "🌧️");
        assert_eq!(days[0].condition_text, "Rain");
    }

    #[test]
    fn no_condition_ids_fall_back() {
        let samples = vec![ForecastSample::new(ts(14, 3))];
        let days = aggregate_daily(&samples, 0);
        assert_eq!(days[0].condition_id, FALLBACK_CONDITION_ID);
        assert_eq!(days[0].condition_text, "Clouds");
    }

    #[test]
    fn first_label_wins() {
        let samples = vec![
            ForecastSample {
                condition_label: Some(String::new()),
                ..sample(ts(14, 0), 20.0)
            },
            ForecastSample {
                condition_id: Some(500),
                condition_label: Some("Rain".into()),
                ..sample(ts(14, 3), 20.0)
            },
            ForecastSample {
                condition_id: Some(500),
                condition_label: Some("Clouds".into()),
                ..sample(ts(14, 6), 20.0)
            },
        ];
        let days = aggregate_daily(&samples, 0);
        assert_eq!(days[0].condition_text, "Rain");
    }

    #[test]
    fn label_overrides_theme_text() {
        let samples = vec![ForecastSample {
            condition_id: Some(800),
            condition_label: Some("Clear".into()),
            ..sample(ts(14, 3), 20.0)
        }];
        let days = aggregate_daily(&samples, 0);
        assert_eq!(days[0].condition_text, "Clear");
        assert_eq!(days[0].icon, "☀️");
    }

    #[test]
    fn days_follow_location_offset() {
        // 18:00 and 21:00 UTC on the 14th are the 14th and 15th in IST
        let samples = vec![sample(ts(14, 18), 20.0), sample(ts(14, 21), 18.0)];

        let utc_days = aggregate_daily(&samples, 0);
        assert_eq!(utc_days.len(), 1);
        assert_eq!(utc_days[0].date, date(14));

        let ist_days = aggregate_daily(&samples, IST);
        assert_eq!(ist_days.len(), 2);
        assert_eq!(ist_days[0].date, date(14));
        assert_eq!(ist_days[1].date, date(15));
        assert_eq!(ist_days[1].day_label, "Tue 15 Jul");
    }

    #[test]
    fn one_summary_per_day_capped_at_five() {
        let samples: Vec<_> = (10..17)
            .flat_map(|day| (0..8).map(move |slot| sample(ts(day, slot * 3), 20.0)))
            .collect();
        let days = aggregate_daily(&samples, 0);
        assert_eq!(days.len(), MAX_DAYS);
        let dates: Vec<_> = days.iter().map(|d| d.date).collect();
        assert_eq!(dates, (10..15).map(date).collect::<Vec<_>>());
    }

    #[test]
    fn fewer_than_five_days_are_all_returned() {
        let samples = vec![sample(ts(14, 0), 20.0), sample(ts(15, 0), 21.0)];
        assert_eq!(aggregate_daily(&samples, 0).len(), 2);
    }

    #[test]
    fn output_is_idempotent() {
        let samples: Vec<_> = (0..40)
            .map(|i| ForecastSample {
                rain_mm: (i % 3) as f64 * 0.4,
                wind_speed: (i % 7) as f64,
                condition_id: Some(if i % 2 == 0 { 500 } else { 803 }),
                ..sample(ts(14, 0) + i * 10_800, 15.0 + (i % 5) as f64)
            })
            .collect();
        assert_eq!(aggregate_daily(&samples, IST), aggregate_daily(&samples, IST));
    }

    #[test]
    fn shuffled_input_keeps_per_day_aggregates() {
        let samples: Vec<_> = (0..16)
            .map(|i| ForecastSample {
                rain_mm: 0.25 * i as f64,
                wind_speed: (16 - i) as f64 * 0.5,
                condition_id: Some(if i % 3 == 0 { 600 } else { 804 }),
                ..sample(ts(14, 0) + i * 10_800, i as f64)
            })
            .collect();
        let mut shuffled = samples.clone();
        shuffled.reverse();
        shuffled.swap(0, 7);

        let by_date = |days: Vec<DailySummary>| -> HashMap<NaiveDate, DailySummary> {
            days.into_iter().map(|d| (d.date, d)).collect()
        };
        let ordered = by_date(aggregate_daily(&samples, 0));
        let reordered = by_date(aggregate_daily(&shuffled, 0));

        assert_eq!(ordered.len(), reordered.len());
        for (date, day) in &ordered {
            let other = &reordered[date];
            assert_eq!(day.temp_min, other.temp_min);
            assert_eq!(day.temp_max, other.temp_max);
            assert_eq!(day.precipitation_mm, other.precipitation_mm);
            assert_eq!(day.wind_kmh, other.wind_kmh);
        }
    }

    #[test]
    fn output_order_follows_first_seen_day() {
        let samples = vec![
            sample(ts(16, 0), 20.0),
            sample(ts(14, 0), 20.0),
            sample(ts(16, 3), 22.0),
        ];
        let days = aggregate_daily(&samples, 0);
        assert_eq!(days[0].date, date(16));
        assert_eq!(days[1].date, date(14));
        assert_eq!(days[0].temp_max, Some(22));
    }
}
