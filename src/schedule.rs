use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Category tag for a calendar event. Unknown strings land on `Other`
/// rather than failing deserialization, so stale clients keep working.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTag {
    Assignment,
    Quiz,
    Exam,
    Deadline,
    Meeting,
    Class,
    #[default]
    #[serde(other)]
    Other,
}

impl EventTag {
    pub fn color(&self) -> &'static str {
        match self {
            EventTag::Assignment => "#2196F3",
            EventTag::Quiz => "#9C27B0",
            EventTag::Exam => "#F44336",
            EventTag::Deadline => "#FF5722",
            EventTag::Meeting => "#009688",
            EventTag::Class => "#3F51B5",
            EventTag::Other => "#607D8B",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub date: NaiveDate,
    /// Free-text display string ("10:00 AM", "All Day"). Never parsed and
    /// never used for ordering.
    pub time: String,
    pub title: String,
    pub tag: EventTag,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventIndicator {
    pub id: String,
    pub tag: EventTag,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub day: u32,
    pub is_today: bool,
    /// At most two indicators per cell; the rest collapse into `overflow`.
    pub indicators: Vec<EventIndicator>,
    pub overflow: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Trailing day numbers of the previous month, one per filler cell in
    /// front of day 1. The grid is front-padded only; no trailing filler.
    pub leading: Vec<u32>,
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket {
    pub label: String,
    pub events: Vec<CalendarEvent>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AgendaRow {
    Header { label: String },
    Event { event: CalendarEvent },
}

const MAX_INDICATORS: usize = 2;

/// Events falling on exactly `date`, in their original relative order.
pub fn events_on_date<'a>(events: &'a [CalendarEvent], date: NaiveDate) -> Vec<&'a CalendarEvent> {
    events.iter().filter(|e| e.date == date).collect()
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next_first.and_then(|d| d.pred_opt()).map(|d| d.day())
}

/// One month of calendar cells for grid rendering. `month` is 1-based.
/// Returns `None` when (year, month) is not a representable date.
pub fn build_month_grid(
    year: i32,
    month: u32,
    events: &[CalendarEvent],
    today: NaiveDate,
) -> Option<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let lead = first.weekday().num_days_from_sunday();
    let leading: Vec<u32> = match first.pred_opt() {
        // Every month has at least 28 days, always enough to cover `lead`.
        Some(prev_last) => (0..lead).map(|i| prev_last.day() - lead + 1 + i).collect(),
        None => Vec::new(),
    };

    let mut days = Vec::new();
    for day in 1..=days_in_month(year, month)? {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let on_day = events_on_date(events, date);
        days.push(DayCell {
            day,
            is_today: date == today,
            indicators: on_day
                .iter()
                .take(MAX_INDICATORS)
                .map(|e| EventIndicator {
                    id: e.id.clone(),
                    tag: e.tag,
                })
                .collect(),
            overflow: on_day.len().saturating_sub(MAX_INDICATORS),
        });
    }

    Some(MonthGrid {
        year,
        month,
        leading,
        days,
    })
}

/// Display label for a calendar day relative to `today`. Same-day and
/// day-before checks are exact (year, month, day) equality, not elapsed
/// time.
pub fn format_day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if Some(date) == today.pred_opt() {
        "Yesterday".to_string()
    } else {
        date.format("%b %-d").to_string()
    }
}

/// Stable-sorts a copy of `events` ascending by date (ties keep insertion
/// order), then groups by day label. Grouping keys purely on label string
/// equality; each event appends to the first bucket with a matching label.
pub fn group_by_day_label(events: &[CalendarEvent], today: NaiveDate) -> Vec<DayBucket> {
    let mut sorted: Vec<&CalendarEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.date);

    let mut buckets: Vec<DayBucket> = Vec::new();
    for event in sorted {
        let label = format_day_label(event.date, today);
        match buckets.iter_mut().find(|b| b.label == label) {
            Some(bucket) => bucket.events.push(event.clone()),
            None => buckets.push(DayBucket {
                label,
                events: vec![event.clone()],
            }),
        }
    }
    buckets
}

/// Render-ready agenda: a header marker in front of each bucket's events.
pub fn flatten_agenda(buckets: &[DayBucket]) -> Vec<AgendaRow> {
    let mut rows = Vec::new();
    for bucket in buckets {
        rows.push(AgendaRow::Header {
            label: bucket.label.clone(),
        });
        for event in &bucket.events {
            rows.push(AgendaRow::Event {
                event: event.clone(),
            });
        }
    }
    rows
}
