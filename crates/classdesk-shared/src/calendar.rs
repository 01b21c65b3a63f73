//! Month grid and per-day task buckets.

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::dates::day_key;
use crate::models::Task;

/// Markers shown inside a day cell before the `+N` counter.
pub const MAX_MARKERS: usize = 3;

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// A displayed month (`month` is 1-12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthCursor {
    pub year: i32,
    pub month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn days_in_month(&self) -> u32 {
        let first = self.first_day();
        first
            .checked_add_months(Months::new(1))
            .map(|next| (next - first).num_days() as u32)
            .unwrap_or(31)
    }

    pub fn previous(&self) -> Self {
        Self::containing(
            self.first_day()
                .checked_sub_months(Months::new(1))
                .unwrap_or_else(|| self.first_day()),
        )
    }

    pub fn next(&self) -> Self {
        Self::containing(
            self.first_day()
                .checked_add_months(Months::new(1))
                .unwrap_or_else(|| self.first_day()),
        )
    }

    pub fn title(&self) -> String {
        let name = MONTH_NAMES
            .get(self.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("");
        format!("{} {}", name, self.year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub is_today: bool,
}

impl DayCell {
    pub fn key(&self) -> String {
        day_key(self.date)
    }
}

/// Every cell of a Sunday-first month view, padded with adjacent-month days
/// to whole weeks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub cursor: MonthCursor,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn build(cursor: MonthCursor, today: NaiveDate) -> Self {
        let first = cursor.first_day();
        let leading = first.weekday().num_days_from_sunday() as i64;
        let days = cursor.days_in_month() as i64;
        let total = ((days + leading + 6) / 7) * 7;
        let start = first - Duration::days(leading);

        let cells = (0..total)
            .map(|offset| {
                let date = start + Duration::days(offset);
                DayCell {
                    date,
                    in_current_month: date.month() == cursor.month && date.year() == cursor.year,
                    is_today: date == today,
                }
            })
            .collect();

        Self { cursor, cells }
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }
}

/// Whether a marker stands for the day a task was created or the day it is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Created,
    Due,
}

impl MarkerKind {
    pub fn as_str(&self) -> &str {
        match self {
            MarkerKind::Created => "created",
            MarkerKind::Due => "due",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker<'a> {
    pub task: &'a Task,
    pub kind: MarkerKind,
}

/// Tasks touching one calendar day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayTasks<'a> {
    pub created: Vec<&'a Task>,
    pub due: Vec<&'a Task>,
}

impl<'a> DayTasks<'a> {
    /// Bucket `tasks` for `date` by string prefix on the normalized dates.
    pub fn collect(date: NaiveDate, tasks: &'a [Task]) -> Self {
        let key = day_key(date);
        let created = tasks
            .iter()
            .filter(|task| {
                task.created_date
                    .as_deref()
                    .is_some_and(|created| created.starts_with(&key))
            })
            .collect();
        let due = tasks
            .iter()
            .filter(|task| {
                task.due_date
                    .as_deref()
                    .is_some_and(|due| due.starts_with(&key))
            })
            .collect();
        Self { created, due }
    }

    pub fn total(&self) -> usize {
        self.created.len() + self.due.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Up to [`MAX_MARKERS`] markers, creations first.
    pub fn markers(&self) -> Vec<Marker<'a>> {
        self.created
            .iter()
            .map(|task| Marker {
                task,
                kind: MarkerKind::Created,
            })
            .chain(self.due.iter().map(|task| Marker {
                task,
                kind: MarkerKind::Due,
            }))
            .take(MAX_MARKERS)
            .collect()
    }

    /// Count shown as `+N` after the markers.
    pub fn overflow(&self) -> usize {
        self.total().saturating_sub(MAX_MARKERS)
    }
}
