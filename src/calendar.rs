//! Journal Calendar
//!
//! Month grid and "has entry" markers for the colorist log.

use std::collections::BTreeSet;

use chrono::{Datelike, Months, NaiveDate};

/// One calendar row, Monday first; `None` pads days outside the month
pub type Week = [Option<NaiveDate>; 7];

#[derive(Debug, Clone, PartialEq)]
pub struct JournalCalendar {
    selected: NaiveDate,
    /// First day of the month on screen
    view_start: NaiveDate,
    dates_with_entries: BTreeSet<String>,
}

impl JournalCalendar {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            selected: today,
            view_start: first_of_month(today),
            dates_with_entries: BTreeSet::new(),
        }
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    pub fn selected_iso(&self) -> String {
        iso(self.selected)
    }

    /// (year, month 1..=12)
    pub fn view_month(&self) -> (i32, u32) {
        (self.view_start.year(), self.view_start.month())
    }

    pub fn month_title(&self) -> String {
        self.view_start.format("%B %Y").to_string()
    }

    pub fn dates_with_entries(&self) -> &BTreeSet<String> {
        &self.dates_with_entries
    }

    /// Select a day and bring its month into view
    pub fn select(&mut self, date: NaiveDate) {
        self.selected = date;
        self.view_start = first_of_month(date);
    }

    /// Replace the entry markers. Timestamps are cut to their date part.
    pub fn set_dates<I, S>(&mut self, dates: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.dates_with_entries = dates
            .into_iter()
            .filter_map(|d| normalize_iso(d.as_ref()))
            .collect();
    }

    pub fn mark_date(&mut self, date: NaiveDate) {
        self.dates_with_entries.insert(iso(date));
    }

    pub fn unmark_date(&mut self, date: NaiveDate) {
        self.dates_with_entries.remove(&iso(date));
    }

    pub fn has_entry(&self, date: NaiveDate) -> bool {
        self.dates_with_entries.contains(&iso(date))
    }

    pub fn next_month(&mut self) {
        if let Some(next) = self.view_start.checked_add_months(Months::new(1)) {
            self.view_start = next;
        }
    }

    pub fn prev_month(&mut self) {
        if let Some(prev) = self.view_start.checked_sub_months(Months::new(1)) {
            self.view_start = prev;
        }
    }

    /// Weeks of the month on screen
    pub fn month_grid(&self) -> Vec<Week> {
        let first = self.view_start;
        let lead = first.weekday().num_days_from_monday() as usize;
        let days = days_in_month(first);

        let mut cells: Vec<Option<NaiveDate>> = vec![None; lead];
        cells.extend((0..days).filter_map(|offset| first.checked_add_days(chrono::Days::new(offset as u64))).map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }

        cells
            .chunks(7)
            .map(|chunk| {
                let mut week: Week = [None; 7];
                week.copy_from_slice(chunk);
                week
            })
            .collect()
    }
}

/// `YYYY-MM-DD`
pub fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_iso(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Accepts `2024-05-01` or `2024-05-01T10:00:00Z`
fn normalize_iso(s: &str) -> Option<String> {
    let head = s.trim().get(..10)?;
    parse_iso(head).map(iso)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn days_in_month(first: NaiveDate) -> u32 {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_grid_pads_to_monday() {
        // 1 May 2024 is a Wednesday
        let cal = JournalCalendar::new(date(2024, 5, 15));
        let grid = cal.month_grid();
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0][0], None);
        assert_eq!(grid[0][1], None);
        assert_eq!(grid[0][2], Some(date(2024, 5, 1)));
        assert_eq!(grid[4][4], Some(date(2024, 5, 31)));
        assert_eq!(grid[4][5], None);
    }

    #[test]
    fn test_grid_exact_weeks() {
        // February 2021 starts on a Monday and has 28 days
        let cal = JournalCalendar::new(date(2021, 2, 1));
        let grid = cal.month_grid();
        assert_eq!(grid.len(), 4);
        assert!(grid.iter().flatten().all(|d| d.is_some()));
    }

    #[test]
    fn test_leap_february() {
        let cal = JournalCalendar::new(date(2024, 2, 10));
        let days = cal.month_grid().iter().flatten().filter(|d| d.is_some()).count();
        assert_eq!(days, 29);
    }

    #[test]
    fn test_has_entry() {
        let mut cal = JournalCalendar::new(date(2024, 5, 15));
        cal.set_dates(vec!["2024-05-01", "2024-05-20T09:30:00Z", "garbage"]);
        assert!(cal.has_entry(date(2024, 5, 1)));
        assert!(cal.has_entry(date(2024, 5, 20)));
        assert!(!cal.has_entry(date(2024, 5, 2)));
        assert_eq!(cal.dates_with_entries().len(), 2);
    }

    #[test]
    fn test_month_navigation_keeps_dates() {
        let mut cal = JournalCalendar::new(date(2024, 1, 31));
        cal.set_dates(["2024-01-05"]);
        let before = cal.dates_with_entries().clone();

        cal.prev_month();
        assert_eq!(cal.view_month(), (2023, 12));
        cal.next_month();
        cal.next_month();
        assert_eq!(cal.view_month(), (2024, 2));
        assert_eq!(cal.dates_with_entries(), &before);
        assert_eq!(cal.selected(), date(2024, 1, 31));
    }

    #[test]
    fn test_select_moves_view() {
        let mut cal = JournalCalendar::new(date(2024, 1, 10));
        cal.select(date(2024, 3, 3));
        assert_eq!(cal.view_month(), (2024, 3));
        assert_eq!(cal.selected_iso(), "2024-03-03");
        assert_eq!(cal.month_title(), "March 2024");
    }

    #[test]
    fn test_mark_and_unmark() {
        let mut cal = JournalCalendar::new(date(2024, 1, 10));
        cal.mark_date(date(2024, 1, 10));
        assert!(cal.has_entry(date(2024, 1, 10)));
        cal.unmark_date(date(2024, 1, 10));
        assert!(!cal.has_entry(date(2024, 1, 10)));
    }
}
