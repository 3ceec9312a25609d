use crate::slots::Slot;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

pub const PRIORITY_COUNT: usize = 3;

/// One entry in the brain-dump scratch list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpItem {
    pub text: String,
    pub completed: bool,
}

impl DumpItem {
    pub fn new(text: impl Into<String>) -> Self {
        DumpItem {
            text: text.into(),
            completed: false,
        }
    }
}

/// Everything the planner tracks for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DayRecord {
    pub priorities: [String; PRIORITY_COUNT],
    pub brain_dump: Vec<DumpItem>,
    schedule: BTreeMap<Slot, String>,
}

impl DayRecord {
    /// Sets one of the three priority lines. Out-of-range indices are
    /// ignored so the record always keeps exactly three slots.
    pub fn set_priority(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.priorities.get_mut(index) {
            Some(slot) => {
                *slot = text.into();
                true
            }
            None => false,
        }
    }

    pub fn add_dump_item(&mut self) {
        self.brain_dump.push(DumpItem::new(""));
    }

    pub fn set_dump_text(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.brain_dump.get_mut(index) {
            Some(item) => {
                item.text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn toggle_dump(&mut self, index: usize) -> bool {
        match self.brain_dump.get_mut(index) {
            Some(item) => {
                item.completed = !item.completed;
                true
            }
            None => false,
        }
    }

    /// Writes a schedule cell. An empty string still records an explicit
    /// entry; clearing a slot is not the same as never touching it.
    pub fn set_slot(&mut self, slot: Slot, text: impl Into<String>) {
        self.schedule.insert(slot, text.into());
    }

    pub fn slot_text(&self, slot: Slot) -> &str {
        self.schedule.get(&slot).map(String::as_str).unwrap_or("")
    }

    pub fn slot_is_set(&self, slot: Slot) -> bool {
        self.schedule.contains_key(&slot)
    }

    pub fn completed_dump_count(&self) -> usize {
        self.brain_dump.iter().filter(|i| i.completed).count()
    }
}

/// The date-keyed store behind the planner. Records are created lazily on
/// first access and never removed; the store lives for one process run.
#[derive(Debug, Default)]
pub struct Planner {
    days: HashMap<NaiveDate, DayRecord>,
}

impl Planner {
    pub fn new() -> Self {
        Planner::default()
    }

    /// The record for `date`, inserting the empty default the first time
    /// the date is touched.
    pub fn day(&mut self, date: NaiveDate) -> &mut DayRecord {
        self.days.entry(date).or_default()
    }

    /// Read-only lookup that never creates a record.
    pub fn get(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.days.get(&date)
    }

    pub fn is_touched(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    /// Moves every unfinished brain-dump item from `date` to the next
    /// calendar day, appending after anything already planned there and
    /// keeping both sub-sequences in their original order. Returns the
    /// number of items moved; zero means nothing changed and the next
    /// day's record was not created.
    pub fn carry_over(&mut self, date: NaiveDate) -> usize {
        let has_incomplete = self
            .days
            .get(&date)
            .map(|rec| rec.brain_dump.iter().any(|item| !item.completed))
            .unwrap_or(false);
        if !has_incomplete {
            return 0;
        }
        let Some(next) = date.succ_opt() else {
            return 0;
        };

        let drained = std::mem::take(&mut self.day(date).brain_dump);
        let (incomplete, completed): (Vec<DumpItem>, Vec<DumpItem>) =
            drained.into_iter().partition(|item| !item.completed);
        let moved = incomplete.len();

        self.day(date).brain_dump = completed;
        self.day(next).brain_dump.extend(incomplete);
        moved
    }
}

/// ISO `YYYY-MM-DD`, the one date serialization the planner speaks.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).expect("test date")
    }

    fn item(text: &str, completed: bool) -> DumpItem {
        DumpItem {
            text: text.into(),
            completed,
        }
    }

    #[test]
    fn fresh_date_gets_the_empty_default_record() {
        let mut planner = Planner::new();
        let d = date("2024-03-01");
        assert!(!planner.is_touched(d));
        assert!(planner.get(d).is_none());

        let record = planner.day(d).clone();
        assert_eq!(record.priorities, ["", "", ""]);
        assert!(record.brain_dump.is_empty());
        for slot in Slot::all() {
            assert!(!record.slot_is_set(slot));
        }
        assert!(planner.is_touched(d));
    }

    #[test]
    fn priority_edits_out_of_range_are_ignored() {
        let mut planner = Planner::new();
        let d = date("2024-03-01");
        assert!(planner.day(d).set_priority(0, "write report"));
        assert!(!planner.day(d).set_priority(3, "should vanish"));
        assert!(!planner.day(d).set_priority(17, "should vanish"));
        assert_eq!(planner.day(d).priorities, ["write report", "", ""]);
    }

    #[test]
    fn dump_edits_out_of_range_are_ignored() {
        let mut record = DayRecord::default();
        record.add_dump_item();
        assert!(record.set_dump_text(0, "call bank"));
        assert!(!record.set_dump_text(1, "nope"));
        assert!(record.toggle_dump(0));
        assert!(!record.toggle_dump(5));
        assert_eq!(record.brain_dump, vec![item("call bank", true)]);
    }

    #[test]
    fn carry_over_moves_incomplete_items_in_order() {
        let mut planner = Planner::new();
        let today = date("2024-03-01");
        let tomorrow = date("2024-03-02");

        planner.day(today).brain_dump =
            vec![item("a", false), item("b", true), item("c", false)];
        planner.day(tomorrow).brain_dump = vec![item("existing", false)];

        assert_eq!(planner.carry_over(today), 2);
        assert_eq!(planner.day(today).brain_dump, vec![item("b", true)]);
        assert_eq!(
            planner.day(tomorrow).brain_dump,
            vec![item("existing", false), item("a", false), item("c", false)]
        );

        // Later edits on one day must not bleed into the other.
        planner.day(tomorrow).set_dump_text(1, "a edited");
        assert_eq!(planner.day(today).brain_dump, vec![item("b", true)]);
    }

    #[test]
    fn carry_over_with_nothing_incomplete_is_a_no_op() {
        let mut planner = Planner::new();
        let today = date("2024-03-01");
        let tomorrow = date("2024-03-02");

        planner.day(today).brain_dump = vec![item("done", true)];
        assert_eq!(planner.carry_over(today), 0);
        assert_eq!(planner.day(today).brain_dump, vec![item("done", true)]);
        assert!(!planner.is_touched(tomorrow));

        // An untouched date carries nothing either.
        assert_eq!(planner.carry_over(date("2030-01-01")), 0);
        assert!(!planner.is_touched(date("2030-01-01")));
        assert!(!planner.is_touched(date("2030-01-02")));
    }

    #[test]
    fn empty_slot_write_records_an_explicit_entry() {
        let mut record = DayRecord::default();
        let slot = Slot::new(0).unwrap();
        assert!(!record.slot_is_set(slot));
        assert_eq!(record.slot_text(slot), "");

        record.set_slot(slot, "");
        assert!(record.slot_is_set(slot));
        assert_eq!(record.slot_text(slot), "");

        record.set_slot(slot, "standup");
        assert_eq!(record.slot_text(slot), "standup");
    }

    #[test]
    fn iso_date_boundary_round_trips() {
        let d = date("2024-02-29");
        assert_eq!(format_date(d), "2024-02-29");
        assert_eq!(parse_date(&format_date(d)), Some(d));
        assert_eq!(parse_date("  2024-02-29 "), Some(d));
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date(""), None);
    }
}
