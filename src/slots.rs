//! The fixed half-hour schedule grid: 7:00 AM through 11:30 PM.

/// First hour of the grid, 24-hour clock.
pub const DAY_START_HOUR: u32 = 7;
/// Last hour of the grid (inclusive); its :30 slot is the final one.
pub const DAY_END_HOUR: u32 = 23;
/// Two slots per hour across the 7..=23 range.
pub const SLOT_COUNT: usize = ((DAY_END_HOUR - DAY_START_HOUR + 1) * 2) as usize;

/// One half-hour cell of the schedule grid, identified by its index
/// (0 = 7:00 AM, 1 = 7:30 AM, ..., 33 = 11:30 PM). Labels are derived,
/// never stored, so display strings can't drift from the key set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(u8);

impl Slot {
    pub fn new(index: usize) -> Option<Slot> {
        if index < SLOT_COUNT {
            Some(Slot(index as u8))
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn hour(self) -> u32 {
        DAY_START_HOUR + self.0 as u32 / 2
    }

    pub fn minute(self) -> u32 {
        if self.0 % 2 == 0 {
            0
        } else {
            30
        }
    }

    pub fn label(self) -> String {
        format_time(self.hour(), self.minute())
    }

    /// All 34 slots in chronological order.
    pub fn all() -> impl Iterator<Item = Slot> {
        (0..SLOT_COUNT as u8).map(Slot)
    }
}

/// 12-hour clock rendering with zero-padded minutes: `(7, 0)` is
/// `"7:00 AM"`, `(23, 30)` is `"11:30 PM"`. Hours 0 and 12 both display
/// as 12, split across the AM/PM boundary.
pub fn format_time(hour: u32, minute: u32) -> String {
    let (display_hour, suffix) = if hour == 0 {
        (12, "AM")
    } else if hour == 12 {
        (12, "PM")
    } else if hour > 12 {
        (hour - 12, "PM")
    } else {
        (hour, "AM")
    };
    format!("{}:{:02} {}", display_hour, minute, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_covers_clock_boundaries() {
        assert_eq!(format_time(0, 0), "12:00 AM");
        assert_eq!(format_time(7, 0), "7:00 AM");
        assert_eq!(format_time(11, 30), "11:30 AM");
        assert_eq!(format_time(12, 0), "12:00 PM");
        assert_eq!(format_time(13, 30), "1:30 PM");
        assert_eq!(format_time(23, 30), "11:30 PM");
    }

    #[test]
    fn grid_has_34_chronological_labels() {
        let slots: Vec<Slot> = Slot::all().collect();
        assert_eq!(slots.len(), 34);
        assert_eq!(slots.first().map(|s| s.label()), Some("7:00 AM".into()));
        assert_eq!(slots.last().map(|s| s.label()), Some("11:30 PM".into()));

        for pair in slots.windows(2) {
            let earlier = (pair[0].hour(), pair[0].minute());
            let later = (pair[1].hour(), pair[1].minute());
            assert!(earlier < later, "{:?} not before {:?}", pair[0], pair[1]);
        }

        let mut labels: Vec<String> = slots.iter().map(|s| s.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 34);
    }

    #[test]
    fn slot_index_round_trips() {
        assert_eq!(Slot::new(0).map(|s| s.index()), Some(0));
        assert_eq!(Slot::new(33).map(|s| (s.hour(), s.minute())), Some((23, 30)));
        assert_eq!(Slot::new(34), None);
    }
}
