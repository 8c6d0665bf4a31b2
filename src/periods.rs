use crate::models::Period;
use crate::time::TimeOfDay;

const fn period(number: u8, start: (u16, u16), end: (u16, u16)) -> Period {
    Period {
        number,
        start: TimeOfDay::hm(start.0, start.1),
        end: TimeOfDay::hm(end.0, end.1),
    }
}

/// The standard teaching day: four 45-minute periods from 08:00 and four
/// from 14:00, with long breaks after the 2nd and 6th.
pub const STANDARD_PERIODS: [Period; 8] = [
    period(1, (8, 0), (8, 45)),
    period(2, (8, 55), (9, 40)),
    period(3, (10, 10), (10, 55)),
    period(4, (11, 5), (11, 50)),
    period(5, (14, 0), (14, 45)),
    period(6, (14, 55), (15, 40)),
    period(7, (16, 10), (16, 55)),
    period(8, (17, 5), (17, 50)),
];

/// 1-based number of the standard period that starts exactly at `start`.
pub fn period_by_start(start: TimeOfDay) -> Option<u8> {
    STANDARD_PERIODS
        .iter()
        .find(|p| p.start == start)
        .map(|p| p.number)
}
