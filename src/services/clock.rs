//! Wall clock shown next to the countdown

use std::{fmt::Display, time::Duration};

use chrono::{DateTime, Local, TimeZone};

use crate::display::{ElementId, PresentationPort};

/// Wall clock refresh period
pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);

/// Time-of-day and long date text, e.g. `14:05:09` and `Monday, October 19, 2026`
pub fn clock_text<Tz>(now: &DateTime<Tz>) -> (String, String)
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    (
        now.format("%H:%M:%S").to_string(),
        now.format("%A, %B %-d, %Y").to_string(),
    )
}

/// Write the current local time and date to the clock elements
pub fn render_clock<P: PresentationPort>(port: &mut P) {
    render_clock_at(port, &Local::now());
}

/// Write the given time and date to the clock elements
pub fn render_clock_at<P, Tz>(port: &mut P, now: &DateTime<Tz>)
where
    P: PresentationPort,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let (time, date) = clock_text(now);
    port.set_text(ElementId::Clock, &time);
    port.set_text(ElementId::Date, &date);
}
