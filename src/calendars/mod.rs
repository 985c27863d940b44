mod calendar;

pub use calendar::{CalendarListParams, Calendars};

pub(crate) use calendar::{find_request, list_request};
