//! Regional holiday calendars and annual expansion of profile tables

mod expand;
mod holidays;
mod region;

pub use expand::{classify, expand_year, MissingProfilePolicy};
pub use holidays::{easter_sunday, HolidayCalendar};
pub use region::Region;
