pub mod delete;
pub mod events;
pub mod generate;
pub mod what_color;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

/// Today's date where the classes happen.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}
