pub mod day_card;
pub mod gauge;
pub mod input;

pub use day_card::DayCard;
pub use gauge::{cloud_gauge, humidity_gauge, temperature_gauge};
pub use input::InputWidget;
