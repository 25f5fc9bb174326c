pub mod active_drinks;
pub mod drink_event;
pub mod drink_type;
