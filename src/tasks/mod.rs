pub mod day_rollover;
