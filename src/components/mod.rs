pub mod schedule;
pub mod teams;
