pub mod job;
pub mod nesting;
pub mod sheet;
