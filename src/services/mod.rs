pub mod die_lines;
pub mod nesting;
pub mod registry;
pub mod sheets;
