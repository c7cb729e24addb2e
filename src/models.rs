pub mod screen;
pub mod task;
