pub mod progress;
pub mod styling;
