pub mod outcome;
pub mod overview;

pub use outcome::print_submit_success;
pub use overview::{print_listing_detail, print_listing_table};
