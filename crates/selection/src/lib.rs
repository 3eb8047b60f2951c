pub mod controller;

pub use controller::*;
pub use hit_test::*;
