pub mod palette;
pub mod style;

pub use palette::*;
pub use style::*;
