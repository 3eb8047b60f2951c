pub mod attr;
pub mod feature;

pub use attr::*;
pub use feature::*;
