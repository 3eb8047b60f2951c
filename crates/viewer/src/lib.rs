pub mod metadata;
pub mod session;

pub use metadata::*;
pub use session::*;
