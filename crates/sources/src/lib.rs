pub mod adapter;
pub mod extent;
pub mod geojson;
pub mod kind;
pub mod lifecycle;

pub use adapter::*;
pub use extent::*;
pub use geojson::*;
pub use kind::*;
pub use lifecycle::*;
