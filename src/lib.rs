pub mod cli;
pub mod error;
pub mod math;
pub mod metapost;
pub mod scene;
pub mod style;
pub mod trajectory;
pub mod view;

pub use error::{Result, StokesmapError};
