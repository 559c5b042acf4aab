pub mod labels;
pub mod types;
pub mod view;

pub use labels::{ClassLabel, Plant};
pub use types::*;
pub use view::*;
