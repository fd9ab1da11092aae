pub mod model;

pub use model::{load_input, Input};
