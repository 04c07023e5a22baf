//! Application state module

mod controller;
mod forms;
mod options;
mod submission;
mod validation;

pub use controller::*;
pub use forms::*;
pub use options::*;
pub use submission::*;
pub use validation::*;
