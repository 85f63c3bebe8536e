pub mod enums;
pub mod interpretation;
pub mod panel;

pub use enums::*;
pub use interpretation::*;
pub use panel::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid value '{value}' for {field}")]
    InvalidEnum { field: String, value: String },
}
