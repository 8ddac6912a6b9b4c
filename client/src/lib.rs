pub mod consts;
pub mod program;
mod utils;

pub use utils::*;
