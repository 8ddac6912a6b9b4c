pub mod envelope;
pub mod submit;
pub mod transfer;

pub use envelope::*;
pub use submit::*;
pub use transfer::*;
