mod mint;

pub use mint::*;
