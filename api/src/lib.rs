pub mod consts;
pub mod error;
pub mod pda;
pub mod sdk;
pub mod state;
pub mod utils;

pub mod prelude {
    pub use crate::consts::*;
    pub use crate::error::*;
    pub use crate::pda::*;
    pub use crate::sdk::*;
    pub use crate::state::*;
    pub use crate::utils::*;
}
