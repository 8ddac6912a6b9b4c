mod account;
mod rpc;
mod io;
mod mint;

pub use account::*;
pub use rpc::*;
pub use io::*;
pub use mint::*;
