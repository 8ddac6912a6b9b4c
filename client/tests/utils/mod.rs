mod ledger;
mod svm;

pub use ledger::*;
pub use svm::*;
