mod algorithm;
mod hyperparams;
mod init;

pub use algorithm::*;
pub use hyperparams::*;
pub use init::*;
