pub mod error;
pub mod net;
pub mod runtime;
pub mod topo;

pub use error::{Error, Result};

#[cfg(test)]
mod test;
