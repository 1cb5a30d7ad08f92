pub mod condition;
pub mod current;
pub mod forecast;

#[cfg(test)]
pub mod fixtures;

pub use condition::*;
pub use current::*;
pub use forecast::*;
