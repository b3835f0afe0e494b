pub mod database;
pub mod fixtures;

#[allow(unused_imports)]
pub use database::*;
#[allow(unused_imports)]
pub use fixtures::*;
