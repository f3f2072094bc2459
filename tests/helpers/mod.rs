#![allow(unused_imports)]
pub mod access_helpers;
pub mod test_db;

pub use access_helpers::*;
pub use test_db::*;
