pub mod domain;
pub mod error;
pub mod notation;
pub mod protocol;
