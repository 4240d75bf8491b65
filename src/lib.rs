#![allow(clippy::implicit_hasher)]

pub mod error;
pub mod import;
pub mod models;
pub mod network;
pub mod path;

pub use error::{Result, SubwayError};
pub use network::SubwayNetwork;
pub use path::PathFindType;
