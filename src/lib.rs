pub mod avatar;
pub mod cli;
pub mod config;
pub mod model;
pub mod router;
pub mod tui;

pub use crate::model::{Profile, ROSTER};
pub use crate::router::{ProfileSnapshot, Route, Router};
