pub mod dates;
pub mod directory;
pub mod engine;
pub mod jsonp;
pub mod pipeline;
pub mod report;
pub mod resolver;
pub mod url;

pub use crate::domain::model::{App, CityName, Direction, Payload, Query, RankEntry};
pub use crate::domain::ports::{Pipeline, Sink};
pub use crate::utils::error::Result;
