pub mod catalog;
pub mod decoder;
pub mod filter;
pub mod pipeline;
pub mod signature;

pub use crate::domain::model::{CatalogEntry, CatalogOption, IncomingRequest, OptionsResponse};
pub use crate::domain::ports::{CatalogSource, Clock, FixedClock, SystemClock};
pub use crate::utils::error::Result;
