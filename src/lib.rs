pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod dom;
pub mod domain;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use adapters::{HttpTransport, TokioScheduler};
pub use config::SiteConfig;
pub use crate::core::{event_channel, launch, EventFlow, Page, PageEvent};
pub use dom::{Document, Element};
pub use utils::error::{Result, SiteError};
