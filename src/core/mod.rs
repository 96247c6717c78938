pub mod events;
pub mod page;

pub use crate::domain::model::{ContactPayload, FormStatus};
pub use crate::domain::ports::{ContactTransport, Scheduler, TimerId};
pub use crate::utils::error::Result;
pub use events::{event_channel, EventFlow, EventReceiver, EventSender, PageEvent};
pub use page::{launch, Page};
