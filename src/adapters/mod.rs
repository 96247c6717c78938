// Adapters layer: concrete implementations of the domain ports (http delivery, tokio timers).

pub mod http;
pub mod timers;

pub use http::HttpTransport;
pub use timers::TokioScheduler;
