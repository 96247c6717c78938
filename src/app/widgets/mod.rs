pub mod contact_form;
pub mod menu;
pub mod modal;
pub mod phone_mask;
pub mod reveal;
pub mod slider;

pub use contact_form::{ContactForm, PendingSubmission, SubmitOutcome};
pub use menu::Menu;
pub use modal::Modal;
pub use phone_mask::PhoneMask;
pub use reveal::{IntersectionEntry, RevealObserver};
pub use slider::{Slider, SliderState, TimerOutcome};
