use crate::app::widgets::reveal::IntersectionEntry;
use crate::dom::Element;
use crate::domain::ports::TimerId;
use tokio::sync::mpsc;

/// 頁面上唯一的事件佇列所承載的內容
#[derive(Debug, Clone)]
pub enum PageEvent {
    Click(Element),
    Input(Element),
    Submit(Element),
    KeyDown(String),
    VisibilityChange { hidden: bool },
    Intersection(Vec<IntersectionEntry>),
    Timer(TimerId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFlow {
    Continue,
    DefaultPrevented,
}

pub type EventSender = mpsc::UnboundedSender<PageEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<PageEvent>;

pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
