use crate::core::events::{EventSender, PageEvent};
use crate::domain::ports::{Scheduler, TimerId};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc::WeakUnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// 每個計時器是一個 tokio task，觸發時把 `PageEvent::Timer` 放回頁面佇列
///
/// 必須在 tokio runtime 內使用。取消即 abort 該 task；已送出但尚未處理的事件
/// 由接收端依 id 過濾。只持有弱參照，宿主的傳送端全部關閉後佇列即結束，
/// 計時器 task 隨之退出。
pub struct TokioScheduler {
    events: WeakUnboundedSender<PageEvent>,
    next_id: u64,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

/// 佇列已關閉時回傳 false
fn post(events: &WeakUnboundedSender<PageEvent>, id: TimerId) -> bool {
    match events.upgrade() {
        Some(sender) => sender.send(PageEvent::Timer(id)).is_ok(),
        None => false,
    }
}

impl TokioScheduler {
    pub fn new(events: &EventSender) -> Self {
        Self {
            events: events.downgrade(),
            next_id: 0,
            tasks: HashMap::new(),
        }
    }

    fn allocate(&mut self) -> TimerId {
        self.tasks.retain(|_, handle| !handle.is_finished());
        self.next_id += 1;
        TimerId(self.next_id)
    }

    pub fn outstanding(&self) -> usize {
        self.tasks
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }
}

impl Scheduler for TokioScheduler {
    fn repeat(&mut self, period: Duration) -> TimerId {
        let id = self.allocate();
        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if !post(&events, id) {
                    tracing::trace!("Event queue closed, timer {:?} stops", id);
                    break;
                }
            }
        });
        tracing::trace!("Scheduled repeating timer {:?} every {:?}", id, period);
        self.tasks.insert(id, handle);
        id
    }

    fn once(&mut self, delay: Duration) -> TimerId {
        let id = self.allocate();
        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            time::sleep(delay).await;
            post(&events, id);
        });
        tracing::trace!("Scheduled one-shot timer {:?} after {:?}", id, delay);
        self.tasks.insert(id, handle);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(handle) = self.tasks.remove(&id) {
            handle.abort();
            tracing::trace!("Cancelled timer {:?}", id);
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
