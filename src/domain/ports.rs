use crate::domain::model::ContactPayload;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait ContactTransport: Send + Sync {
    /// 只有 2xx 視為成功，回應內容不讀取
    async fn deliver(&self, payload: &ContactPayload) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// 計時器來源；觸發時以 id 回報給擁有者
pub trait Scheduler {
    fn repeat(&mut self, period: Duration) -> TimerId;
    fn once(&mut self, delay: Duration) -> TimerId;
    fn cancel(&mut self, id: TimerId);
}
