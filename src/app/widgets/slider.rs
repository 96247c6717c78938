use crate::config::SliderConfig;
use crate::dom::Element;
use crate::domain::ports::{Scheduler, TimerId};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderState {
    /// 沒有任何投影片，永遠不啟動
    Idle,
    AutoRunning,
    PausedResuming,
    /// 頁面隱藏且沒有待恢復的暫停，兩個計時器都不存在
    Frozen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    Advanced(usize),
    Resumed,
    Stale,
}

/// 輪播的索引與計時器狀態；計時器由注入的 `Scheduler` 提供
pub struct Slider<S: Scheduler> {
    slides: Vec<Element>,
    dots: Vec<Element>,
    prev: Option<Element>,
    next: Option<Element>,
    current: usize,
    auto_timer: Option<TimerId>,
    resume_timer: Option<TimerId>,
    auto_delay: Duration,
    manual_pause: Duration,
    scheduler: S,
}

impl<S: Scheduler> Slider<S> {
    pub fn new(slides: Vec<Element>, dots: Vec<Element>, config: &SliderConfig, scheduler: S) -> Self {
        Self {
            slides,
            dots,
            prev: None,
            next: None,
            current: 0,
            auto_timer: None,
            resume_timer: None,
            auto_delay: config.auto_delay(),
            manual_pause: config.manual_pause(),
            scheduler,
        }
    }

    pub fn with_controls(mut self, prev: Option<Element>, next: Option<Element>) -> Self {
        self.prev = prev;
        self.next = next;
        self
    }

    /// 套用初始投影片（頁面上第一個已標記 active 的，否則 0）並開始自動輪播
    pub fn mount(mut self) -> Self {
        if self.slides.is_empty() {
            return self;
        }
        let initial = self
            .slides
            .iter()
            .position(|slide| slide.has_class("active"))
            .unwrap_or(0);
        self.set_active_slide(initial as i64);
        self.start_auto();
        self
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn state(&self) -> SliderState {
        if self.slides.is_empty() {
            return SliderState::Idle;
        }
        match (self.auto_timer, self.resume_timer) {
            (_, Some(_)) => SliderState::PausedResuming,
            (Some(_), None) => SliderState::AutoRunning,
            (None, None) => SliderState::Frozen,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// 任意整數索引皆可，負值與超出範圍者環繞回 [0, N)
    pub fn set_active_slide(&mut self, index: i64) {
        if self.slides.is_empty() {
            return;
        }
        self.current = index.rem_euclid(self.slides.len() as i64) as usize;

        for (i, slide) in self.slides.iter().enumerate() {
            let active = slide.set_class("active", i == self.current);
            slide.set_attribute("aria-hidden", &(!active).to_string());
        }
        for (i, dot) in self.dots.iter().enumerate() {
            let active = dot.set_class("active", i == self.current);
            dot.set_attribute("aria-selected", &active.to_string());
        }
        tracing::debug!("Slide {} of {} is now active", self.current + 1, self.slides.len());
    }

    pub fn start_auto(&mut self) {
        if self.slides.is_empty() {
            return;
        }
        if let Some(id) = self.auto_timer.take() {
            self.scheduler.cancel(id);
        }
        self.auto_timer = Some(self.scheduler.repeat(self.auto_delay));
    }

    pub fn pause_auto(&mut self) {
        if self.slides.is_empty() {
            return;
        }
        if let Some(id) = self.auto_timer.take() {
            self.scheduler.cancel(id);
        }
        if let Some(id) = self.resume_timer.take() {
            self.scheduler.cancel(id);
        }
        self.resume_timer = Some(self.scheduler.once(self.manual_pause));
        tracing::debug!("Auto-advance paused for {:?}", self.manual_pause);
    }

    /// 上一張 / 下一張
    pub fn step(&mut self, delta: i64) {
        self.set_active_slide(self.current as i64 + delta);
        self.pause_auto();
    }

    pub fn jump_to(&mut self, index: i64) {
        self.set_active_slide(index);
        self.pause_auto();
    }

    /// 隱藏時只停掉自動輪播，已排定的恢復計時器保留；重新可見時無條件恢復
    /// 自動輪播，覆蓋尚未到期的暫停
    pub fn on_visibility_change(&mut self, hidden: bool) {
        if self.slides.is_empty() {
            return;
        }
        if hidden {
            if let Some(id) = self.auto_timer.take() {
                self.scheduler.cancel(id);
            }
            tracing::debug!("Page hidden, auto-advance stopped");
        } else {
            if let Some(id) = self.resume_timer.take() {
                self.scheduler.cancel(id);
            }
            self.start_auto();
        }
    }

    pub fn on_timer(&mut self, id: TimerId) -> TimerOutcome {
        if self.auto_timer == Some(id) {
            self.set_active_slide(self.current as i64 + 1);
            TimerOutcome::Advanced(self.current)
        } else if self.resume_timer == Some(id) {
            self.resume_timer = None;
            self.start_auto();
            TimerOutcome::Resumed
        } else {
            TimerOutcome::Stale
        }
    }

    /// prev/next 按鈕或指示點，`path` 為冒泡路徑；回傳是否由輪播處理
    pub fn handle_click(&mut self, path: &[Element]) -> bool {
        let hit = |control: &Option<Element>| control.as_ref().is_some_and(|c| path.contains(c));
        if hit(&self.prev) {
            self.step(-1);
            return true;
        }
        if hit(&self.next) {
            self.step(1);
            return true;
        }
        if let Some(dot) = path.iter().find(|el| self.dots.contains(el)) {
            let index = dot
                .attribute("data-index")
                .and_then(|raw| raw.trim().parse::<i64>().ok())
                .unwrap_or(0);
            self.jump_to(index);
            return true;
        }
        false
    }
}
