use crate::adapters::{HttpTransport, TokioScheduler};
use crate::app::widgets::{
    ContactForm, Menu, Modal, PhoneMask, RevealObserver, Slider, SubmitOutcome,
};
use crate::config::SiteConfig;
use crate::core::events::{event_channel, EventFlow, EventReceiver, EventSender, PageEvent};
use crate::dom::{Document, Element};
use crate::domain::ports::{ContactTransport, Scheduler};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::sync::Arc;
use tokio::task::JoinSet;

/// 一個頁面上的所有互動功能；只掛載元素齊全的功能
///
/// 事件一律經由 [`Page::dispatch`] 依序處理。聯絡表單送出是唯一的非同步步驟，
/// 以 task 執行，頁面在等待期間持續處理其他事件。
pub struct Page<S: Scheduler> {
    document: Document,
    menu: Option<Menu>,
    slider: Option<Slider<S>>,
    reveal: Option<RevealObserver>,
    phone_mask: Option<PhoneMask>,
    contact: Option<ContactForm>,
    modal: Option<Modal>,
    submissions: JoinSet<SubmitOutcome>,
}

impl<S: Scheduler> Page<S> {
    /// 有投影片時會立即排程自動輪播
    pub fn mount(
        document: Document,
        config: &SiteConfig,
        transport: Arc<dyn ContactTransport>,
        scheduler: S,
    ) -> Self {
        let menu = match (
            document.query(".burger"),
            document.get_element_by_id("nav-links"),
        ) {
            (Some(burger), Some(nav)) => Some(Menu::new(burger, nav, document.query(".brand"))),
            _ => None,
        };

        let slides = document.query_all(".slide");
        let slider = if slides.is_empty() {
            None
        } else {
            Some(
                Slider::new(slides, document.query_all(".dot"), &config.slider, scheduler)
                    .with_controls(
                        document.query(".slider__btn.prev"),
                        document.query(".slider__btn.next"),
                    )
                    .mount(),
            )
        };

        let targets = document.query_all(".reveal");
        let reveal = if targets.is_empty() {
            None
        } else {
            let mut observer = RevealObserver::new(config.reveal.threshold);
            for target in targets {
                observer.observe(target);
            }
            Some(observer)
        };

        let phone_mask = document.get_element_by_id("phone").map(PhoneMask::new);

        let contact = match (
            document.get_element_by_id("contact-form"),
            document.get_element_by_id("form-status"),
        ) {
            (Some(form), Some(status)) => ContactForm::mount(form, status, transport),
            _ => None,
        };

        let modal = document
            .get_element_by_id("policy-modal")
            .map(|container| Modal::new(container, document.get_element_by_id("open-policy")));

        tracing::info!(
            "🧩 Page mounted (menu: {}, slider: {}, reveal: {}, phone mask: {}, contact form: {}, modal: {})",
            menu.is_some(),
            slider.as_ref().map_or(0, |s| s.len()),
            reveal.as_ref().map_or(0, |r| r.observed_count()),
            phone_mask.is_some(),
            contact.is_some(),
            modal.is_some()
        );

        Self {
            document,
            menu,
            slider,
            reveal,
            phone_mask,
            contact,
            modal,
            submissions: JoinSet::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn menu(&self) -> Option<&Menu> {
        self.menu.as_ref()
    }

    pub fn slider(&self) -> Option<&Slider<S>> {
        self.slider.as_ref()
    }

    pub fn slider_mut(&mut self) -> Option<&mut Slider<S>> {
        self.slider.as_mut()
    }

    pub fn reveal(&self) -> Option<&RevealObserver> {
        self.reveal.as_ref()
    }

    pub fn phone_mask(&self) -> Option<&PhoneMask> {
        self.phone_mask.as_ref()
    }

    pub fn contact(&self) -> Option<&ContactForm> {
        self.contact.as_ref()
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    /// 同步處理單一事件；不會失敗
    pub fn dispatch(&mut self, event: PageEvent) -> EventFlow {
        match event {
            PageEvent::Click(target) => {
                let path = self.document.event_path(&target);
                if let Some(menu) = &self.menu {
                    menu.handle_click(&path);
                }
                if let Some(slider) = &mut self.slider {
                    slider.handle_click(&path);
                }
                match &self.modal {
                    Some(modal) => modal.handle_click(&path),
                    None => EventFlow::Continue,
                }
            }
            PageEvent::Input(target) => {
                if let Some(mask) = &self.phone_mask {
                    mask.handle_input(&target);
                }
                EventFlow::Continue
            }
            PageEvent::Submit(target) => self.submit(&target),
            PageEvent::KeyDown(key) => {
                if let Some(modal) = &self.modal {
                    modal.handle_key(&key);
                }
                EventFlow::Continue
            }
            PageEvent::VisibilityChange { hidden } => {
                self.document.set_hidden(hidden);
                if let Some(slider) = &mut self.slider {
                    slider.on_visibility_change(hidden);
                }
                EventFlow::Continue
            }
            PageEvent::Intersection(entries) => {
                if let Some(reveal) = &mut self.reveal {
                    reveal.on_intersections(&entries);
                }
                EventFlow::Continue
            }
            PageEvent::Timer(id) => {
                if let Some(slider) = &mut self.slider {
                    slider.on_timer(id);
                }
                EventFlow::Continue
            }
        }
    }

    fn submit(&mut self, target: &Element) -> EventFlow {
        let Some(contact) = &self.contact else {
            return EventFlow::Continue;
        };
        if !contact.is_form(target) {
            return EventFlow::Continue;
        }

        match contact.begin() {
            Ok(pending) => {
                let contact = contact.clone();
                self.submissions
                    .spawn(async move { contact.complete(pending).await });
            }
            Err(outcome) => tracing::debug!("Submission stopped before delivery: {:?}", outcome),
        }
        self.reap();
        EventFlow::DefaultPrevented
    }

    fn reap(&mut self) {
        while let Some(result) = self.submissions.try_join_next() {
            match result {
                Ok(outcome) => tracing::debug!("Submission finished: {:?}", outcome),
                Err(e) => tracing::warn!("Submission task ended abnormally: {}", e),
            }
        }
    }

    pub fn in_flight(&self) -> usize {
        self.submissions.len()
    }

    /// 等待所有進行中的送出完成
    pub async fn settle(&mut self) -> Vec<SubmitOutcome> {
        let mut outcomes = Vec::new();
        while let Some(result) = self.submissions.join_next().await {
            match result {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => tracing::warn!("Submission task ended abnormally: {}", e),
            }
        }
        outcomes
    }

    /// 處理佇列中已到達的事件，不等待新事件
    pub fn pump(&mut self, events: &mut EventReceiver) -> usize {
        let mut handled = 0;
        while let Ok(event) = events.try_recv() {
            self.dispatch(event);
            handled += 1;
        }
        self.reap();
        handled
    }

    /// 事件迴圈；所有傳送端關閉後結束
    pub async fn run(mut self, mut events: EventReceiver) {
        while let Some(event) = events.recv().await {
            self.dispatch(event);
            self.reap();
        }
        tracing::info!("Event queue closed, page unloaded");
    }
}

/// 以 tokio 計時器與 HTTP 送出組裝頁面；必須在 tokio runtime 內呼叫
pub fn launch(
    document: Document,
    config: &SiteConfig,
) -> Result<(Page<TokioScheduler>, EventSender, EventReceiver)> {
    config.validate()?;
    let (events, receiver) = event_channel();
    let scheduler = TokioScheduler::new(&events);
    let transport: Arc<dyn ContactTransport> = Arc::new(HttpTransport::from_config(&config.contact));
    let page = Page::mount(document, config, transport, scheduler);
    Ok((page, events, receiver))
}
