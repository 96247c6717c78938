//! Shared test utilities: a virtual-clock scheduler and a full landing page fixture.
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let mut slider = Slider::new(slides, dots, &SliderConfig::default(), VirtualScheduler::default()).mount();
//! assert_eq!(advance_slider(&mut slider, 5000), vec![1]);
//! ```

use crate::app::widgets::slider::{Slider, TimerOutcome};
use crate::dom::{Document, Element};
use crate::domain::ports::{Scheduler, TimerId};
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
struct VirtualTimer {
    due: u64,
    period: Option<u64>,
}

/// 手動推進的毫秒時鐘；同一時刻到期者依 id 先後觸發
#[derive(Debug, Default)]
pub(crate) struct VirtualScheduler {
    now: u64,
    next_id: u64,
    timers: BTreeMap<TimerId, VirtualTimer>,
}

impl VirtualScheduler {
    pub(crate) fn now(&self) -> u64 {
        self.now
    }

    pub(crate) fn live(&self) -> usize {
        self.timers.len()
    }

    /// 取出 `until` 之前最早到期的計時器並把時鐘推到該時刻
    pub(crate) fn pop_due(&mut self, until: u64) -> Option<TimerId> {
        let (id, timer) = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.due <= until)
            .min_by_key(|(id, timer)| (timer.due, **id))
            .map(|(id, timer)| (*id, *timer))?;

        self.now = timer.due;
        match timer.period {
            Some(period) => {
                if let Some(entry) = self.timers.get_mut(&id) {
                    entry.due += period;
                }
            }
            None => {
                self.timers.remove(&id);
            }
        }
        Some(id)
    }

    pub(crate) fn settle(&mut self, until: u64) {
        self.now = self.now.max(until);
    }

    fn schedule(&mut self, delay: Duration, period: Option<u64>) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let due = self.now + delay.as_millis() as u64;
        self.timers.insert(id, VirtualTimer { due, period });
        id
    }
}

impl Scheduler for VirtualScheduler {
    fn repeat(&mut self, period: Duration) -> TimerId {
        self.schedule(period, Some(period.as_millis().max(1) as u64))
    }

    fn once(&mut self, delay: Duration) -> TimerId {
        self.schedule(delay, None)
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }
}

/// 推進 `millis` 毫秒，回傳每次自動前進後的索引
pub(crate) fn advance_slider(slider: &mut Slider<VirtualScheduler>, millis: u64) -> Vec<usize> {
    let until = slider.scheduler().now() + millis;
    let mut visited = Vec::new();
    while let Some(id) = slider.scheduler_mut().pop_due(until) {
        if let TimerOutcome::Advanced(index) = slider.on_timer(id) {
            visited.push(index);
        }
    }
    slider.scheduler_mut().settle(until);
    visited
}

/// 具備所有功能元素的頁面
pub(crate) struct LandingFixture {
    pub document: Document,
    pub burger: Element,
    pub nav: Element,
    pub nav_links: Vec<Element>,
    pub brand: Element,
    pub slides: Vec<Element>,
    pub dots: Vec<Element>,
    pub prev: Element,
    pub next: Element,
    pub reveals: Vec<Element>,
    pub form: Element,
    pub name: Element,
    pub phone: Element,
    pub message: Element,
    pub submit: Element,
    pub status: Element,
    pub open_policy: Element,
    pub modal: Element,
    pub modal_close: Element,
    pub modal_body: Element,
}

pub(crate) fn landing_fixture() -> LandingFixture {
    let burger = Element::new("button")
        .with_class("burger")
        .with_attr("aria-expanded", "false");
    let nav_links: Vec<Element> = ["#services", "#about", "#contact"]
        .iter()
        .map(|href| Element::new("a").with_attr("href", href))
        .collect();
    let mut nav = Element::new("ul").with_id("nav-links");
    for link in &nav_links {
        nav = nav.with_child(Element::new("li").with_child(link.clone()));
    }
    let brand = Element::new("a").with_class("brand").with_attr("href", "#");

    let slides: Vec<Element> = (0..3)
        .map(|i| Element::new("div").with_class(if i == 0 { "slide active" } else { "slide" }))
        .collect();
    let dots: Vec<Element> = (0..3)
        .map(|i| {
            Element::new("button")
                .with_class("dot")
                .with_attr("data-index", &i.to_string())
        })
        .collect();
    let prev = Element::new("button").with_class("slider__btn prev");
    let next = Element::new("button").with_class("slider__btn next");
    let mut slider = Element::new("section").with_class("slider");
    for slide in &slides {
        slider = slider.with_child(slide.clone());
    }
    slider = slider.with_child(prev.clone()).with_child(next.clone());
    for dot in &dots {
        slider = slider.with_child(dot.clone());
    }

    let reveals: Vec<Element> = (0..2)
        .map(|_| Element::new("section").with_class("reveal"))
        .collect();

    let name = Element::new("input")
        .with_attr("name", "name")
        .with_attr("required", "");
    let phone = Element::new("input")
        .with_id("phone")
        .with_attr("name", "phone")
        .with_attr("type", "tel")
        .with_attr("required", "");
    let message = Element::new("textarea")
        .with_attr("name", "message")
        .with_attr("required", "");
    let submit = Element::new("button")
        .with_attr("type", "submit")
        .with_text("Отправить");
    let form = Element::new("form")
        .with_id("contact-form")
        .with_child(name.clone())
        .with_child(phone.clone())
        .with_child(message.clone())
        .with_child(submit.clone());
    let status = Element::new("p").with_id("form-status");

    let open_policy = Element::new("a")
        .with_id("open-policy")
        .with_attr("href", "#policy");
    let modal_close = Element::new("button").with_class("modal__close");
    let modal_body = Element::new("div").with_class("modal__content");
    let modal = Element::new("div")
        .with_id("policy-modal")
        .with_class("modal")
        .with_attr("aria-hidden", "true")
        .with_child(modal_body.clone().with_child(modal_close.clone()));

    let mut root = Element::new("body")
        .with_child(
            Element::new("header")
                .with_child(brand.clone())
                .with_child(burger.clone())
                .with_child(nav.clone()),
        )
        .with_child(slider);
    for section in &reveals {
        root = root.with_child(section.clone());
    }
    root = root
        .with_child(form.clone())
        .with_child(status.clone())
        .with_child(Element::new("footer").with_child(open_policy.clone()))
        .with_child(modal.clone());

    LandingFixture {
        document: Document::new(root),
        burger,
        nav,
        nav_links,
        brand,
        slides,
        dots,
        prev,
        next,
        reveals,
        form,
        name,
        phone,
        message,
        submit,
        status,
        open_policy,
        modal,
        modal_close,
        modal_body,
    }
}
