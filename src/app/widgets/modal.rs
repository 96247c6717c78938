use crate::core::events::EventFlow;
use crate::dom::Element;

pub const ESCAPE_KEY: &str = "Escape";

/// 隱私權政策對話框；不做焦點鎖定與巢狀堆疊
#[derive(Debug, Clone)]
pub struct Modal {
    container: Element,
    close_button: Option<Element>,
    trigger: Option<Element>,
}

impl Modal {
    pub fn new(container: Element, trigger: Option<Element>) -> Self {
        let close_button = container.query(".modal__close");
        Self {
            container,
            close_button,
            trigger,
        }
    }

    pub fn is_open(&self) -> bool {
        self.container.has_class("open")
    }

    pub fn open(&self) {
        self.container.add_class("open");
        self.container.set_attribute("aria-hidden", "false");
        tracing::debug!("Modal opened");
    }

    pub fn close(&self) {
        self.container.remove_class("open");
        self.container.set_attribute("aria-hidden", "true");
    }

    /// 觸發連結開啟（並阻止預設跳轉）；關閉鈕或點在背景本身時關閉
    ///
    /// `path` 為冒泡路徑；背景只認目標本身，不含冒泡上來的點擊
    pub fn handle_click(&self, path: &[Element]) -> EventFlow {
        if let Some(trigger) = &self.trigger {
            if path.contains(trigger) {
                self.open();
                return EventFlow::DefaultPrevented;
            }
        }
        let on_close = self
            .close_button
            .as_ref()
            .is_some_and(|button| path.contains(button));
        if on_close || path.first() == Some(&self.container) {
            self.close();
        }
        EventFlow::Continue
    }

    pub fn handle_key(&self, key: &str) {
        if key == ESCAPE_KEY {
            self.close();
        }
    }
}
