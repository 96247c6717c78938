use crate::dom::Element;
use crate::domain::services::format_phone;

#[derive(Debug, Clone)]
pub struct PhoneMask {
    input: Element,
}

impl PhoneMask {
    pub fn new(input: Element) -> Self {
        Self { input }
    }

    /// 重新格式化並把游標放回輸入前的位置
    pub fn apply(&self) {
        let caret = self.input.selection_start();
        let formatted = format_phone(&self.input.value());
        self.input.set_value(&formatted);
        self.input.set_selection_range(caret, caret);
    }

    pub fn handle_input(&self, target: &Element) -> bool {
        if *target != self.input {
            return false;
        }
        self.apply();
        true
    }
}
