use crate::dom::selector::Selector;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct ElementState {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    value: String,
    default_value: String,
    disabled: bool,
    selection: (usize, usize),
    validation_message: String,
    children: Vec<Element>,
}

/// 元素的共享句柄；clone 只複製參照，比較以身分為準
#[derive(Debug, Clone)]
pub struct Element {
    inner: Arc<Mutex<ElementState>>,
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Element {}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ElementState {
                tag: tag.to_ascii_lowercase(),
                ..ElementState::default()
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, ElementState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with_id(self, id: &str) -> Self {
        self.state().id = Some(id.to_string());
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        for name in class.split_whitespace() {
            self.add_class(name);
        }
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    /// 同時設定目前值與 reset 時回復的預設值
    pub fn with_value(self, value: &str) -> Self {
        {
            let mut state = self.state();
            state.value = value.to_string();
            state.default_value = value.to_string();
        }
        self
    }

    pub fn with_child(self, child: Element) -> Self {
        self.append_child(child);
        self
    }

    pub fn append_child(&self, child: Element) {
        self.state().children.push(child);
    }

    pub fn children(&self) -> Vec<Element> {
        self.state().children.clone()
    }

    pub fn tag(&self) -> String {
        self.state().tag.clone()
    }

    pub fn id(&self) -> Option<String> {
        self.state().id.clone()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.state().classes.iter().any(|c| c == class)
    }

    pub fn add_class(&self, class: &str) {
        let mut state = self.state();
        if !state.classes.iter().any(|c| c == class) {
            state.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&self, class: &str) {
        self.state().classes.retain(|c| c != class);
    }

    /// classList.toggle(name, force) 的語意；回傳切換後是否存在
    pub fn set_class(&self, class: &str, on: bool) -> bool {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
        on
    }

    pub fn toggle_class(&self, class: &str) -> bool {
        let present = self.has_class(class);
        self.set_class(class, !present)
    }

    pub fn classes(&self) -> Vec<String> {
        self.state().classes.clone()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.state().attributes.get(name).cloned()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.state().attributes.contains_key(name)
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.state()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_attribute(&self, name: &str) {
        self.state().attributes.remove(name);
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.state().style.get(property).cloned()
    }

    pub fn set_style(&self, property: &str, value: &str) {
        self.state()
            .style
            .insert(property.to_string(), value.to_string());
    }

    pub fn text(&self) -> String {
        self.state().text.clone()
    }

    pub fn set_text(&self, text: &str) {
        self.state().text = text.to_string();
    }

    pub fn value(&self) -> String {
        self.state().value.clone()
    }

    /// 與瀏覽器相同，指定值後游標移到結尾
    pub fn set_value(&self, value: &str) {
        let mut state = self.state();
        state.value = value.to_string();
        let end = state.value.chars().count();
        state.selection = (end, end);
    }

    pub fn default_value(&self) -> String {
        self.state().default_value.clone()
    }

    pub fn reset_value(&self) {
        let mut state = self.state();
        state.value = state.default_value.clone();
        state.validation_message.clear();
        let end = state.value.chars().count();
        state.selection = (end, end);
    }

    pub fn is_disabled(&self) -> bool {
        self.state().disabled
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.state().disabled = disabled;
    }

    pub fn selection_start(&self) -> usize {
        self.state().selection.0
    }

    pub fn selection(&self) -> (usize, usize) {
        self.state().selection
    }

    /// 超出長度的位置會被夾到結尾，同 setSelectionRange
    pub fn set_selection_range(&self, start: usize, end: usize) {
        let mut state = self.state();
        let len = state.value.chars().count();
        let end = end.min(len);
        state.selection = (start.min(end), end);
    }

    pub fn validation_message(&self) -> String {
        self.state().validation_message.clone()
    }

    pub fn set_validation_message(&self, message: &str) {
        self.state().validation_message = message.to_string();
    }

    pub(crate) fn matches(&self, selector: &Selector) -> bool {
        let state = self.state();
        if let Some(tag) = &selector.tag {
            if *tag != state.tag {
                return false;
            }
        }
        if let Some(id) = &selector.id {
            if state.id.as_ref() != Some(id) {
                return false;
            }
        }
        if !selector
            .classes
            .iter()
            .all(|class| state.classes.contains(class))
        {
            return false;
        }
        selector.attributes.iter().all(|(name, expected)| {
            match (state.attributes.get(name), expected) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            }
        })
    }

    /// 深度優先、文件順序，不含自身
    pub fn query_all(&self, selector: &str) -> Vec<Element> {
        match selector.parse::<Selector>() {
            Ok(parsed) => {
                let mut found = Vec::new();
                self.collect_matches(&parsed, &mut found);
                found
            }
            Err(e) => {
                tracing::warn!("Ignoring query with invalid selector: {}", e);
                Vec::new()
            }
        }
    }

    pub fn query(&self, selector: &str) -> Option<Element> {
        self.query_all(selector).into_iter().next()
    }

    fn collect_matches(&self, selector: &Selector, found: &mut Vec<Element>) {
        for child in self.children() {
            if child.matches(selector) {
                found.push(child.clone());
            }
            child.collect_matches(selector, found);
        }
    }

    pub fn contains(&self, other: &Element) -> bool {
        self.children()
            .iter()
            .any(|child| child == other || child.contains(other))
    }

    /// 由 `target` 往上冒泡到自身（含兩端）的路徑；不在子樹內時為 None
    pub fn path_to(&self, target: &Element) -> Option<Vec<Element>> {
        if self == target {
            return Some(vec![self.clone()]);
        }
        let branch = self
            .children()
            .into_iter()
            .find(|child| child == target || child.contains(target))?;
        let mut path = branch.path_to(target)?;
        path.push(self.clone());
        Some(path)
    }
}
