use crate::dom::element::Element;

/// 頁面根節點與可見性狀態
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
    hidden: bool,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            root,
            hidden: false,
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn query(&self, selector: &str) -> Option<Element> {
        self.root.query(selector)
    }

    pub fn query_all(&self, selector: &str) -> Vec<Element> {
        self.root.query_all(selector)
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        self.root
            .query_all("*")
            .into_iter()
            .find(|el| el.id().as_deref() == Some(id))
    }

    /// 點擊的冒泡路徑：目標在前，依序到根；不在文件內的元素只有自身
    pub fn event_path(&self, target: &Element) -> Vec<Element> {
        self.root
            .path_to(target)
            .unwrap_or_else(|| vec![target.clone()])
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }
}
