use crate::dom::Element;

/// 行動版導覽選單：漢堡按鈕與連結容器必須同時存在
#[derive(Debug, Clone)]
pub struct Menu {
    burger: Element,
    nav: Element,
    links: Vec<Element>,
    brand: Option<Element>,
}

impl Menu {
    pub fn new(burger: Element, nav: Element, brand: Option<Element>) -> Self {
        let links = nav.query_all("a");
        Self {
            burger,
            nav,
            links,
            brand,
        }
    }

    pub fn is_open(&self) -> bool {
        self.nav.has_class("open")
    }

    pub fn toggle(&self) -> bool {
        let open = self.burger.toggle_class("active");
        self.nav.set_class("open", open);
        self.burger.set_attribute("aria-expanded", &open.to_string());
        tracing::debug!("Navigation menu {}", if open { "opened" } else { "closed" });
        open
    }

    pub fn close(&self) {
        self.nav.remove_class("open");
        self.burger.remove_class("active");
        self.burger.set_attribute("aria-expanded", "false");
    }

    /// `path` 為點擊冒泡路徑（目標在前）。漢堡按鈕切換；任何選單連結或 logo 一律關閉
    pub fn handle_click(&self, path: &[Element]) -> bool {
        if path.contains(&self.burger) {
            self.toggle();
            return true;
        }
        let on_link = path
            .iter()
            .any(|el| self.links.contains(el) || self.brand.as_ref() == Some(el));
        if on_link {
            self.close();
            return true;
        }
        false
    }
}
