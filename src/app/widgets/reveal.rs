use crate::dom::Element;

pub const VISIBLE_CLASS: &str = "visible";

/// 觀察器回報的一筆交集資料
#[derive(Debug, Clone)]
pub struct IntersectionEntry {
    pub target: Element,
    pub is_intersecting: bool,
    pub ratio: f64,
}

impl IntersectionEntry {
    pub fn new(target: Element, ratio: f64) -> Self {
        Self {
            target,
            is_intersecting: ratio > 0.0,
            ratio,
        }
    }
}

/// 第一次達到門檻時加上 `visible` 並停止觀察，不可重新啟動
#[derive(Debug, Clone)]
pub struct RevealObserver {
    threshold: f64,
    observed: Vec<Element>,
}

impl RevealObserver {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            observed: Vec::new(),
        }
    }

    pub fn observe(&mut self, element: Element) {
        if !self.observed.contains(&element) {
            self.observed.push(element);
        }
    }

    pub fn unobserve(&mut self, element: &Element) {
        self.observed.retain(|observed| observed != element);
    }

    pub fn is_observing(&self, element: &Element) -> bool {
        self.observed.contains(element)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// 回傳這批資料中新顯示的元素數
    pub fn on_intersections(&mut self, entries: &[IntersectionEntry]) -> usize {
        let mut revealed = 0;
        for entry in entries {
            if !entry.is_intersecting || entry.ratio < self.threshold {
                continue;
            }
            if !self.is_observing(&entry.target) {
                continue;
            }
            entry.target.add_class(VISIBLE_CLASS);
            self.unobserve(&entry.target);
            revealed += 1;
        }
        if revealed > 0 {
            tracing::debug!(
                "Revealed {} element(s), {} still observed",
                revealed,
                self.observed.len()
            );
        }
        revealed
    }
}
