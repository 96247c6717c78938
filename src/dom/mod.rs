// 以記憶體元素樹模擬頁面結構，供各功能掛載與測試

pub mod document;
pub mod element;
pub mod selector;

pub use document::Document;
pub use element::Element;
pub use selector::Selector;
