use serde::{Deserialize, Serialize};

pub const ERROR_COLOR: &str = "#b00020";
pub const NEUTRAL_COLOR: &str = "inherit";

/// 送出前已 trim 並轉義的聯絡表單內容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    pub name: String,
    pub phone: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Neutral,
    Error,
}

impl StatusTone {
    pub fn color(self) -> &'static str {
        match self {
            StatusTone::Neutral => NEUTRAL_COLOR,
            StatusTone::Error => ERROR_COLOR,
        }
    }
}

/// 最近一次驗證或送出結果；不保留歷史
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormStatus {
    pub text: String,
    pub tone: StatusTone,
}

impl FormStatus {
    pub fn neutral(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: StatusTone::Neutral,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: StatusTone::Error,
        }
    }
}
