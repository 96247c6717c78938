use crate::domain::model::ContactPayload;
use thiserror::Error;

pub const MIN_NAME_CHARS: usize = 2;
pub const PHONE_DIGITS: usize = 11;
pub const MIN_MESSAGE_CHARS: usize = 10;

/// 第一個未通過的欄位規則；Display 即顯示給使用者的訊息
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactIssue {
    #[error("Пожалуйста, укажите имя (мин. 2 символа).")]
    NameTooShort,

    #[error("Введите телефон в формате +7 (XXX) XXX-XX-XX.")]
    PhoneMalformed,

    #[error("Опишите обращение подробнее (мин. 10 символов).")]
    MessageTooShort,
}

pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// 將標記語言中的特殊字元轉成實體，其餘字元原樣保留
pub fn sanitize(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// 依序套用：姓名、電話、訊息；第一個失敗即回傳
pub fn validate_contact(payload: &ContactPayload) -> Result<(), ContactIssue> {
    if payload.name.trim().chars().count() < MIN_NAME_CHARS {
        return Err(ContactIssue::NameTooShort);
    }
    if digits_only(&payload.phone).len() != PHONE_DIGITS {
        return Err(ContactIssue::PhoneMalformed);
    }
    if payload.message.trim().chars().count() < MIN_MESSAGE_CHARS {
        return Err(ContactIssue::MessageTooShort);
    }
    Ok(())
}

/// 逐步組出 `+7 (XXX) XXX-XX-XX`，只顯示已輸入的段落
///
/// 開頭的 8 視為國內長途字首並改成 7；其他開頭則補上 7。
/// 對自身輸出再套用一次結果不變。
pub fn format_phone(raw: &str) -> String {
    let mut digits = digits_only(raw);
    if !digits.starts_with('7') {
        if digits.starts_with('8') {
            digits.replace_range(..1, "7");
        } else {
            digits.insert(0, '7');
        }
    }
    digits.truncate(PHONE_DIGITS);

    // 只含 ASCII 數字，位元組切片即字元切片
    let group = |from: usize, to: usize| digits.get(from..to.min(digits.len())).unwrap_or("");
    let (area, first, second, third) = (group(1, 4), group(4, 7), group(7, 9), group(9, 11));

    let mut result = String::from("+7");
    if !area.is_empty() {
        result.push_str(" (");
        result.push_str(area);
    }
    if area.len() == 3 {
        result.push(')');
    }
    if !first.is_empty() {
        result.push(' ');
        result.push_str(first);
    }
    if !second.is_empty() {
        result.push('-');
        result.push_str(second);
    }
    if !third.is_empty() {
        result.push('-');
        result.push_str(third);
    }
    result
}
