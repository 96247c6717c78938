use crate::dom::Element;
use crate::domain::model::{ContactPayload, FormStatus};
use crate::domain::ports::ContactTransport;
use crate::domain::services::{sanitize, validate_contact, ContactIssue};
use std::sync::Arc;

pub const SENDING_MESSAGE: &str = "Отправляем...";
pub const SENT_MESSAGE: &str = "Сообщение отправлено. Мы свяжемся с вами в ближайшее время.";
pub const FAILED_MESSAGE: &str = "Не удалось отправить. Попробуйте ещё раз позднее.";

const VALUE_MISSING_MESSAGE: &str = "Заполните это поле.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 上一次送出尚未結束，送出鈕仍停用
    Busy,
    ConstraintViolation { field: String },
    Rejected(ContactIssue),
    Sent,
    Failed,
}

/// 停用送出鈕期間持有；drop 時必定重新啟用
#[derive(Debug)]
struct SubmitGuard {
    submit: Element,
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.submit.set_disabled(false);
    }
}

/// 已通過驗證、等待送出的內容
#[derive(Debug)]
pub struct PendingSubmission {
    payload: ContactPayload,
    _guard: SubmitGuard,
}

impl PendingSubmission {
    pub fn payload(&self) -> &ContactPayload {
        &self.payload
    }
}

/// 瀏覽器內建的欄位限制：`required` 與 `minlength`
fn constraint_violation(field: &Element) -> Option<String> {
    let value = field.value();
    let length = value.chars().count();
    if field.has_attribute("required") && value.is_empty() {
        return Some(VALUE_MISSING_MESSAGE.to_string());
    }
    let min_length = field
        .attribute("minlength")
        .and_then(|raw| raw.trim().parse::<usize>().ok());
    match min_length {
        Some(min) if length > 0 && length < min => Some(format!(
            "Минимально допустимое количество символов: {}. Длина текста сейчас: {}.",
            min, length
        )),
        _ => None,
    }
}

#[derive(Clone)]
pub struct ContactForm {
    form: Element,
    name: Element,
    phone: Element,
    message: Element,
    submit: Element,
    status: Element,
    transport: Arc<dyn ContactTransport>,
}

impl std::fmt::Debug for ContactForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactForm")
            .field("form", &self.form.id())
            .field("submit_disabled", &self.submit.is_disabled())
            .finish()
    }
}

impl ContactForm {
    /// 表單、三個具名欄位、送出鈕與狀態列缺一不可
    pub fn mount(form: Element, status: Element, transport: Arc<dyn ContactTransport>) -> Option<Self> {
        let name = form.query("[name=\"name\"]")?;
        let phone = form.query("[name=\"phone\"]")?;
        let message = form.query("[name=\"message\"]")?;
        let submit = form.query("button[type=\"submit\"]")?;
        Some(Self {
            form,
            name,
            phone,
            message,
            submit,
            status,
            transport,
        })
    }

    pub fn is_form(&self, target: &Element) -> bool {
        *target == self.form
    }

    pub fn submit_control(&self) -> &Element {
        &self.submit
    }

    pub fn show(&self, status: &FormStatus) {
        self.status.set_text(&status.text);
        self.status.set_style("color", status.tone.color());
    }

    pub fn reset(&self) {
        for field in self.form.query_all("[name]") {
            field.reset_value();
        }
    }

    /// 第一個不符合內建限制的欄位；其驗證訊息會被設定
    pub fn check_validity(&self) -> Result<(), String> {
        for field in self.form.query_all("[name]") {
            match constraint_violation(&field) {
                Some(message) => {
                    field.set_validation_message(&message);
                    return Err(field.attribute("name").unwrap_or_default());
                }
                None => field.set_validation_message(""),
            }
        }
        Ok(())
    }

    pub fn payload(&self) -> ContactPayload {
        ContactPayload {
            name: sanitize(self.name.value().trim()),
            phone: sanitize(self.phone.value().trim()),
            message: sanitize(self.message.value().trim()),
        }
    }

    /// 同步階段：內建限制、組裝、驗證、停用送出鈕
    pub fn begin(&self) -> Result<PendingSubmission, SubmitOutcome> {
        if self.submit.is_disabled() {
            tracing::debug!("Submission already in flight, ignoring submit");
            return Err(SubmitOutcome::Busy);
        }

        if let Err(field) = self.check_validity() {
            tracing::debug!("Field '{}' failed built-in constraints", field);
            return Err(SubmitOutcome::ConstraintViolation { field });
        }

        let payload = self.payload();
        if let Err(issue) = validate_contact(&payload) {
            tracing::debug!("Contact form rejected: {:?}", issue);
            self.show(&FormStatus::error(issue.to_string()));
            return Err(SubmitOutcome::Rejected(issue));
        }

        self.submit.set_disabled(true);
        self.show(&FormStatus::neutral(SENDING_MESSAGE));
        Ok(PendingSubmission {
            payload,
            _guard: SubmitGuard {
                submit: self.submit.clone(),
            },
        })
    }

    /// 非同步階段：送出並顯示結果；送出鈕隨 `pending` 一起釋放
    pub async fn complete(&self, pending: PendingSubmission) -> SubmitOutcome {
        match self.transport.deliver(&pending.payload).await {
            Ok(()) => {
                tracing::info!("✅ Contact form delivered");
                self.show(&FormStatus::neutral(SENT_MESSAGE));
                self.reset();
                SubmitOutcome::Sent
            }
            Err(e) => {
                tracing::warn!(
                    "❌ Contact form delivery failed: {} (Category: {:?})",
                    e,
                    e.category()
                );
                self.show(&FormStatus::error(FAILED_MESSAGE));
                SubmitOutcome::Failed
            }
        }
    }

    pub async fn submit(&self) -> SubmitOutcome {
        match self.begin() {
            Ok(pending) => self.complete(pending).await,
            Err(outcome) => outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ERROR_COLOR, NEUTRAL_COLOR};
    use crate::utils::error::{Result, SiteError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    struct MockTransport {
        status: Option<u16>,
        calls: AtomicUsize,
        delivered: std::sync::Mutex<Vec<ContactPayload>>,
        gate: Option<Arc<Notify>>,
        submit_seen_disabled: std::sync::Mutex<Option<Element>>,
    }

    impl MockTransport {
        fn new() -> Self {
            Self {
                status: None,
                calls: AtomicUsize::new(0),
                delivered: std::sync::Mutex::new(Vec::new()),
                gate: None,
                submit_seen_disabled: std::sync::Mutex::new(None),
            }
        }

        fn with_status(mut self, status: u16) -> Self {
            self.status = Some(status);
            self
        }

        fn with_gate(mut self, gate: Arc<Notify>) -> Self {
            self.gate = Some(gate);
            self
        }

        fn watching(self, submit: &Element) -> Self {
            *self.submit_seen_disabled.lock().unwrap() = Some(submit.clone());
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl ContactTransport for MockTransport {
        async fn deliver(&self, payload: &ContactPayload) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(submit) = self.submit_seen_disabled.lock().unwrap().as_ref() {
                assert!(submit.is_disabled(), "submit must be disabled during delivery");
            }
            self.delivered.lock().unwrap().push(payload.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match self.status {
                Some(status) if !(200..300).contains(&status) => {
                    Err(SiteError::DeliveryRejected { status })
                }
                _ => Ok(()),
            }
        }
    }

    struct Fixture {
        form: Element,
        name: Element,
        phone: Element,
        message: Element,
        submit: Element,
        status: Element,
    }

    fn fixture() -> Fixture {
        let name = Element::new("input")
            .with_attr("name", "name")
            .with_attr("required", "");
        let phone = Element::new("input")
            .with_attr("name", "phone")
            .with_attr("required", "");
        let message = Element::new("textarea")
            .with_attr("name", "message")
            .with_attr("required", "");
        let submit = Element::new("button").with_attr("type", "submit");
        let form = Element::new("form")
            .with_id("contact-form")
            .with_child(name.clone())
            .with_child(phone.clone())
            .with_child(message.clone())
            .with_child(submit.clone());
        Fixture {
            form,
            name,
            phone,
            message,
            submit,
            status: Element::new("p").with_id("form-status"),
        }
    }

    fn fill(f: &Fixture, name: &str, phone: &str, message: &str) {
        f.name.set_value(name);
        f.phone.set_value(phone);
        f.message.set_value(message);
    }

    fn mount(f: &Fixture, transport: Arc<MockTransport>) -> ContactForm {
        ContactForm::mount(f.form.clone(), f.status.clone(), transport).unwrap()
    }

    #[test]
    fn test_mount_requires_all_fields() {
        let f = fixture();
        let form = Element::new("form").with_child(f.name.clone());
        assert!(ContactForm::mount(form, f.status.clone(), Arc::new(MockTransport::new())).is_none());
    }

    #[tokio::test]
    async fn test_successful_submission_clears_fields() {
        let f = fixture();
        let transport = Arc::new(MockTransport::new().with_status(200).watching(&f.submit));
        let contact = mount(&f, transport.clone());
        fill(&f, "  Анна ", "+7 (916) 123-45-67", "Нужна консультация по <услуге>");

        assert_eq!(contact.submit().await, SubmitOutcome::Sent);

        assert_eq!(f.status.text(), SENT_MESSAGE);
        assert_eq!(f.status.style("color").as_deref(), Some(NEUTRAL_COLOR));
        assert!(f.name.value().is_empty());
        assert!(f.phone.value().is_empty());
        assert!(f.message.value().is_empty());
        assert!(!f.submit.is_disabled());

        let delivered = transport.delivered.lock().unwrap();
        assert_eq!(
            delivered[0],
            ContactPayload {
                name: "Анна".to_string(),
                phone: "+7 (916) 123-45-67".to_string(),
                message: "Нужна консультация по &lt;услуге&gt;".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_fields() {
        let f = fixture();
        let transport = Arc::new(MockTransport::new().with_status(500));
        let contact = mount(&f, transport.clone());
        fill(&f, "Al", "79161234567", "This is long enough.");

        assert_eq!(contact.submit().await, SubmitOutcome::Failed);

        assert_eq!(transport.calls(), 1);
        assert_eq!(f.status.text(), FAILED_MESSAGE);
        assert_eq!(f.status.style("color").as_deref(), Some(ERROR_COLOR));
        assert_eq!(f.name.value(), "Al");
        assert_eq!(f.message.value(), "This is long enough.");
        assert!(!f.submit.is_disabled());
    }

    #[tokio::test]
    async fn test_validation_failure_skips_network() {
        let f = fixture();
        let transport = Arc::new(MockTransport::new());
        let contact = mount(&f, transport.clone());
        fill(&f, "A", "79161234567", "short");

        assert_eq!(
            contact.submit().await,
            SubmitOutcome::Rejected(ContactIssue::NameTooShort)
        );
        assert_eq!(transport.calls(), 0);
        assert_eq!(f.status.text(), "Пожалуйста, укажите имя (мин. 2 символа).");
        assert_eq!(f.status.style("color").as_deref(), Some(ERROR_COLOR));
        assert!(!f.submit.is_disabled());

        fill(&f, "Al", "+7 (916) 123", "This is long enough.");
        assert_eq!(
            contact.submit().await,
            SubmitOutcome::Rejected(ContactIssue::PhoneMalformed)
        );
    }

    #[tokio::test]
    async fn test_constraint_violation_reports_natively() {
        let f = fixture();
        let transport = Arc::new(MockTransport::new());
        let contact = mount(&f, transport.clone());
        f.status.set_text("previous");
        fill(&f, "Al", "", "This is long enough.");

        assert_eq!(
            contact.submit().await,
            SubmitOutcome::ConstraintViolation {
                field: "phone".to_string()
            }
        );
        assert_eq!(f.phone.validation_message(), "Заполните это поле.");
        assert_eq!(f.status.text(), "previous");
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn test_minlength_constraint() {
        let field = Element::new("input")
            .with_attr("name", "name")
            .with_attr("minlength", "3");
        assert!(constraint_violation(&field).is_none());
        field.set_value("ab");
        assert!(constraint_violation(&field).is_some());
        field.set_value("abc");
        assert!(constraint_violation(&field).is_none());
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_busy() {
        let f = fixture();
        let gate = Arc::new(Notify::new());
        let transport = Arc::new(MockTransport::new().with_gate(gate.clone()));
        let contact = mount(&f, transport.clone());
        fill(&f, "Al", "79161234567", "This is long enough.");

        let pending = contact.begin().unwrap();
        assert!(f.submit.is_disabled());
        assert_eq!(f.status.text(), SENDING_MESSAGE);
        assert_eq!(contact.begin().unwrap_err(), SubmitOutcome::Busy);

        let in_flight = tokio::spawn({
            let contact = contact.clone();
            async move { contact.complete(pending).await }
        });
        tokio::task::yield_now().await;
        gate.notify_one();

        assert_eq!(in_flight.await.unwrap(), SubmitOutcome::Sent);
        assert_eq!(transport.calls(), 1);
        assert!(!f.submit.is_disabled());
    }

    #[tokio::test]
    async fn test_cancelled_delivery_still_reenables_submit() {
        let f = fixture();
        let gate = Arc::new(Notify::new());
        let transport = Arc::new(MockTransport::new().with_gate(gate));
        let contact = mount(&f, transport);
        fill(&f, "Al", "79161234567", "This is long enough.");

        let pending = contact.begin().unwrap();
        let in_flight = tokio::spawn({
            let contact = contact.clone();
            async move { contact.complete(pending).await }
        });
        tokio::task::yield_now().await;
        assert!(f.submit.is_disabled());

        in_flight.abort();
        assert!(in_flight.await.unwrap_err().is_cancelled());
        assert!(!f.submit.is_disabled());
    }
}
