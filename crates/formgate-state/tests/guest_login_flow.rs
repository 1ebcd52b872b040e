//! End-to-end guest login flow: draft → validate → submit → route →
//! dispatch, against an in-process transport.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use formgate_core::CaseId;
use formgate_schema::{guest_login_validator, Locale, ValidatedValue};
use formgate_state::{
    ActionDispatcher, Navigator, NotificationSink, RouteTable, SubmissionController,
    SubmissionOutcome, SubmissionStatus, SubmitReport, Transport, TransportError,
};

struct FixedTransport {
    result: Result<SubmissionOutcome, TransportError>,
    calls: AtomicUsize,
}

impl FixedTransport {
    fn new(result: Result<SubmissionOutcome, TransportError>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Transport for FixedTransport {
    async fn submit(&self, _value: &ValidatedValue) -> Result<SubmissionOutcome, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

#[derive(Default)]
struct Screen {
    navigations: Mutex<Vec<String>>,
    toasts: Mutex<Vec<String>>,
}

impl Navigator for &Screen {
    fn navigate(&self, path: &str) {
        self.navigations.lock().unwrap().push(path.to_string());
    }
}

impl NotificationSink for &Screen {
    fn notify(&self, message: &str) {
        self.toasts.lock().unwrap().push(message.to_string());
    }
}

async fn run(
    username: &str,
    result: Result<SubmissionOutcome, TransportError>,
    locale: Locale,
) -> (Screen, SubmitReport, SubmissionController<FixedTransport>) {
    let controller = SubmissionController::new(
        guest_login_validator(locale).unwrap(),
        FixedTransport::new(result),
    );
    controller.set_field("username", username);

    let report = controller.submit().await;

    let routes = RouteTable::for_locale(locale);
    let router = routes.router();
    let screen = Screen::default();
    {
        let dispatcher = ActionDispatcher::new(routes, &screen, &screen);
        if let Some(action) = router.route_report(&report) {
            dispatcher.dispatch(&action);
        }
    }
    (screen, report, controller)
}

#[tokio::test]
async fn in_case_session_opens_its_case() {
    let outcome = SubmissionOutcome::in_case(CaseId::new("42").unwrap());
    let (screen, _, controller) = run("alex", Ok(outcome), Locale::En).await;

    assert_eq!(*screen.navigations.lock().unwrap(), vec!["/case/42".to_string()]);
    assert!(screen.toasts.lock().unwrap().is_empty());
    assert_eq!(controller.status(), SubmissionStatus::Succeeded);
}

#[tokio::test]
async fn free_session_opens_listing() {
    let (screen, _, _) = run("alex", Ok(SubmissionOutcome::listing()), Locale::En).await;
    assert_eq!(*screen.navigations.lock().unwrap(), vec!["/rooms".to_string()]);
}

#[tokio::test]
async fn transport_failure_shows_one_toast_and_keeps_draft() {
    let failure = TransportError::Rejected {
        status: 500,
        code: Some("INTERNAL".to_string()),
        message: "boom".to_string(),
        fields: Vec::new(),
    };
    let (screen, report, controller) = run("alex", Err(failure), Locale::Ko).await;

    assert!(matches!(report, SubmitReport::Completed(Err(_))));
    assert!(screen.navigations.lock().unwrap().is_empty());
    assert_eq!(
        *screen.toasts.lock().unwrap(),
        vec!["로그인에 실패했습니다. 다시 시도해주세요.".to_string()]
    );
    assert_eq!(
        controller.draft().get("username"),
        Some(&serde_json::json!("alex"))
    );
    assert_eq!(controller.transport().calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn blank_username_is_shown_inline_only() {
    let (screen, report, controller) =
        run("   ", Ok(SubmissionOutcome::listing()), Locale::Ko).await;

    assert!(matches!(report, SubmitReport::Invalid(_)));
    assert!(screen.navigations.lock().unwrap().is_empty());
    assert!(screen.toasts.lock().unwrap().is_empty());
    assert_eq!(
        controller.field_errors("username"),
        vec!["공백만 입력할 수 없습니다".to_string()]
    );
    assert_eq!(controller.transport().calls.load(Ordering::SeqCst), 0);
}
