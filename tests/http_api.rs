mod support;

use support::mock_server::{MockServer, closed_address};

use support_widget::support_api::api::{GENERIC_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE};
use support_widget::support_api::{
    HttpSupportApi, SubmitContext, SupportApi, SupportApiError, TicketQuery, TicketStatus,
    TicketSubmission,
};

const CONFIG_BODY: &str = r##"{
    "app_id": "portal",
    "app_name": "Portal",
    "categories": [
        {"id": "bug", "label": "Bug", "icon": "🐛"},
        {"id": "question", "label": "Question", "icon": "❓"}
    ],
    "branding": {"primary_color": "#111111"}
}"##;

fn submission() -> TicketSubmission {
    TicketSubmission {
        app_id: "portal".into(),
        category: "bug".into(),
        subject: "Login page broken".into(),
        description: "The sign-in button does nothing.".into(),
        user_email: "me@example.com".into(),
        user_name: None,
        priority: 2,
        context: SubmitContext {
            url: Some("https://portal.example.com".into()),
            os: Some("linux".into()),
            ..SubmitContext::default()
        },
    }
}

#[test]
fn fetch_config_uses_app_path() {
    let server = MockServer::respond_once(200, CONFIG_BODY);
    let api_url = format!("{}/support/", server.base_url);
    let config = HttpSupportApi.fetch_config(&api_url, "my app").unwrap();

    let request = server.request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.target, "/support/config/my%20app");
    assert_eq!(config.app_name, "Portal");
    assert_eq!(config.categories.len(), 2);
    assert_eq!(config.branding.primary_color, "#111111");
    assert_eq!(config.branding.accent_color, "#10b981");
    assert!(config.fields.priority);
}

#[test]
fn missing_config_is_rejected() {
    let server = MockServer::respond_once(404, r#"{"detail":"Unknown app"}"#);
    let err = HttpSupportApi
        .fetch_config(&server.base_url, "nope")
        .unwrap_err();
    assert_eq!(
        err,
        SupportApiError::Rejected {
            status: 404,
            message: "Unknown app".into(),
        }
    );
}

#[test]
fn submit_posts_json_payload() {
    let server = MockServer::respond_once(
        201,
        r#"{"ticket_id":"T-100","devops_work_item_id":42,"status":"created","message":"Thanks!"}"#,
    );
    let response = HttpSupportApi
        .submit_ticket(&server.base_url, &submission())
        .unwrap();
    assert_eq!(response.ticket_id, "T-100");
    assert_eq!(response.devops_work_item_id, Some(42));
    assert_eq!(response.message, "Thanks!");

    let request = server.request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.target, "/submit");
    let body = request.json();
    assert_eq!(body["app_id"], "portal");
    assert_eq!(body["priority"], 2);
    assert_eq!(body["user_email"], "me@example.com");
    assert!(body.get("user_name").is_none());
    assert_eq!(body["context"]["os"], "linux");
    assert!(body["context"].get("browser").is_none());
}

#[test]
fn field_level_rejection_becomes_banner_text() {
    let server = MockServer::respond_once(
        422,
        r#"{"detail":[{"loc":["body","email"],"msg":"invalid format","type":"value_error"}]}"#,
    );
    let err = HttpSupportApi
        .submit_ticket(&server.base_url, &submission())
        .unwrap_err();
    assert_eq!(err.banner_message(), "email: invalid format");
    assert!(matches!(err, SupportApiError::Rejected { status: 422, .. }));
}

#[test]
fn undecodable_success_body_uses_generic_banner() {
    let server = MockServer::respond_once(201, "<html>oops</html>");
    let err = HttpSupportApi
        .submit_ticket(&server.base_url, &submission())
        .unwrap_err();
    assert!(matches!(err, SupportApiError::Json(_)));
    assert_eq!(err.banner_message(), GENERIC_ERROR_MESSAGE);
}

#[test]
fn unreachable_backend_is_a_network_error() {
    let err = HttpSupportApi
        .submit_ticket(&closed_address(), &submission())
        .unwrap_err();
    assert!(matches!(err, SupportApiError::Transport(_)));
    assert_eq!(err.banner_message(), NETWORK_ERROR_MESSAGE);
}

#[test]
fn list_tickets_sends_filters_and_limit() {
    let server = MockServer::respond_once(
        200,
        r#"[
            {"ticket_id":"SUP-2","subject":"Save fails","status":"in-progress","priority":1,
             "created_at":"2024-01-15T10:30:00Z"},
            {"ticket_id":"SUP-1","subject":"Typo","status":null}
        ]"#,
    );
    let query = TicketQuery::for_session("portal", "me@example.com");
    let tickets = HttpSupportApi
        .list_tickets(&server.base_url, &query)
        .unwrap();

    let request = server.request();
    assert_eq!(request.method, "GET");
    assert_eq!(
        request.target,
        "/tickets?app_id=portal&email=me%40example.com&limit=25"
    );
    assert_eq!(tickets.len(), 2);
    assert_eq!(tickets[0].status, TicketStatus::InProgress);
    assert_eq!(tickets[0].priority, Some(1));
    assert_eq!(tickets[1].status, TicketStatus::Other(String::new()));
    assert_eq!(tickets[1].created_at, None);
}

#[test]
fn blank_filters_are_left_out() {
    let server = MockServer::respond_once(200, "[]");
    let tickets = HttpSupportApi
        .list_tickets(&server.base_url, &TicketQuery::for_session("", " "))
        .unwrap();
    assert!(tickets.is_empty());
    assert_eq!(server.request().target, "/tickets?limit=25");
}
