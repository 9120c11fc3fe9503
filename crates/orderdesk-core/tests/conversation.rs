use orderdesk_core::action::RemoteAction;
use orderdesk_core::dispatcher::{ChatEvent, CommandDispatcher, Reply};
use orderdesk_core::panel::{PanelApi, PanelError, PanelRequest, PanelResponse};
use orderdesk_core::session::{InMemorySessionStore, SessionStore, UserPhase};
use std::sync::{Arc, Mutex};

/// Panel that answers with a fixed body and records every request.
struct ScriptedPanel {
    body: &'static str,
    requests: Mutex<Vec<PanelRequest>>,
}

impl ScriptedPanel {
    fn new(body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            body,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<PanelRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl PanelApi for ScriptedPanel {
    async fn call(&self, request: PanelRequest) -> Result<PanelResponse, PanelError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        PanelResponse::parse(self.body)
    }
}

struct Harness {
    dispatcher: CommandDispatcher,
    sessions: Arc<InMemorySessionStore>,
    panel: Arc<ScriptedPanel>,
}

impl Harness {
    fn new(body: &'static str) -> Self {
        let sessions = Arc::new(InMemorySessionStore::new());
        let panel = ScriptedPanel::new(body);
        let dispatcher = CommandDispatcher::new(sessions.clone(), panel.clone());
        Self {
            dispatcher,
            sessions,
            panel,
        }
    }

    async fn send(&self, event: ChatEvent) -> Vec<Reply> {
        self.dispatcher.handle(event).await.expect("dispatch")
    }

    async fn login(&self, user_id: i64, key: &str) {
        self.send(ChatEvent::start(user_id)).await;
        self.send(ChatEvent::text(user_id, key)).await;
    }
}

#[tokio::test]
async fn test_full_status_conversation() {
    let harness =
        Harness::new(r#"{"status":"Completed","link":"http://x","service":"Likes"}"#);

    let replies = harness.send(ChatEvent::start(100)).await;
    assert_eq!(
        replies,
        vec![Reply::send("👋 Welcome! Please send your API Key to continue:")]
    );

    let replies = harness.send(ChatEvent::text(100, "abc123")).await;
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0].text(), "✅ API Key saved successfully.");
    assert_eq!(replies[1], Reply::menu());

    let replies = harness.send(ChatEvent::button(100, "status")).await;
    assert_eq!(
        replies,
        vec![Reply::edit("📩 Please send the Order ID for Status:")]
    );

    let replies = harness.send(ChatEvent::text(100, "42")).await;
    assert_eq!(
        replies,
        vec![Reply::send(
            "📦 Order Status:\nID: 42\nService: Likes\nLink: http://x\nStatus: Completed"
        )]
    );

    assert_eq!(
        harness.panel.requests(),
        vec![PanelRequest::for_order("abc123", RemoteAction::Status, "42")]
    );
    assert_eq!(harness.sessions.phase(100).await, Ok(Some(UserPhase::Ready)));
}

#[tokio::test]
async fn test_remote_error_text_depends_on_action() {
    let harness = Harness::new(r#"{"error":"Not enough funds"}"#);
    harness.login(1, "k").await;

    harness.send(ChatEvent::button(1, "refill")).await;
    let replies = harness.send(ChatEvent::text(1, "7")).await;
    assert_eq!(replies, vec![Reply::send("♻️ Refill not allowed.")]);

    harness.send(ChatEvent::button(1, "status")).await;
    let replies = harness.send(ChatEvent::text(1, "7")).await;
    assert_eq!(replies, vec![Reply::send("❌ Not enough funds")]);

    harness.send(ChatEvent::button(1, "cancel")).await;
    let replies = harness.send(ChatEvent::text(1, "7")).await;
    assert_eq!(replies, vec![Reply::send("❌ Not enough funds")]);
}

#[tokio::test]
async fn test_balance_is_idempotent() {
    let harness = Harness::new(r#"{"balance":"100.84","currency":"USD"}"#);
    harness.login(1, "k").await;

    let first = harness.send(ChatEvent::button(1, "balance")).await;
    let second = harness.send(ChatEvent::button(1, "balance")).await;

    assert_eq!(first, vec![Reply::edit("💰 Balance: 100.84 USD")]);
    assert_eq!(first, second);
    assert_eq!(harness.sessions.get_pending(1).await, Ok(None));
    assert_eq!(harness.sessions.phase(1).await, Ok(Some(UserPhase::Ready)));
    assert_eq!(
        harness.panel.requests(),
        vec![PanelRequest::balance("k"), PanelRequest::balance("k")]
    );
}

#[tokio::test]
async fn test_balance_error_reply_shows_zero_balance() {
    let harness = Harness::new(r#"{"error":"Invalid API key"}"#);
    harness.login(1, "bad-key").await;

    let replies = harness.send(ChatEvent::button(1, "balance")).await;

    assert_eq!(replies, vec![Reply::edit("💰 Balance: 0 USD")]);
    assert_eq!(harness.panel.requests(), vec![PanelRequest::balance("bad-key")]);
}

#[tokio::test]
async fn test_every_order_action_consumes_pending_once() {
    for tag in ["status", "cancel", "refill", "speedup"] {
        let harness = Harness::new(r#"{"status":"Pending"}"#);
        harness.login(1, "k").await;

        harness.send(ChatEvent::button(1, tag)).await;
        let first = harness.send(ChatEvent::text(1, "12345")).await;
        let second = harness.send(ChatEvent::text(1, "12345")).await;

        assert_eq!(first.len(), 1, "action {tag}");
        assert!(second.is_empty(), "action {tag}");
        assert_eq!(harness.panel.requests().len(), 1, "action {tag}");
    }
}

#[tokio::test]
async fn test_malformed_reply_never_escapes() {
    let harness = Harness::new("<html>Bad Gateway</html>");
    harness.login(1, "k").await;

    let replies = harness.send(ChatEvent::button(1, "balance")).await;
    assert_eq!(
        replies,
        vec![Reply::edit("❌ Failed to fetch balance. Check your API key.")]
    );

    let expected = [
        ("status", "❌ Failed to fetch status."),
        ("cancel", "❌ Failed to cancel order."),
        ("refill", "❌ Failed to send refill request."),
        ("speedup", "❌ Failed to process speed up."),
    ];
    for (tag, text) in expected {
        harness.send(ChatEvent::button(1, tag)).await;
        let replies = harness.send(ChatEvent::text(1, "1")).await;
        assert_eq!(replies, vec![Reply::send(text)], "action {tag}");
    }
}

#[tokio::test]
async fn test_new_button_replaces_pending_action() {
    let harness = Harness::new(r#"{"status":"Partial"}"#);
    harness.login(1, "k").await;

    harness.send(ChatEvent::button(1, "cancel")).await;
    harness.send(ChatEvent::button(1, "refill")).await;
    let replies = harness.send(ChatEvent::text(1, "77")).await;

    assert_eq!(replies, vec![Reply::send("♻️ Refill request sent!")]);
    assert_eq!(
        harness.panel.requests(),
        vec![PanelRequest::for_order("k", RemoteAction::Refill, "77")]
    );
}

#[tokio::test]
async fn test_users_are_isolated() {
    let harness = Harness::new(r#"{"status":"Completed"}"#);
    harness.login(1, "key-one").await;
    harness.login(2, "key-two").await;

    harness.send(ChatEvent::button(1, "status")).await;
    let replies = harness.send(ChatEvent::text(2, "5")).await;
    assert!(replies.is_empty());

    harness.send(ChatEvent::text(1, "5")).await;
    assert_eq!(
        harness.panel.requests(),
        vec![PanelRequest::for_order("key-one", RemoteAction::Status, "5")]
    );
}
