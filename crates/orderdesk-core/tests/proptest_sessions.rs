use orderdesk_core::dispatcher::{ChatEvent, CommandDispatcher, Reply};
use orderdesk_core::panel::{PanelApi, PanelError, PanelRequest, PanelResponse};
use orderdesk_core::session::{InMemorySessionStore, SessionStore};
use proptest::prelude::*;
use std::sync::Arc;

struct UnreachablePanel;

#[async_trait::async_trait]
impl PanelApi for UnreachablePanel {
    async fn call(&self, _request: PanelRequest) -> Result<PanelResponse, PanelError> {
        Err(PanelError::Network("panel must not be called".to_string()))
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime")
}

proptest! {
    #[test]
    fn buttons_without_credential_set_nothing(
        user_id in any::<i64>(),
        tag in prop_oneof![
            Just("status".to_string()),
            Just("cancel".to_string()),
            Just("refill".to_string()),
            Just("speedup".to_string()),
            Just("balance".to_string()),
            "[a-z_]{0,12}",
        ],
        started in any::<bool>(),
    ) {
        let rt = runtime();
        let sessions = Arc::new(InMemorySessionStore::new());
        let dispatcher = CommandDispatcher::new(sessions.clone(), Arc::new(UnreachablePanel));

        let (replies, pending, credential) = rt.block_on(async {
            if started {
                dispatcher.handle(ChatEvent::start(user_id)).await.expect("start");
            }
            let replies = dispatcher
                .handle(ChatEvent::button(user_id, tag.clone()))
                .await
                .expect("button");
            (
                replies,
                sessions.get_pending(user_id).await.expect("pending"),
                sessions.get_credential(user_id).await.expect("credential"),
            )
        });

        prop_assert_eq!(
            replies,
            vec![Reply::edit("⚠️ API Key not found. Please use /start to enter it.")]
        );
        prop_assert_eq!(pending, None);
        prop_assert_eq!(credential, None);
    }

    #[test]
    fn any_submitted_credential_creates_one_session(
        user_id in any::<i64>(),
        key in "[A-Za-z0-9]{1,40}",
    ) {
        let rt = runtime();
        let sessions = Arc::new(InMemorySessionStore::new());
        let dispatcher = CommandDispatcher::new(sessions.clone(), Arc::new(UnreachablePanel));

        let (replies, count, stored) = rt.block_on(async {
            dispatcher.handle(ChatEvent::start(user_id)).await.expect("start");
            let replies = dispatcher
                .handle(ChatEvent::text(user_id, key.clone()))
                .await
                .expect("text");
            (
                replies,
                sessions.session_count().await,
                sessions.get_credential(user_id).await.expect("credential"),
            )
        });

        prop_assert_eq!(replies.last(), Some(&Reply::menu()));
        prop_assert_eq!(count, 1);
        prop_assert_eq!(stored, Some(key));
    }
}
