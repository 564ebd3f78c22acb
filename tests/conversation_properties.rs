//! Property tests for the conversation controller.
//!
//! Each case builds its own single-threaded runtime; the strategies stay
//! small so a full proptest run is still quick.

use std::sync::Arc;

use proptest::prelude::*;

use ai_console::adapters::completion::MockCompletionClient;
use ai_console::domain::conversation::{ConversationController, Role, SubmitError};
use ai_console::ports::CompletionError;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    /// Any non-blank draft produces exactly one user message, one network
    /// call, and one assistant reply - regardless of content.
    #[test]
    fn any_nonblank_draft_is_one_turn(text in "\\PC{1,64}") {
        prop_assume!(!text.trim().is_empty());

        runtime().block_on(async {
            let client = MockCompletionClient::new().with_response("reply");
            let calls = client.call_log();
            let mut controller =
                ConversationController::new(Arc::new(client), "test-model");

            controller.set_draft(text.clone());
            let reply = controller.submit().await.unwrap();

            prop_assert_eq!(reply.role(), Role::Assistant);
            prop_assert_eq!(calls.lock().unwrap().len(), 1);

            let snapshot = controller.snapshot();
            prop_assert_eq!(snapshot.messages.len(), 2);
            prop_assert_eq!(snapshot.messages[0].role(), Role::User);
            // Submitted text survives verbatim, whitespace included.
            prop_assert_eq!(snapshot.messages[0].text(), text.as_str());
            prop_assert_eq!(snapshot.draft.as_str(), "");
            prop_assert!(!snapshot.pending);
            Ok(())
        })?;
    }

    /// Blank drafts never mutate state or reach the network.
    #[test]
    fn blank_drafts_never_reach_the_network(text in "[ \\t\\r\\n]{0,16}") {
        runtime().block_on(async {
            let client = MockCompletionClient::new();
            let calls = client.call_log();
            let mut controller =
                ConversationController::new(Arc::new(client), "test-model");

            controller.set_draft(text.clone());
            let result = controller.submit().await;

            prop_assert!(matches!(result, Err(SubmitError::EmptyDraft)));
            prop_assert_eq!(calls.lock().unwrap().len(), 0);
            prop_assert!(controller.snapshot().messages.is_empty());
            Ok(())
        })?;
    }

    /// Every failure path leaves the controller idle with the user message
    /// kept and the error surfaced as a message entry.
    #[test]
    fn failures_always_return_to_idle(message in "\\PC{1,32}", status in 400u16..600) {
        runtime().block_on(async {
            let client = MockCompletionClient::new()
                .with_error(CompletionError::upstream(status, message));
            let mut controller =
                ConversationController::new(Arc::new(client), "test-model");

            controller.set_draft("hello");
            let result = controller.submit().await;

            prop_assert!(matches!(result, Err(SubmitError::Completion(_))));
            let snapshot = controller.snapshot();
            prop_assert!(!snapshot.pending);
            prop_assert_eq!(snapshot.messages.len(), 2);
            prop_assert_eq!(snapshot.messages[0].role(), Role::User);
            prop_assert_eq!(snapshot.messages[1].role(), Role::Error);
            Ok(())
        })?;
    }
}
