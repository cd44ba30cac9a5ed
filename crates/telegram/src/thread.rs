//! Forum-topic selection for panel replies.

use {
    tgpanel_common::{ChatId, ThreadId},
    tgpanel_sessions::SessionRecord,
};

/// Pick the forum topic a panel reply should be posted into.
///
/// First match wins:
/// 1. `explicit_thread_id`, the topic the triggering event came from;
/// 2. the thread of the session's remembered panel, but only when that panel
///    was rendered in `current_chat_id` (topic ids from another chat mean
///    nothing here);
/// 3. `None`: send without topic targeting.
///
/// Pure and total: every combination of absent session, absent panel and
/// absent thread yields a value.
pub fn resolve_panel_thread_id(
    session: Option<&SessionRecord>,
    current_chat_id: ChatId,
    explicit_thread_id: Option<ThreadId>,
) -> Option<ThreadId> {
    explicit_thread_id.or_else(|| session?.panel_in_chat(current_chat_id)?.message_thread_id)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        rstest::rstest,
        tgpanel_common::{MessageId, UserId},
        tgpanel_sessions::{PanelMessage, SessionState},
    };

    fn panel_session(chat: i64, thread: Option<i32>) -> SessionRecord {
        let mut session = SessionRecord::new(UserId(1));
        session.record_panel(PanelMessage {
            chat_id: ChatId(chat),
            message_id: MessageId(50),
            panel_id: "main".into(),
            message_thread_id: thread.map(ThreadId),
        });
        session
    }

    fn idle_session() -> SessionRecord {
        SessionRecord::new(UserId(2))
    }

    #[rstest]
    #[case::same_chat_reuses_thread(Some(panel_session(123, Some(77))), 123, None, Some(77))]
    #[case::other_chat_gets_nothing(Some(panel_session(123, Some(77))), 456, None, None)]
    #[case::explicit_wins_cross_chat(Some(panel_session(123, Some(77))), 456, Some(99), Some(99))]
    #[case::no_session(None, 123, None, None)]
    #[case::session_without_panel(Some(idle_session()), 123, None, None)]
    fn resolves(
        #[case] session: Option<SessionRecord>,
        #[case] chat: i64,
        #[case] explicit: Option<i32>,
        #[case] expected: Option<i32>,
    ) {
        assert_eq!(
            resolve_panel_thread_id(session.as_ref(), ChatId(chat), explicit.map(ThreadId)),
            expected.map(ThreadId)
        );
    }

    #[test]
    fn explicit_thread_always_wins() {
        let sessions = [
            None,
            Some(idle_session()),
            Some(panel_session(123, None)),
            Some(panel_session(123, Some(77))),
            Some(panel_session(-100_555, Some(3))),
        ];
        for session in &sessions {
            for chat in [123, 456, -100_555] {
                for thread in [1, 77, 99] {
                    assert_eq!(
                        resolve_panel_thread_id(session.as_ref(), ChatId(chat), Some(ThreadId(thread))),
                        Some(ThreadId(thread)),
                        "session={session:?} chat={chat}"
                    );
                }
            }
        }
    }

    #[test]
    fn same_chat_returns_remembered_thread_even_when_absent() {
        let session = panel_session(123, None);
        assert_eq!(resolve_panel_thread_id(Some(&session), ChatId(123), None), None);
    }

    #[test]
    fn no_session_is_none_for_any_chat() {
        for chat in [0, 1, 123, -100_123_456] {
            assert_eq!(resolve_panel_thread_id(None, ChatId(chat), None), None);
        }
    }

    #[test]
    fn panel_thread_does_not_leak_across_chats() {
        let session = panel_session(-100_123, Some(42));
        for chat in [-100_124, 100_123, 1] {
            assert_eq!(resolve_panel_thread_id(Some(&session), ChatId(chat), None), None);
        }
    }

    #[test]
    fn session_state_does_not_matter_without_panel() {
        let mut session = idle_session();
        session.set_state(SessionState::Panel {
            panel_id: "main".into(),
        });
        assert_eq!(resolve_panel_thread_id(Some(&session), ChatId(123), None), None);
    }

    #[test]
    fn repeated_calls_agree() {
        let session = panel_session(123, Some(77));
        let first = resolve_panel_thread_id(Some(&session), ChatId(123), None);
        for _ in 0..10 {
            assert_eq!(resolve_panel_thread_id(Some(&session), ChatId(123), None), first);
        }
    }
}
