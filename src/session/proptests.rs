//! Property-based tests for session bookkeeping
//!
//! - The user-turn counter always equals the number of user turns
//! - The topic is always the first user turn's text
//! - The context window never exceeds its size and is the history's tail

use super::*;
use proptest::prelude::*;

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![
        3 => Just(Role::User),
        2 => Just(Role::Assistant),
        1 => Just(Role::System),
    ]
}

fn arb_turn() -> impl Strategy<Value = (Role, String)> {
    (arb_role(), "[a-zA-Z0-9 .,!?]{1,40}")
}

proptest! {
    #[test]
    fn user_turn_count_matches_history(turns in proptest::collection::vec(arb_turn(), 0..30)) {
        let mut session = Session::new();
        for (role, text) in &turns {
            session.append_turn(*role, text.clone(), "en");
        }

        let users = session.history().iter().filter(|t| t.role == Role::User).count();
        prop_assert_eq!(session.snapshot().user_turn_count, users);
    }

    #[test]
    fn topic_is_first_user_text(turns in proptest::collection::vec(arb_turn(), 0..30)) {
        let mut session = Session::new();
        for (role, text) in &turns {
            session.append_turn(*role, text.clone(), "en");
        }

        let expected = turns
            .iter()
            .find(|(role, _)| *role == Role::User)
            .map(|(_, text)| text.clone());
        prop_assert_eq!(session.snapshot().topic, expected);
    }

    #[test]
    fn window_is_bounded_tail(
        turns in proptest::collection::vec(arb_turn(), 0..30),
        n in 0usize..8,
    ) {
        let mut session = Session::new();
        for (role, text) in &turns {
            session.append_turn(*role, text.clone(), "en");
        }

        let window = session.recent_window(n);
        prop_assert!(window.len() <= n);
        prop_assert_eq!(window.len(), n.min(turns.len()));

        let history = session.history();
        prop_assert_eq!(window, &history[history.len() - window.len()..]);
    }
}
