//! Property-based tests for task reference parsing and the polling schedule.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use std::time::Duration;

    use crate::error::Error;
    use crate::poll::{classify, poll, RetryPolicy};
    use crate::task::task_id_from_ref;
    use crate::test_support::{FakeApi, RecordingPause};
    use proptest::prelude::*;

    fn status_strategy() -> impl Strategy<Value = Option<&'static str>> {
        prop_oneof![
            Just(None),
            Just(Some("RUNNING")),
            Just(Some("NOT_STARTED")),
            Just(Some("SUCCEEDED")),
            Just(Some("STOPPED")),
            Just(Some("SKIPPED")),
            Just(Some("TERMINAL")),
            Just(Some("FAILED_CONTINUE")),
        ]
    }

    fn is_terminal(status: Option<&str>) -> bool {
        matches!(
            status,
            Some("SUCCEEDED" | "STOPPED" | "SKIPPED" | "TERMINAL" | "FAILED_CONTINUE")
        )
    }

    // ============================================================================
    // task_id_from_ref property tests
    // ============================================================================

    proptest! {
        /// Property: the ID is always the segment after the last slash
        #[test]
        fn task_id_is_last_segment(prefix in "[a-z/]*", id in "[A-Za-z0-9_-]+") {
            let reference = format!("{}/{}", prefix, id);
            prop_assert_eq!(task_id_from_ref(&reference).unwrap(), id);
        }

        /// Property: references without a slash are always rejected
        #[test]
        fn task_ref_without_slash_rejected(reference in "[^/]*") {
            let is_protocol_error = matches!(task_id_from_ref(&reference), Err(Error::Protocol { .. }));
            prop_assert!(is_protocol_error);
        }
    }

    // ============================================================================
    // poll property tests
    // ============================================================================

    proptest! {
        /// Property: the poller stops at the first terminal status, or after five checks
        #[test]
        fn poll_stops_at_first_terminal_or_budget(
            statuses in proptest::collection::vec(status_strategy(), 0..8)
        ) {
            let api = FakeApi::new().with_statuses(&statuses);
            let pause = RecordingPause::default();

            let outcome = poll(&api, "abc123", &RetryPolicy::default(), &pause).unwrap();

            let expected = statuses
                .iter()
                .take(5)
                .position(|s| is_terminal(*s))
                .map_or(5, |idx| idx + 1) as u32;
            prop_assert_eq!(api.get_calls(), expected);
            prop_assert_eq!(outcome.attempts, expected);

            let expected_delays: Vec<Duration> = (1..expected)
                .map(|n| Duration::from_secs(u64::from(n * n)))
                .collect();
            prop_assert_eq!(pause.delays(), expected_delays);
        }

        /// Property: classification succeeds only for success statuses
        #[test]
        fn classify_succeeds_only_on_success_status(status in status_strategy()) {
            let api = FakeApi::new().with_statuses(&[status]);
            let policy = RetryPolicy::new(1, |_| Duration::ZERO);

            let outcome = poll(&api, "abc123", &policy, &RecordingPause::default()).unwrap();
            let succeeded = classify(outcome).is_ok();

            prop_assert_eq!(
                succeeded,
                matches!(status, Some("SUCCEEDED" | "STOPPED" | "SKIPPED"))
            );
        }
    }
}
