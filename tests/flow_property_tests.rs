// Property-Based Testing for the Booking Lifecycle Flow
// Verifies machine invariants hold under arbitrary event sequences and payloads

use booking_flow::{
    legal_events, transition, BookingContext, BookingEvent, BookingFlow, BookingState,
};
use proptest::prelude::*;
use proptest_derive::Arbitrary;

// One send call: an event plus an optional context patch
#[derive(Debug, Clone, Arbitrary)]
struct ScriptStep {
    #[proptest(strategy = "event_strategy()")]
    event: BookingEvent,
    #[proptest(strategy = "patch_strategy()")]
    patch: Option<BookingContext>,
}

// A whole interaction session as the host would issue it
#[derive(Debug, Clone, Arbitrary)]
struct EventScript {
    #[proptest(strategy = "prop::collection::vec(any::<ScriptStep>(), 0..32)")]
    steps: Vec<ScriptStep>,
}

fn state_strategy() -> impl Strategy<Value = BookingState> {
    proptest::sample::select(BookingState::ALL.to_vec())
}

fn event_strategy() -> impl Strategy<Value = BookingEvent> {
    proptest::sample::select(BookingEvent::ALL.to_vec())
}

// Representative payloads hosts attach to events
fn patch_strategy() -> impl Strategy<Value = Option<BookingContext>> {
    prop_oneof![
        3 => Just(None),
        2 => "bk_[0-9]{4}".prop_map(|id| {
            Some(BookingContext {
                booking_id: Some(id),
                ..Default::default()
            })
        }),
        2 => (1u32..240).prop_map(|eta| {
            Some(BookingContext {
                eta_minutes: Some(eta),
                ..Default::default()
            })
        }),
        1 => Just(Some(BookingContext {
            error: Some("provider declined".to_string()),
            ..Default::default()
        })),
    ]
}

fn run_script(flow: &mut BookingFlow, script: &EventScript) {
    for step in &script.steps {
        match &step.patch {
            Some(patch) => flow.send_with(step.event, patch.clone()),
            None => flow.send(step.event),
        };
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;

    #[test]
    fn prop_unlisted_events_are_absorbed() {
        let mut runner = proptest::test_runner::TestRunner::default();

        runner
            .run(&(state_strategy(), event_strategy()), |(state, event)| {
                let next = transition(state, event, &BookingContext::default());

                if legal_events(state).contains(&event) {
                    prop_assert_ne!(next, state, "every listed row moves the machine");
                } else {
                    prop_assert_eq!(next, state, "unlisted event must be a no-op");
                }
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn prop_transition_is_deterministic_and_context_free() {
        let mut runner = proptest::test_runner::TestRunner::default();

        runner
            .run(
                &(state_strategy(), event_strategy(), patch_strategy()),
                |(state, event, patch)| {
                    let empty = BookingContext::default();
                    let mut rich = BookingContext {
                        service_category: Some("plumbing".to_string()),
                        ..Default::default()
                    };
                    if let Some(patch) = patch {
                        rich.apply(patch);
                    }

                    let first = transition(state, event, &empty);
                    let second = transition(state, event, &empty);
                    let with_context = transition(state, event, &rich);

                    prop_assert_eq!(first, second, "identical inputs, identical output");
                    prop_assert_eq!(
                        first,
                        with_context,
                        "decision depends only on (state, event)"
                    );
                    Ok(())
                },
            )
            .unwrap();
    }

    #[test]
    fn prop_replaying_a_script_is_deterministic() {
        let mut runner = proptest::test_runner::TestRunner::default();

        runner
            .run(
                &(state_strategy(), any::<EventScript>()),
                |(initial, script)| {
                    let seed = BookingContext {
                        service_category: Some("cleaning".to_string()),
                        ..Default::default()
                    };
                    let mut first = BookingFlow::with_initial(initial, seed.clone());
                    let mut second = BookingFlow::with_initial(initial, seed);

                    run_script(&mut first, &script);
                    run_script(&mut second, &script);

                    prop_assert_eq!(first.state(), second.state());
                    prop_assert_eq!(first.context(), second.context());
                    Ok(())
                },
            )
            .unwrap();
    }

    #[test]
    fn prop_payload_merge_is_independent_of_legality() {
        let mut runner = proptest::test_runner::TestRunner::default();

        runner
            .run(
                &(state_strategy(), event_strategy(), 1u32..240),
                |(state, event, eta)| {
                    let seed = BookingContext {
                        service_category: Some("ac_repair".to_string()),
                        booking_id: Some("bk_7".to_string()),
                        ..Default::default()
                    };
                    let mut flow = BookingFlow::with_initial(state, seed);

                    flow.send_with(
                        event,
                        BookingContext {
                            eta_minutes: Some(eta),
                            ..Default::default()
                        },
                    );

                    // Patch lands whether or not the event moved the machine.
                    prop_assert_eq!(flow.context().eta_minutes, Some(eta));
                    // Fields the patch did not mention are preserved.
                    prop_assert_eq!(
                        flow.context().service_category.as_deref(),
                        Some("ac_repair")
                    );
                    prop_assert_eq!(flow.context().booking_id.as_deref(), Some("bk_7"));
                    Ok(())
                },
            )
            .unwrap();
    }

    #[test]
    fn prop_closed_absorbs_all_scripts() {
        let mut runner = proptest::test_runner::TestRunner::default();

        runner
            .run(&any::<EventScript>(), |script| {
                let mut flow =
                    BookingFlow::with_initial(BookingState::Closed, BookingContext::default());
                run_script(&mut flow, &script);

                prop_assert_eq!(flow.state(), BookingState::Closed);
                prop_assert!(
                    flow.history().is_empty(),
                    "terminal state applies no transitions"
                );
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn prop_history_chains_without_gaps() {
        let mut runner = proptest::test_runner::TestRunner::default();

        runner
            .run(&any::<EventScript>(), |script| {
                let mut flow = BookingFlow::new();
                run_script(&mut flow, &script);

                let history = flow.history();
                for pair in history.windows(2) {
                    prop_assert_eq!(pair[0].to, pair[1].from, "records must chain");
                }
                match history.last() {
                    Some(last) => prop_assert_eq!(last.to, flow.state()),
                    None => prop_assert_eq!(flow.state(), BookingState::Idle),
                }
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_property_framework_setup() {
        // Basic test to ensure the property testing machinery is wired up
        let mut flow = BookingFlow::new();
        flow.send(BookingEvent::Start);
        assert_eq!(flow.state(), BookingState::Draft);
        assert_eq!(
            transition(
                BookingState::Idle,
                BookingEvent::Start,
                &BookingContext::default()
            ),
            BookingState::Draft
        );

        println!("✅ Property testing framework setup complete");
    }
}
