//! Property-based tests for the calculator core.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated command sequences.

use proptest::prelude::*;
use rpn_core::checkpoint::Checkpoint;
use rpn_core::core::{CalcError, CalculatorState, Command, OperatorKey, Snapshot};

prop_compose! {
    fn arbitrary_number()(whole in -1000i32..1000, frac in 0u32..100) -> String {
        format!("{whole}.{frac:02}")
    }
}

fn arbitrary_operator() -> impl Strategy<Value = OperatorKey> {
    prop::sample::select(OperatorKey::ALL.to_vec())
}

fn arbitrary_edit() -> impl Strategy<Value = Command> {
    prop_oneof![
        3 => arbitrary_number().prop_map(Command::enter),
        2 => arbitrary_operator().prop_map(Command::operator),
        1 => Just(Command::Clear),
        1 => prop::sample::select(vec!["", "-", ".", "-.", "abc", "1e999"])
            .prop_map(Command::enter),
    ]
}

fn arbitrary_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        6 => arbitrary_edit(),
        1 => Just(Command::Undo),
        1 => Just(Command::Redo),
    ]
}

fn run(commands: &[Command]) -> CalculatorState {
    commands
        .iter()
        .fold(CalculatorState::new(), |state, command| state.dispatch(command))
}

/// Apply `commands`, returning the snapshot that each recorded history entry
/// will hand back on undo, oldest first.
fn run_recording(commands: &[Command]) -> (CalculatorState, Vec<Snapshot>) {
    let mut state = CalculatorState::new();
    let mut snapshots = vec![state.snapshot().clone()];
    for command in commands {
        let next = state.dispatch(command);
        if next.history().undo_depth() > state.history().undo_depth() {
            snapshots.push(next.snapshot().clone());
        } else if let Some(last) = snapshots.last_mut() {
            // Error-only changes replace the current snapshot in place.
            *last = next.snapshot().clone();
        }
        state = next;
    }
    (state, snapshots)
}

proptest! {
    #[test]
    fn dispatch_is_deterministic(commands in prop::collection::vec(arbitrary_command(), 0..30)) {
        prop_assert_eq!(run(&commands), run(&commands));
    }

    #[test]
    fn stack_never_holds_non_finite_values(
        commands in prop::collection::vec(arbitrary_command(), 0..40)
    ) {
        let state = run(&commands);
        prop_assert!(state.snapshot().values().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn undo_redo_round_trip(commands in prop::collection::vec(arbitrary_edit(), 1..25)) {
        let (mut state, snapshots) = run_recording(&commands);
        let recorded = snapshots.len() - 1;
        prop_assert_eq!(state.history().undo_depth(), recorded);

        for expected in snapshots.iter().rev().skip(1) {
            state = state.dispatch(&Command::Undo);
            prop_assert_eq!(state.snapshot(), expected);
        }
        prop_assert!(!state.can_undo());
        prop_assert!(state.snapshot().values().is_empty());

        for expected in snapshots.iter().skip(1) {
            state = state.dispatch(&Command::Redo);
            prop_assert_eq!(state.snapshot(), expected);
        }
        prop_assert!(!state.can_redo());
    }

    #[test]
    fn new_edit_after_undo_invalidates_redo(
        commands in prop::collection::vec(arbitrary_number(), 2..10),
        fresh in arbitrary_number()
    ) {
        let entries: Vec<Command> = commands.into_iter().map(Command::enter).collect();
        let state = run(&entries).dispatch(&Command::Undo);
        prop_assert!(state.can_redo());

        let state = state.dispatch(&Command::enter(fresh));
        prop_assert!(!state.can_redo());
        prop_assert_eq!(state.dispatch(&Command::Redo), state);
    }

    #[test]
    fn binary_operators_use_rpn_order(a in -1e6f64..1e6, b in 1f64..1e6) {
        let base = run(&[Command::enter(a.to_string()), Command::enter(b.to_string())]);

        let difference = base.dispatch(&Command::operator(OperatorKey::Subtract));
        prop_assert_eq!(difference.snapshot().values(), vec![a - b]);

        let quotient = base.dispatch(&Command::operator(OperatorKey::Divide));
        prop_assert_eq!(quotient.snapshot().values(), vec![a / b]);
    }

    #[test]
    fn failed_commands_never_change_the_stack_or_history(
        commands in prop::collection::vec(arbitrary_command(), 0..20),
        key in arbitrary_operator()
    ) {
        let before = run(&commands);
        let after = before.dispatch(&Command::operator(key));

        if after.snapshot().error().is_some() {
            prop_assert_eq!(after.snapshot().values(), before.snapshot().values());
            prop_assert!(after.undo_buffer().ptr_eq(before.undo_buffer()));
            prop_assert!(after.redo_buffer().ptr_eq(before.redo_buffer()));
        }
    }

    #[test]
    fn underflow_reports_operator_arity(key in arbitrary_operator()) {
        let state = CalculatorState::new().dispatch(&Command::operator(key));
        let need = key.arity();
        prop_assert_eq!(
            state.snapshot().error(),
            Some(&CalcError::StackUnderflow { need })
        );
        prop_assert!(!state.can_undo());
    }

    #[test]
    fn no_op_commands_leave_history_untouched(
        commands in prop::collection::vec(arbitrary_command(), 0..20)
    ) {
        let before = run(&commands);
        let after = before.dispatch(&Command::enter("  "));
        prop_assert!(after.undo_buffer().ptr_eq(before.undo_buffer()));
        prop_assert!(after.redo_buffer().ptr_eq(before.redo_buffer()));

        let cleared = before.dispatch(&Command::Clear);
        let again = cleared.dispatch(&Command::Clear);
        prop_assert!(again.undo_buffer().ptr_eq(cleared.undo_buffer()));
        prop_assert_eq!(again, cleared);
    }

    #[test]
    fn checkpoint_round_trip(commands in prop::collection::vec(arbitrary_command(), 0..20)) {
        let state = run(&commands);
        let json = Checkpoint::capture(&state).to_json().unwrap();
        let restored = Checkpoint::from_json(&json).unwrap().restore().unwrap();
        prop_assert_eq!(restored, state);
    }
}
