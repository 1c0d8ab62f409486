use profilometer_core::{
    compute_roughness, Profile, ProfileSample, RigPhase, WorkpieceClass, INITIAL_STYLUS_POSITION,
    REFERENCE_STYLUS_POSITION, SCAN_END_POSITION,
};
use profilometer_rig::ScanState;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Select(WorkpieceClass),
    BeginZero,
    Engage,
    FinishZero,
    BeginScan,
    Sample,
    FinishScan,
    Reset,
    Cancel,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        prop::sample::select(WorkpieceClass::ALL.to_vec()).prop_map(Op::Select),
        Just(Op::BeginZero),
        Just(Op::Engage),
        Just(Op::FinishZero),
        Just(Op::BeginScan),
        Just(Op::Sample),
        Just(Op::Sample),
        Just(Op::FinishScan),
        Just(Op::Reset),
        Just(Op::Cancel),
    ]
}

const TOTAL: usize = 4;

fn apply(state: &mut ScanState, op: &Op) {
    match op {
        Op::Select(w) => {
            state.select(*w);
        }
        Op::BeginZero => {
            state.begin_zero();
        }
        Op::Engage => {
            state.engage_reference();
        }
        Op::FinishZero => {
            state.finish_zero();
        }
        Op::BeginScan => {
            state.begin_scan();
        }
        Op::Sample => {
            let position = state.profile().len();
            state.record_sample(ProfileSample::new(position, 0.25), TOTAL);
        }
        Op::FinishScan => {
            if state.profile().len() == TOTAL {
                let profile = Profile::from_heights([0.25; TOTAL]).unwrap();
                if let Ok(roughness) = compute_roughness(&profile) {
                    state.finish_scan(roughness);
                }
            }
        }
        Op::Reset => {
            state.reset();
        }
        Op::Cancel => {
            state.cancel();
        }
    }
}

proptest! {
    #[test]
    fn invariants_hold_for_any_command_sequence(ops in prop::collection::vec(op(), 0..40)) {
        let mut state = ScanState::default();
        for op in &ops {
            apply(&mut state, op);

            prop_assert!(!(state.is_zeroing() && state.is_scanning()));
            if state.is_scanning() {
                prop_assert!(state.is_zeroed());
            }
            if state.selected_workpiece().is_none() {
                prop_assert_eq!(state.phase(), RigPhase::Idle);
                prop_assert!(state.profile().is_empty());
            }
            prop_assert_eq!(state.ra().is_some(), state.rz().is_some());
            let positions: Vec<usize> =
                state.profile().samples().iter().map(|s| s.position).collect();
            prop_assert_eq!(positions, (0..state.profile().len()).collect::<Vec<_>>());

            let stylus = state.stylus_position();
            prop_assert!((INITIAL_STYLUS_POSITION..=SCAN_END_POSITION).contains(&stylus));
            if state.phase() == RigPhase::Zeroed && state.profile().is_empty() {
                prop_assert_eq!(stylus, REFERENCE_STYLUS_POSITION);
            }
        }
    }
}
