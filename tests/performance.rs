use proptest::prelude::*;
use rosu_tp::{
    osu::{DifficultyError, OsuScoreState, PerformanceError, ScoreError},
    Beatmap, Difficulty,
};
use rstest::rstest;

use self::common::*;

mod common;

const N_OBJECTS: u32 = 160;

fn map() -> Beatmap {
    jumps(N_OBJECTS, 260.0, 220.0)
}

#[test]
fn ss_beats_misses() {
    init_tracing();

    let map = map();

    let ss = map.performance().calculate().unwrap();
    let misses = map.performance().n_misses(3).calculate().unwrap();

    assert!(ss.pp > misses.pp);
    assert!(ss.pp_aim > misses.pp_aim);
    assert!(ss.pp_tap > misses.pp_tap);
    assert!(ss.pp_acc > misses.pp_acc);
    assert_eq_float(misses.effective_miss_count, 3.0);
}

#[test]
fn broken_combo_without_sliders() {
    let map = map();
    let attrs = map.performance().combo(N_OBJECTS / 4).calculate().unwrap();

    // * max combo divided by combo
    assert_eq_float(attrs.effective_miss_count, 4.0);
}

#[test]
fn accuracy_generates_counts() {
    let map = map();
    let mut perf = map.performance().accuracy(97.0);
    let state = perf.generate_state().unwrap();

    assert_eq!(state.total_hits(), N_OBJECTS);
    assert_eq!(state.misses, 0);
    assert_approx(state.accuracy(), 0.97, 1.0 / f64::from(N_OBJECTS));
}

#[rstest]
#[case::fraction(0.955)]
#[case::percent(95.5)]
fn accuracy_formats_agree(#[case] acc: f64) {
    let map = map();

    let expected = map.performance().accuracy(0.955).calculate().unwrap();
    let actual = map.performance().accuracy(acc).calculate().unwrap();

    assert_eq!(expected, actual);
}

#[test]
fn state_is_used_as_given() {
    let state = OsuScoreState {
        max_combo: 120,
        n300: 150,
        n100: 8,
        n50: 1,
        misses: 1,
    };

    let map = map();
    let mut perf = map.performance().state(state);

    assert_eq!(perf.generate_state().unwrap(), state);
}

#[test]
fn attributes_are_reused() {
    let map = map();
    let diff_attrs = Difficulty::new().mods(HD | DT).calculate(&map).unwrap();

    let from_map = map
        .performance()
        .mods(HD | DT)
        .accuracy(98.2)
        .n_misses(1)
        .calculate()
        .unwrap();

    // * mods are taken from the attributes
    let from_attrs = diff_attrs
        .performance()
        .accuracy(98.2)
        .n_misses(1)
        .calculate()
        .unwrap();

    assert_eq!(from_map, from_attrs);

    let again = from_attrs.clone().performance().calculate().unwrap();

    assert_eq!(again.difficulty, from_attrs.difficulty);
    assert!(again.pp > from_attrs.pp);
}

#[test]
fn attributes_take_precedence_over_map() {
    let map = map();
    let other = streams(64, 120.0);
    let attrs = Difficulty::new().calculate(&other).unwrap();

    let perf = map.performance().attributes(attrs.clone()).calculate().unwrap();

    assert_eq!(perf.difficulty, attrs);
}

#[rstest]
#[case::no_fail(NF, 0.9)]
#[case::spun_out(SO, 0.95)]
#[case::both(NF | SO, 0.9 * 0.95)]
fn pp_multipliers(#[case] mods: u32, #[case] factor: f64) {
    let map = map();

    let nomod = map.performance().accuracy(99.0).calculate().unwrap();
    let modded = map.performance().mods(mods).accuracy(99.0).calculate().unwrap();

    assert_approx(modded.pp, nomod.pp * factor, 1e-9);
}

#[test]
fn hidden_buffs_accuracy() {
    let map = map();

    let nomod = map.performance().calculate().unwrap();
    let hidden = map.performance().mods(HD).calculate().unwrap();

    assert_approx(hidden.pp_acc, nomod.pp_acc * 1.08, 1e-9);
    assert_eq_float(hidden.pp_tap, nomod.pp_tap);
}

#[test]
fn flashlight_buffs_aim() {
    let map = map();

    let nomod = map.performance().calculate().unwrap();
    let flashlight = map.performance().mods(FL).calculate().unwrap();

    assert!(flashlight.pp_aim > nomod.pp_aim);
    assert!(flashlight.pp > nomod.pp);
}

#[test]
fn partial_play() {
    let map = map();

    let partial = map.performance().passed_objects(50).calculate().unwrap();
    let full = map.performance().calculate().unwrap();

    assert_eq!(partial.n_objects(), 50);
    assert_eq!(partial.max_combo(), 50);
    assert!(partial.pp < full.pp);
}

#[test]
fn empty_map_fails() {
    let res = Beatmap::default().performance().calculate();

    assert_eq!(
        res,
        Err(PerformanceError::Difficulty(DifficultyError::NoObjects))
    );
}

#[test]
fn only_misses_fails() {
    let res = map().performance().n_misses(N_OBJECTS).calculate();

    assert_eq!(res, Err(PerformanceError::Score(ScoreError::NoAccuracy)));
}

#[test]
fn zero_combo_fails() {
    let res = map().performance().combo(0).calculate();

    assert_eq!(res, Err(PerformanceError::Score(ScoreError::NoCombo)));
}

#[rstest]
#[case::nomod(NM, [50.008_567_695_839_47, 37.239_276_832_074_57, 4.236_807_946_890_383, 21.962_700_505_167_61])]
#[case::hidden_nightcore(HD | NC, [149.430_571_569_285_5, 118.753_044_055_752_8, 14.975_155_371_952_51, 54.147_313_187_447_1])]
fn pinned_mixed_map(#[case] mods: u32, #[case] expected: [f64; 4]) {
    let [pp, pp_aim, pp_tap, pp_acc] = expected;

    let state = OsuScoreState {
        max_combo: 200,
        n300: 140,
        n100: 7,
        n50: 1,
        misses: 3,
    };

    let map = mixed(150);
    let attrs = map.performance().mods(mods).state(state).calculate().unwrap();

    assert_approx(attrs.pp, pp, pp * 1e-9);
    assert_approx(attrs.pp_aim, pp_aim, pp_aim * 1e-9);
    assert_approx(attrs.pp_tap, pp_tap, pp_tap * 1e-9);
    assert_approx(attrs.pp_acc, pp_acc, pp_acc * 1e-9);
    assert_eq_float(attrs.effective_miss_count, 3.0);

    let again = map.performance().mods(mods).state(state).calculate().unwrap();

    assert_eq!(attrs, again);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn pp_is_finite(acc in 0.6..1.0_f64, n_misses in 0..10_u32, combo in 1..N_OBJECTS) {
        let attrs = Difficulty::new().calculate(&map()).unwrap();

        let perf = attrs
            .performance()
            .accuracy(acc)
            .n_misses(n_misses)
            .combo(combo)
            .calculate()
            .unwrap();

        prop_assert!(perf.pp.is_finite());
        prop_assert!(perf.pp >= 0.0);
    }
}
