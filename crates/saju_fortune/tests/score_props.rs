//! Property tests for the period scorer, combos, volatility and text picks.

use proptest::prelude::*;
use saju_base::{Chart, InteractionEvents, Pillar};
use saju_fortune::{
    CareerClashMode, CategoryScores, Combo, NatalContext, ScoringConfig, compute_volatility,
    detect_combos, pick_deterministic, score_period, score_two_stage,
};

fn natal_from(idx: [u8; 4]) -> NatalContext {
    NatalContext::new(&Chart {
        year: Pillar::from_index(idx[0]),
        month: Pillar::from_index(idx[1]),
        day: Pillar::from_index(idx[2]),
        hour: Pillar::from_index(idx[3]),
    })
}

fn mode_strategy() -> impl Strategy<Value = CareerClashMode> {
    prop_oneof![
        Just(CareerClashMode::Opportunity),
        Just(CareerClashMode::Neutral),
        Just(CareerClashMode::Risk),
    ]
}

fn events_strategy() -> impl Strategy<Value = InteractionEvents> {
    (0u8..=2, 0u8..=2, 0u8..=4, 0u8..=2, 0u8..=2, 0u8..=1, 0u8..=1).prop_map(
        |(clash, combination, punishment, breaking, harm, triad, quartet)| InteractionEvents {
            clash,
            combination,
            punishment,
            breaking,
            harm,
            triad,
            quartet,
        },
    )
}

proptest! {
    #[test]
    fn categories_and_base_are_bounded(
        natal in proptest::array::uniform4(0u8..60),
        incoming in 0u8..60,
        mode in mode_strategy(),
        ten_god in any::<bool>(),
        strength in any::<bool>(),
        relief in any::<bool>(),
    ) {
        let n = natal_from(natal);
        let cfg = ScoringConfig {
            ten_god_correction: ten_god,
            strength_correction: strength,
            day_stem_relief: relief,
            ..ScoringConfig::default()
        };
        let s = score_period(&n, Pillar::from_index(incoming), &cfg, mode);
        prop_assert!((40.0..=95.0).contains(&s.base));
        for v in [s.categories.love, s.categories.money, s.categories.career, s.categories.health] {
            prop_assert!((0.0..=100.0).contains(&v));
        }
    }

    #[test]
    fn two_stage_is_deterministic(natal in proptest::array::uniform4(0u8..60), incoming in 0u8..60) {
        let n = natal_from(natal);
        let cfg = ScoringConfig::default();
        let p = Pillar::from_index(incoming);
        prop_assert_eq!(score_two_stage(&n, p, &cfg), score_two_stage(&n, p, &cfg));
    }

    #[test]
    fn crash_always_first(ev in events_strategy(), v in 0.0f64..=100.0) {
        let cats = CategoryScores::from_fn(|_| v);
        let combos = detect_combos(&ev, &cats);
        let crash = ev.clash >= 2 && ev.breaking + ev.punishment + ev.harm >= 2;
        prop_assert_eq!(combos.first() == Some(&Combo::Crash), crash);
        prop_assert!(combos.len() <= 3);
    }

    /// With min and max pinned, the score orders the same way as std.
    #[test]
    fn volatility_monotone_in_std(
        lo in 0.0f64..50.0,
        span in 1.0f64..50.0,
        a in proptest::collection::vec(0.0f64..=1.0, 1..10),
        b in proptest::collection::vec(0.0f64..=1.0, 1..10),
    ) {
        let hi = lo + span;
        let build = |inner: &[f64]| {
            let mut v = vec![lo, hi];
            v.extend(inner.iter().map(|x| lo + x * span));
            compute_volatility(&v)
        };
        let (va, vb) = (build(&a), build(&b));
        prop_assert!((va.range - vb.range).abs() < 1e-9);
        let (low, high) = if va.std <= vb.std { (va, vb) } else { (vb, va) };
        prop_assert!(low.volatility_score <= high.volatility_score);
        prop_assert!(low.stability_score >= high.stability_score);
    }

    #[test]
    fn pick_is_pure(seed in ".{0,24}", len in 1usize..20) {
        let pool: Vec<usize> = (0..len).collect();
        let a = pick_deterministic(&pool, &seed);
        prop_assert!(a.is_some());
        prop_assert_eq!(a, pick_deterministic(&pool, &seed));
    }
}

#[test]
fn crash_fixture_lists_crash_first() {
    let ev = InteractionEvents {
        clash: 2,
        punishment: 1,
        harm: 1,
        combination: 2,
        ..Default::default()
    };
    let cats = CategoryScores {
        love: 90.0,
        money: 90.0,
        career: 90.0,
        health: 20.0,
    };
    assert_eq!(detect_combos(&ev, &cats)[0], Combo::Crash);
}
