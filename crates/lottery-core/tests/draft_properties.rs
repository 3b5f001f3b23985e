// Statistical and structural properties of the weighted draw, exercised
// through the public API together with the roster and reveal state machine.

use std::collections::HashMap;

use lottery_core::draft::{compute_draft_order, RevealPhase, RevealState, RevealStep};
use lottery_core::roster::Roster;
use rand::rngs::StdRng;
use rand::SeedableRng;

const TRIALS: usize = 10_000;

fn roster(spec: &[(&str, u32)]) -> Roster {
    let mut roster = Roster::new();
    for (name, ballots) in spec {
        assert!(roster.add_team(name, *ballots));
    }
    roster
}

/// Count first-overall-pick wins per team across `TRIALS` draws.
fn first_pick_counts(roster: &Roster, weighted: bool, seed: u64) -> HashMap<String, usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let snapshot = roster.draw_snapshot(weighted);
    let mut counts = HashMap::new();
    for _ in 0..TRIALS {
        let order = compute_draft_order(&snapshot, &mut rng);
        let winner = order.first_overall().expect("non-empty order").to_string();
        *counts.entry(winner).or_insert(0) += 1;
    }
    counts
}

#[test]
fn nine_ballots_win_first_pick_about_nine_times_as_often() {
    let roster = roster(&[("A", 1), ("B", 9)]);
    let counts = first_pick_counts(&roster, true, 2024);

    let a = counts.get("A").copied().unwrap_or(0);
    let b = counts.get("B").copied().unwrap_or(0);
    assert_eq!(a + b, TRIALS);

    // Expected 9,000 for B; binomial sd is 30, so +-300 is a 10-sigma band.
    assert!((8_700..=9_300).contains(&b), "B won first pick {b} times");
    let ratio = b as f64 / a as f64;
    assert!((7.0..=11.5).contains(&ratio), "B/A ratio was {ratio:.2}");
}

#[test]
fn first_pick_frequency_tracks_ballot_share() {
    let roster = roster(&[("A", 1), ("B", 2), ("C", 3), ("D", 4)]);
    let counts = first_pick_counts(&roster, true, 77);

    for (name, ballots) in [("A", 1.0), ("B", 2.0), ("C", 3.0), ("D", 4.0)] {
        let expected = ballots / 10.0;
        let observed = counts.get(name).copied().unwrap_or(0) as f64 / TRIALS as f64;
        assert!(
            (observed - expected).abs() < 0.03,
            "{name}: observed {observed:.3}, expected {expected:.3}"
        );
    }
}

#[test]
fn unweighted_mode_ignores_stored_ballots() {
    let roster = roster(&[("A", 1), ("B", 9)]);
    let counts = first_pick_counts(&roster, false, 31);

    let b = counts.get("B").copied().unwrap_or(0) as f64 / TRIALS as f64;
    assert!((b - 0.5).abs() < 0.03, "B share was {b:.3} with weighting off");
}

#[test]
fn every_draw_is_a_permutation_of_the_roster() {
    let roster = roster(&[("A", 5), ("B", 1), ("C", 2), ("D", 1), ("E", 7)]);
    let snapshot = roster.draw_snapshot(true);
    let mut expected: Vec<String> = roster.teams().map(|t| t.name.clone()).collect();
    expected.sort();

    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..500 {
        let order = compute_draft_order(&snapshot, &mut rng);
        let mut names: Vec<String> = order.iter().map(str::to_string).collect();
        names.sort();
        assert_eq!(names, expected);
    }
}

#[test]
fn drawn_order_reveals_last_pick_first() {
    let roster = roster(&[("A", 1), ("B", 1), ("C", 1)]);
    let mut rng = StdRng::seed_from_u64(4);
    let order = compute_draft_order(&roster.draw_snapshot(false), &mut rng);
    let first_overall = order.first_overall().unwrap().to_string();

    let mut reveal = RevealState::new();
    assert_eq!(reveal.start(order.clone()), RevealStep::Revealed { index: 0 });
    assert_eq!(reveal.revealed()[0], order.get(0).unwrap());
    assert_eq!(order.pick_number(0), Some(3));

    assert_eq!(reveal.advance(), RevealStep::Revealed { index: 1 });
    assert_eq!(reveal.advance(), RevealStep::Completed { index: 2 });
    assert_eq!(reveal.phase(), RevealPhase::Complete);
    assert_eq!(reveal.revealed().last().unwrap(), &first_overall);
}
