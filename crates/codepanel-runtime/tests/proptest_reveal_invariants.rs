//! Property tests for the typing reveal state machine.
//!
//! Invariants:
//! 1. The revealed prefix only grows and never exceeds the source.
//! 2. A tick is pending exactly while playback is running.
//! 3. Running stops only when everything is revealed.
//! 4. Rendered lines always join back to the revealed prefix.
//! 5. Speed cycling has period four and never moves the reveal.
//! 6. Skip is idempotent.

use std::time::Duration;

use codepanel_runtime::{Speed, TypingHighlighter};
use proptest::prelude::*;
use web_time::Instant;

const MS: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
enum Op {
    Tick,
    Poll(u32),
    FirePending,
    FireStale,
    CycleSpeed,
    Skip,
    Run,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => Just(Op::Tick),
        4 => (0u32..200).prop_map(Op::Poll),
        3 => Just(Op::FirePending),
        1 => Just(Op::FireStale),
        2 => Just(Op::CycleSpeed),
        1 => Just(Op::Skip),
        1 => Just(Op::Run),
    ]
}

fn source() -> impl Strategy<Value = String> {
    "[a-z0-9 ()#\"\n]{0,40}"
}

fn check_invariants(hl: &TypingHighlighter) -> Result<(), TestCaseError> {
    let state = hl.state();
    prop_assert!(state.revealed() <= state.len());
    prop_assert_eq!(hl.pending_tick().is_some(), hl.running());
    prop_assert_eq!(hl.running(), !hl.is_complete());

    let rebuilt: Vec<String> = hl.render().iter().map(|l| l.to_plain_string()).collect();
    prop_assert_eq!(rebuilt.join("\n"), hl.revealed_text());
    Ok(())
}

proptest! {
    #[test]
    fn random_operations_keep_reveal_consistent(
        text in source(),
        ops in prop::collection::vec(op(), 0..60),
    ) {
        let t0 = Instant::now();
        let mut now = t0;
        let mut hl = TypingHighlighter::start_at(&text, 10 * MS, t0).unwrap();
        let mut stale = None;
        check_invariants(&hl)?;

        for op in ops {
            let before = hl.state().revealed();
            let was_running = hl.running();
            match op {
                Op::Tick => {
                    let advanced = hl.tick_at(now);
                    prop_assert_eq!(advanced, was_running);
                }
                Op::Poll(ms) => {
                    now += ms * MS;
                    let revealed = hl.poll(now);
                    prop_assert_eq!(hl.state().revealed(), before + revealed);
                }
                Op::FirePending => {
                    if let Some(tick) = hl.pending_tick() {
                        now = now.max(tick.deadline);
                        prop_assert!(hl.fire_at(tick.token, now));
                        stale = Some(tick.token);
                    }
                }
                Op::FireStale => {
                    if let Some(token) = stale {
                        prop_assert!(!hl.fire_at(token, now));
                        prop_assert_eq!(hl.state().revealed(), before);
                    }
                }
                Op::CycleSpeed => {
                    let speed = hl.cycle_speed();
                    prop_assert_eq!(hl.next_delay(), speed.scale(10 * MS));
                    prop_assert_eq!(hl.state().revealed(), before);
                }
                Op::Skip => {
                    if let Some(tick) = hl.pending_tick() {
                        stale = Some(tick.token);
                    }
                    prop_assert_eq!(hl.skip(), was_running);
                    prop_assert!(hl.is_complete());
                }
                Op::Run => {
                    let shown = hl.run();
                    prop_assert_eq!(shown.forced_completion, was_running);
                    prop_assert!(hl.is_complete());
                }
            }
            prop_assert!(hl.state().revealed() >= before);
            if !was_running {
                prop_assert!(!hl.running());
            }
            check_invariants(&hl)?;
        }

        let pending = hl.pending_tick();
        prop_assert_eq!(hl.cancel(), pending);
    }

    #[test]
    fn speed_cycle_has_period_four(start in 1u8..=4, turns in 0usize..12) {
        let initial = Speed::new(start).unwrap();
        let mut speed = initial;
        for _ in 0..turns {
            speed = speed.cycled();
        }
        prop_assert!((1..=4).contains(&speed.get()));
        let mut again = speed;
        for _ in 0..4 {
            again = again.cycled();
        }
        prop_assert_eq!(again, speed);
        prop_assert_eq!(usize::from(speed.get() - 1), (usize::from(start - 1) + turns) % 4);
    }

    #[test]
    fn skip_twice_equals_skip_once(text in source(), ms in 0u32..300) {
        let t0 = Instant::now();
        let mut hl = TypingHighlighter::start_at(&text, 10 * MS, t0).unwrap();
        hl.poll(t0 + ms * MS);
        hl.skip();
        let once = (*hl.state(), hl.revealed_text().to_owned());
        prop_assert!(!hl.skip());
        prop_assert_eq!((*hl.state(), hl.revealed_text().to_owned()), once);
        prop_assert_eq!(hl.revealed_text(), hl.source().as_str());
        prop_assert!(hl.pending_tick().is_none());
    }

    #[test]
    fn polling_reveals_by_elapsed_time(text in source(), ms in 0u32..500) {
        let t0 = Instant::now();
        let mut hl = TypingHighlighter::start_at(&text, 10 * MS, t0).unwrap();
        hl.poll(t0 + ms * MS);
        let expected = usize::try_from(ms / 10).unwrap().min(hl.source().len());
        prop_assert_eq!(hl.state().revealed(), expected);
    }
}
