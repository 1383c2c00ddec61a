//! Property-based tests for a bound session
//!
//! Random sequences of UI operations, transport events and pumps must never
//! leave the transport on a different source than the current track. Events
//! may pile up across loads before they are pumped; only an `ended` raised
//! by the source that is loaded when it is handled may advance the queue.

mod common;

use aria_playback::PlaybackMode;
use aria_transport::{MemoryTransport, PlayerSession, TransportCommand, TransportError};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    SetQueue(usize, usize),
    Play(Option<usize>),
    Pause,
    Toggle,
    Next,
    Prev,
    Mode(PlaybackMode),
    Settle(bool),
    Finish,
    Seek(f64),
    Pump,
}

fn load_count(session: &PlayerSession<MemoryTransport>) -> usize {
    session
        .transport()
        .commands()
        .iter()
        .filter(|c| matches!(c, TransportCommand::Load(_)))
        .count()
}

fn arbitrary_mode() -> impl Strategy<Value = PlaybackMode> {
    prop_oneof![
        Just(PlaybackMode::RepeatOne),
        Just(PlaybackMode::RepeatAll),
        Just(PlaybackMode::Shuffle),
    ]
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..6, 0usize..8).prop_map(|(len, start)| Op::SetQueue(len, start)),
        proptest::option::of(0usize..8).prop_map(Op::Play),
        Just(Op::Pause),
        Just(Op::Toggle),
        Just(Op::Next),
        Just(Op::Prev),
        arbitrary_mode().prop_map(Op::Mode),
        any::<bool>().prop_map(Op::Settle),
        Just(Op::Finish),
        (-10.0f64..400.0).prop_map(Op::Seek),
        Just(Op::Pump),
        Just(Op::Pump),
    ]
}

const IDS: [&str; 6] = ["t0", "t1", "t2", "t3", "t4", "t5"];

proptest! {
    #[test]
    fn prop_transport_follows_current_track(ops in prop::collection::vec(arbitrary_op(), 1..60)) {
        let mut session = common::session(PlaybackMode::RepeatAll);
        // `ended` events raised by the loaded source and not pumped yet
        let mut live_ends = 0usize;

        for op in ops {
            let loads_before = load_count(&session);
            let position_before = session.state().position();

            match op {
                Op::SetQueue(len, start) => session.set_queue(common::tracks(&IDS[..len]), start),
                Op::Play(index) => session.play(index),
                Op::Pause => session.pause(),
                Op::Toggle => session.toggle(),
                Op::Next => session.next(),
                Op::Prev => session.prev(),
                Op::Mode(mode) => session.set_mode(mode),
                Op::Settle(ok) => {
                    let result = if ok {
                        Ok(())
                    } else {
                        Err(TransportError::PlayRejected("decode".to_string()))
                    };
                    session.transport_mut().settle_latest(result);
                }
                Op::Finish => {
                    if session.transport().source().is_some() {
                        session.transport_mut().finish();
                        live_ends += 1;
                    }
                }
                Op::Seek(seconds) => session.seek(seconds),
                Op::Pump => {
                    session.pump();

                    let loads = load_count(&session) - loads_before;
                    // One live end advances at most once; everything behind
                    // it belongs to the replaced source.
                    prop_assert!(loads <= 1);
                    if live_ends == 0 {
                        prop_assert_eq!(loads, 0);
                        prop_assert_eq!(session.state().position(), position_before);
                    }
                    live_ends = 0;
                }
            }

            if load_count(&session) != loads_before {
                live_ends = 0;
            }

            let state = session.state();
            if let Some(position) = state.position() {
                prop_assert!(position < state.queue().len());
            } else {
                prop_assert!(state.queue().is_empty());
            }

            if let Some(track) = state.current() {
                prop_assert_eq!(session.transport().source(), Some(track.url.as_str()));
            }
        }

        // Play requests are numbered in issue order
        let generations: Vec<_> = session
            .transport()
            .commands()
            .iter()
            .filter_map(|c| match c {
                TransportCommand::Play(g) => Some(*g),
                _ => None,
            })
            .collect();
        prop_assert!(generations.windows(2).all(|w| w[0] < w[1]));

        // Seeks never reach the transport negative
        prop_assert!(session.transport().commands().iter().all(|c| match c {
            TransportCommand::Seek(s) => *s >= 0.0,
            _ => true,
        }), "all seek commands must be non-negative");
    }
}
