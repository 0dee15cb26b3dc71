//! Cross-module contracts exercised through the full pipeline.
//!
//! The per-module test suites pin down each mutator in isolation; these
//! tests pin down what the modules promise each other: one guard snapshot
//! per tick, a single key-resource owner, and synchronous collapse of the
//! timing outputs on any hard guard failure.

use super::command::{ButtonMask, Command, CommandHistory};
use super::config::PipelineConfig;
use super::inputs::TickInputs;
use super::keys::KeyStates;
use super::pipeline::CommandPipeline;
use super::tick_shift::DoubleCommitState;

fn armed_inputs() -> TickInputs {
    let mut inputs = TickInputs::default();
    inputs.local.as_mut().unwrap().on_ground = true;
    inputs.prev.on_ground = true;
    inputs.keys = KeyStates::holding(&[16, 17, 20]);
    inputs.send_packet = true;
    inputs
}

#[test]
fn test_hard_guard_failures_collapse_timing_outputs() {
    let break_guard: [(&str, fn(&mut TickInputs)); 3] = [
        ("frozen", |i| i.local.as_mut().unwrap().frozen = true),
        ("immune", |i| i.local.as_mut().unwrap().immune = true),
        ("managed_server", |i| i.managed_server = true),
    ];

    for (name, breaker) in break_guard {
        let mut pipeline = CommandPipeline::new(PipelineConfig::all_enabled());
        let mut history = CommandHistory::new();

        // Arm and publish on a clean tick first.
        let mut inputs = armed_inputs();
        inputs.current_tick = 100;
        let mut cmd = Command {
            sequence: 10,
            tick_base: 100,
            ..Default::default()
        };
        let outcome = pipeline.process(&mut cmd, &mut history, &inputs);
        assert!(outcome.double_commit_active, "{name}: arming tick");
        assert_ne!(pipeline.scheduler().outputs.ticks_allowed, 0, "{name}");

        // Break the guard: same tick, everything resolves synchronously.
        breaker(&mut inputs);
        inputs.current_tick = 101;
        let mut cmd = Command {
            sequence: 11,
            tick_base: 101,
            ..Default::default()
        };
        let outcome = pipeline.process(&mut cmd, &mut history, &inputs);

        assert!(!outcome.double_commit_active, "{name}");
        assert!(outcome.staged_sequence.is_none(), "{name}");
        assert_eq!(pipeline.scheduler().outputs.ticks_allowed, 0, "{name}");
        assert_eq!(pipeline.scheduler().outputs.next_tick_shift, 0, "{name}");
        assert_eq!(
            pipeline.scheduler().double_commit_state(),
            DoubleCommitState::Idle,
            "{name}"
        );
        assert_eq!(pipeline.scheduler().double_commit_armed(), None, "{name}");
        assert_eq!(pipeline.scheduler().shot_hide_armed(), None, "{name}");
    }
}

#[test]
fn test_auto_crouch_engagement_blocks_timing_on_the_next_tick() {
    // Auto-crouch engages mid-tick, but the guard snapshot was captured
    // before it ran, so the timing machines only see duck-fake from the
    // following tick on.
    let mut pipeline = CommandPipeline::new(PipelineConfig::all_enabled());
    let mut history = CommandHistory::new();
    let mut inputs = armed_inputs();
    inputs.choke_count = 7;
    inputs.current_tick = 100;

    let mut cmd = Command {
        sequence: 10,
        tick_base: 100,
        ..Default::default()
    };
    let outcome = pipeline.process(&mut cmd, &mut history, &inputs);
    assert!(pipeline.duck_faking());
    assert!(cmd.buttons.contains(ButtonMask::DUCK));
    // Same-tick timing pass still saw duck_faking == false.
    assert!(outcome.double_commit_active);

    inputs.current_tick = 101;
    let mut cmd = Command {
        sequence: 11,
        tick_base: 101,
        ..Default::default()
    };
    let outcome = pipeline.process(&mut cmd, &mut history, &inputs);
    assert!(!outcome.double_commit_active);
    assert_eq!(pipeline.scheduler().outputs.ticks_allowed, 0);
}

#[test]
fn test_key_release_preserves_recharge_state() {
    // Releasing the bind is a precondition miss, not a guard failure: the
    // recharge window must keep counting across it.
    let mut pipeline = CommandPipeline::new(PipelineConfig::all_enabled());
    let mut history = CommandHistory::new();
    let mut inputs = armed_inputs();
    inputs.current_tick = 100;

    let mut cmd = Command {
        sequence: 10,
        tick_base: 100,
        buttons: ButtonMask::ATTACK,
        ..Default::default()
    };
    history.store(cmd);
    let outcome = pipeline.process(&mut cmd, &mut history, &inputs);
    assert_eq!(outcome.staged_sequence, Some(11));

    // Settle tick, then release every key mid-recharge.
    inputs.current_tick = 101;
    let mut cmd = Command {
        sequence: 11,
        tick_base: 101,
        ..Default::default()
    };
    pipeline.process(&mut cmd, &mut history, &inputs);
    assert_eq!(
        pipeline.scheduler().double_commit_state(),
        DoubleCommitState::Recharging
    );

    inputs.keys = KeyStates::default();
    inputs.current_tick = 102;
    let mut cmd = Command {
        sequence: 12,
        tick_base: 102,
        ..Default::default()
    };
    pipeline.process(&mut cmd, &mut history, &inputs);
    assert_eq!(
        pipeline.scheduler().double_commit_state(),
        DoubleCommitState::Recharging
    );
    assert_eq!(pipeline.scheduler().outputs.ticks_allowed, 0);
}

#[test]
fn test_remap_rewrite_is_exact() {
    let mut config = PipelineConfig::default();
    config.directional_remap.enabled = true;
    let mut pipeline = CommandPipeline::new(config);
    let mut history = CommandHistory::new();
    let inputs = armed_inputs();

    // Stale direction bits from the sampled input get fully replaced.
    let mut cmd = Command {
        sequence: 1,
        forward_move: 5.0,
        side_move: -3.0,
        buttons: ButtonMask::BACK | ButtonMask::MOVE_LEFT | ButtonMask::JUMP,
        ..Default::default()
    };
    pipeline.process(&mut cmd, &mut history, &inputs);
    assert_eq!(
        cmd.buttons,
        ButtonMask::FORWARD | ButtonMask::MOVE_RIGHT | ButtonMask::JUMP
    );
}

#[test]
fn test_disabled_pipeline_leaves_command_untouched() {
    let mut pipeline = CommandPipeline::new(PipelineConfig::default());
    let mut history = CommandHistory::new();
    let inputs = armed_inputs();

    let original = Command {
        sequence: 7,
        tick_base: 70,
        buttons: ButtonMask::ATTACK | ButtonMask::FORWARD,
        forward_move: 200.0,
        side_move: -50.0,
    };
    let mut cmd = original;
    let outcome = pipeline.process(&mut cmd, &mut history, &inputs);

    assert_eq!(cmd, original);
    assert_eq!(outcome.staged_sequence, None);
    assert_eq!(pipeline.scheduler().outputs.ticks_allowed, 0);
    assert_eq!(pipeline.scheduler().outputs.tick_shift, 0);
}

#[test]
fn test_identical_tick_scripts_replay_identically() {
    let script: Vec<(Command, u32)> = (0..32)
        .map(|i| {
            (
                Command {
                    sequence: 100 + i,
                    tick_base: 1000 + i,
                    buttons: if i % 5 == 0 {
                        ButtonMask::ATTACK
                    } else {
                        ButtonMask::FORWARD
                    },
                    forward_move: (i as f32) * 13.0 - 150.0,
                    side_move: (i as f32) * -7.0 + 50.0,
                },
                1000 + i,
            )
        })
        .collect();

    let run = || {
        let mut pipeline = CommandPipeline::new(PipelineConfig::all_enabled());
        let mut history = CommandHistory::new();
        let mut trace = Vec::new();
        for (cmd, tick) in &script {
            let mut inputs = armed_inputs();
            inputs.current_tick = *tick;
            let mut cmd = *cmd;
            history.store(cmd);
            let outcome = pipeline.process(&mut cmd, &mut history, &inputs);
            trace.push((cmd, outcome));
        }
        trace
    };

    assert_eq!(run(), run());
}

#[cfg(all(test, feature = "proptest"))]
mod proptests {
    use super::*;
    use crate::engine::inputs::LocalPlayerState;
    use proptest::prelude::*;

    proptest! {
        /// Property: a hard guard failure forces zero timing outputs and an
        /// idle machine, whatever else the tick carries.
        #[test]
        fn prop_hard_guard_failure_forces_idle(
            failure in 0usize..3,
            raw_buttons in 0u32..512,
            choke in 0u32..16,
            tick in 0u32..100_000
        ) {
            let mut inputs = armed_inputs();
            inputs.choke_count = choke;
            inputs.current_tick = tick;
            match failure {
                0 => inputs.local.as_mut().unwrap().frozen = true,
                1 => inputs.local.as_mut().unwrap().immune = true,
                _ => inputs.managed_server = true,
            }

            let mut pipeline = CommandPipeline::new(PipelineConfig::all_enabled());
            let mut history = CommandHistory::new();
            let mut cmd = Command {
                sequence: 10,
                tick_base: tick,
                buttons: ButtonMask::from_bits_truncate(raw_buttons),
                ..Default::default()
            };
            let outcome = pipeline.process(&mut cmd, &mut history, &inputs);

            prop_assert!(outcome.staged_sequence.is_none());
            prop_assert_eq!(pipeline.scheduler().outputs.ticks_allowed, 0);
            prop_assert_eq!(pipeline.scheduler().outputs.next_tick_shift, 0);
            prop_assert_eq!(
                pipeline.scheduler().double_commit_state(),
                DoubleCommitState::Idle
            );
        }

        /// Property: the non-desync remap always reports exactly one button
        /// per axis, regardless of the sampled bits.
        #[test]
        fn prop_remap_reports_one_button_per_axis(
            forward in -450.0f32..450.0,
            side in -450.0f32..450.0,
            raw_buttons in 0u32..512
        ) {
            let mut config = PipelineConfig::default();
            config.directional_remap.enabled = true;
            let mut pipeline = CommandPipeline::new(config);
            let mut history = CommandHistory::new();
            let inputs = armed_inputs();

            let mut cmd = Command {
                sequence: 1,
                forward_move: forward,
                side_move: side,
                buttons: ButtonMask::from_bits_truncate(raw_buttons),
                ..Default::default()
            };
            pipeline.process(&mut cmd, &mut history, &inputs);

            let expected = if forward <= 0.0 { ButtonMask::BACK } else { ButtonMask::FORWARD }
                | if side > 0.0 { ButtonMask::MOVE_LEFT } else { ButtonMask::MOVE_RIGHT };
            prop_assert_eq!(cmd.buttons & ButtonMask::DIRECTIONS, expected);
        }

        /// Property: the key-resource never has two owners.
        #[test]
        fn prop_key_resource_has_at_most_one_owner(
            held in proptest::collection::vec(0u8..32, 0..6),
            grounded in any::<bool>()
        ) {
            let mut inputs = TickInputs::default();
            inputs.keys = KeyStates::holding(&held);
            inputs.local = Some(LocalPlayerState {
                on_ground: grounded,
                ..Default::default()
            });
            inputs.prev.on_ground = grounded;

            let mut pipeline = CommandPipeline::new(PipelineConfig::all_enabled());
            let mut history = CommandHistory::new();
            let mut cmd = Command::default();
            pipeline.process(&mut cmd, &mut history, &inputs);

            let scheduler = pipeline.scheduler();
            prop_assert!(
                scheduler.double_commit_armed().is_none()
                    || scheduler.shot_hide_armed().is_none()
            );
        }
    }
}
