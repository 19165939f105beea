//! Replay command handler.
//!
//! Implements the `replay` subcommand: run a navigation bridge over an
//! in-memory runner and feed it a newline-delimited script of host events and
//! reviewer actions. Every command the bridge issues to the runner is printed
//! as one JSON line.

use super::output::{write_output, OutputTarget};
use crate::answer::AnswerView;
use crate::bridge::{parse_script, HostCommand, NavigationBridge, RecordingHost, TestContext};
use crate::config::{ReviewConfig, RunnerOptions};
use crate::model::{load_test_map, TestMap};
use crate::panel::PanelView;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Settings of one `replay` run.
#[derive(Debug, Clone)]
pub struct ReplayCommand {
    pub map_path: PathBuf,
    pub script_path: PathBuf,
    pub review: ReviewConfig,
    /// Item the runner starts on
    pub start_item: Option<String>,
    /// Append the final panel and item-answer views
    pub final_state: bool,
    pub output_file: Option<PathBuf>,
    pub quiet: bool,
}

/// One output line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReplayRecord {
    /// Command issued while handling script step `step` (0 = start)
    Command { step: usize, command: HostCommand },
    /// Script step the bridge rejected
    Rejected { step: usize, error: String },
    /// Views after the last step
    Final { panel: PanelView, answer: AnswerView },
}

/// Result of a replay.
#[derive(Debug, Clone, Default)]
pub struct ReplayLog {
    pub records: Vec<ReplayRecord>,
    pub rejected: usize,
}

impl ReplayLog {
    fn to_ndjson(&self) -> Result<String> {
        let mut out = String::new();
        for record in &self.records {
            let _ = writeln!(out, "{}", serde_json::to_string(record)?);
        }
        Ok(out)
    }
}

/// Run a script against a map, collecting the host commands it causes.
pub fn replay_script(
    map: TestMap,
    script: &str,
    review: ReviewConfig,
    start_item: Option<String>,
    final_state: bool,
) -> Result<ReplayLog> {
    let steps = parse_script(script)?;
    let options = RunnerOptions::from(&review);
    let context = TestContext {
        item_position: start_item
            .as_deref()
            .and_then(|id| map.item(id))
            .and_then(|item| item.position),
        item_identifier: start_item,
    };
    let host = RecordingHost::new(map)
        .with_options(options)
        .with_context(context);
    let mut bridge = NavigationBridge::new(host, review);
    let mut log = ReplayLog::default();

    bridge.start();
    collect_commands(&mut bridge, 0, &mut log);

    for (idx, step) in steps.into_iter().enumerate() {
        let step_number = idx + 1;
        if let Err(err) = bridge.apply(step) {
            tracing::warn!(step = step_number, "Replay step rejected: {err}");
            log.rejected += 1;
            log.records.push(ReplayRecord::Rejected {
                step: step_number,
                error: err.to_string(),
            });
        }
        collect_commands(&mut bridge, step_number, &mut log);
    }

    if final_state {
        log.records.push(ReplayRecord::Final {
            panel: bridge.panel().view(),
            answer: bridge.answer().view(),
        });
    }
    tracing::debug!(
        records = log.records.len(),
        rejected = log.rejected,
        "Replay finished"
    );
    Ok(log)
}

fn collect_commands(
    bridge: &mut NavigationBridge<RecordingHost>,
    step: usize,
    log: &mut ReplayLog,
) {
    log.records.extend(
        bridge
            .host_mut()
            .take_commands()
            .into_iter()
            .map(|command| ReplayRecord::Command { step, command }),
    );
}

/// Run the replay command, returning the process exit code
pub fn run_replay(command: ReplayCommand) -> Result<i32> {
    let map = load_test_map(&command.map_path)
        .with_context(|| format!("failed to load {}", command.map_path.display()))?;
    let script = std::fs::read_to_string(&command.script_path)
        .with_context(|| format!("failed to read {}", command.script_path.display()))?;

    let log = replay_script(
        map,
        &script,
        command.review,
        command.start_item,
        command.final_state,
    )?;
    let target = OutputTarget::from_option(command.output_file);
    write_output(&log.to_ndjson()?, &target, command.quiet)?;
    Ok(i32::from(log.rejected > 0))
}
