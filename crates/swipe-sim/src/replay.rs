use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use swipe_core::engine::machine::{SwipeEngine, TickEvent};
use swipe_core::model::outcome::Outcome;
use swipe_core::model::session::{Session, SessionError};
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{ResolvedOutputs, SimConfig};
use crate::trace::{self, GestureTrace};

/// Hard ceiling on ticks per gesture; the spring converges in well under a
/// hundred ticks, so hitting this means the engine stalled.
const MAX_TICKS_PER_GESTURE: usize = 10_000;

/// Drives a full gesture script through one engine, streaming JSONL rows.
pub struct ReplayRunner {
    config: SimConfig,
    outputs: ResolvedOutputs,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub gestures_run: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub undecided: usize,
    pub wraps: usize,
    pub final_score: u32,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O failure during replay: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode replay row: {0}")]
    Json(#[from] serde_json::Error),
    #[error("feed configuration is invalid: {0:?}")]
    Feed(SessionError),
    #[error("gesture {index} never settled after {ticks} ticks")]
    Stalled { index: usize, ticks: usize },
}

#[derive(Debug, Serialize)]
struct GestureRow<'a> {
    run_id: &'a str,
    gesture: usize,
    source: &'static str,
    release_dx: f32,
    release_dy: f32,
    outcome: &'static str,
    ticks: usize,
    score: u32,
    index: usize,
    wrapped: bool,
}

impl ReplayRunner {
    pub fn new(config: SimConfig, outputs: ResolvedOutputs) -> Self {
        Self { config, outputs }
    }

    /// Execute the replay, streaming one JSONL row per gesture.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let session = Session::new(
            self.config.feed.to_candidates(),
            self.config.feed.initial_score,
        )
        .map_err(RunnerError::Feed)?;
        let mut engine = SwipeEngine::new(session, self.config.tuning);

        let traces = self.collect_traces();
        let tick_ms = self.config.gestures.tick_ms;
        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);

        let mut accepted = 0usize;
        let mut rejected = 0usize;
        let mut undecided = 0usize;
        let mut wraps = 0usize;
        let mut rows_written = 0usize;

        let gestures_total = traces.len();
        for (gesture_index, (source, trace)) in traces.into_iter().enumerate() {
            let played = play_gesture(&mut engine, &trace, tick_ms, gesture_index, self)?;

            match played.outcome {
                Outcome::Accept => accepted += 1,
                Outcome::Reject => rejected += 1,
                Outcome::Undecided => undecided += 1,
            }
            if played.wrapped {
                wraps += 1;
            }

            let progress = engine.session().snapshot();
            let release = trace.release_offset();
            let row = GestureRow {
                run_id: &self.config.run_id,
                gesture: gesture_index,
                source,
                release_dx: release.dx,
                release_dy: release.dy,
                outcome: played.outcome.as_str(),
                ticks: played.ticks,
                score: progress.score,
                index: progress.index,
                wrapped: played.wrapped,
            };

            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
            rows_written += 1;

            event!(
                Level::INFO,
                gesture = gesture_index,
                source,
                outcome = played.outcome.as_str(),
                ticks = played.ticks,
                score = progress.score,
                "gesture replayed"
            );
        }

        writer.flush()?;

        let final_score = engine.session().score();
        let summary = RunSummary {
            gestures_run: gestures_total,
            accepted,
            rejected,
            undecided,
            wraps,
            final_score,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
        };

        write_summary_markdown(&self.outputs.summary_md, &self.config.run_id, &summary)?;

        Ok(summary)
    }

    fn collect_traces(&self) -> Vec<(&'static str, GestureTrace)> {
        let mut traces: Vec<(&'static str, GestureTrace)> = self
            .config
            .gestures
            .scripted
            .iter()
            .map(|t| ("scripted", GestureTrace::from_pairs(&t.samples)))
            .collect();

        if let Some(random) = &self.config.gestures.random {
            traces.extend(
                trace::generate(random.count, random.seed, self.config.tuning.screen_width)
                    .into_iter()
                    .map(|t| ("random", t)),
            );
        }

        traces
    }
}

struct PlayedGesture {
    outcome: Outcome,
    ticks: usize,
    wrapped: bool,
}

fn play_gesture(
    engine: &mut SwipeEngine,
    trace: &GestureTrace,
    tick_ms: f32,
    gesture_index: usize,
    runner: &ReplayRunner,
) -> Result<PlayedGesture, RunnerError> {
    for sample in trace.samples() {
        engine.drag(sample.dx, sample.dy);
    }

    // A trace with no samples never opens a gesture; release is a no-op.
    let Some(outcome) = engine.release() else {
        return Ok(PlayedGesture {
            outcome: Outcome::Undecided,
            ticks: 0,
            wrapped: false,
        });
    };

    let mut ticks = 0usize;
    loop {
        let tick = engine.tick(tick_ms);
        ticks += 1;

        if runner.config.logging.tick_details {
            event!(
                Level::TRACE,
                gesture = gesture_index,
                tick = ticks,
                x = engine.position().dx as f64,
                y = engine.position().dy as f64,
                "settle tick"
            );
        }

        match tick {
            TickEvent::None => {
                if ticks >= MAX_TICKS_PER_GESTURE {
                    return Err(RunnerError::Stalled {
                        index: gesture_index,
                        ticks,
                    });
                }
            }
            TickEvent::Advanced(advance) => {
                return Ok(PlayedGesture {
                    outcome,
                    ticks,
                    wrapped: advance.wrapped,
                });
            }
            TickEvent::Settled => {
                return Ok(PlayedGesture {
                    outcome,
                    ticks,
                    wrapped: false,
                });
            }
        }
    }
}

fn write_summary_markdown(
    path: &Path,
    run_id: &str,
    summary: &RunSummary,
) -> Result<(), RunnerError> {
    let mut body = String::new();
    body.push_str(&format!("# swipedeck replay: {run_id}\n\n"));
    body.push_str(&format!(
        "- gestures: {} (accepted {}, rejected {}, undecided {})\n",
        summary.gestures_run, summary.accepted, summary.rejected, summary.undecided
    ));
    body.push_str(&format!("- final score: {}\n", summary.final_score));
    body.push_str(&format!("- feed wraps: {}\n", summary.wraps));
    body.push_str(&format!(
        "- rows written: {} → {}\n",
        summary.rows_written,
        summary.jsonl_path.display()
    ));

    fs::write(path, body)?;
    Ok(())
}

fn ensure_parent(parent: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(parent) = parent {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
