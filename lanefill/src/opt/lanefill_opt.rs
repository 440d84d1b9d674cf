use std::time::Instant;

use anyhow::{Result, ensure};
use log::{debug, info};
use thousands::Separable;

use marker_core::entities::{
    Instance, Lane, PlacedPanel, Placement, RunResult, RunStatus, Sheet, UnplacedPanel,
    UnplacedReason,
};
use marker_core::geometry::primitives::SPolygon;
use marker_core::util::assertions;

use crate::config::LFConfig;
use crate::opt::candidates::oriented_variants;
use crate::opt::compaction::compact;
use crate::opt::monitor::RunMonitor;
use crate::opt::score::PlacementScore;
use crate::opt::search::first_fit;
use crate::opt::sequence::panel_placement_order;

/// Lifecycle of a [`LaneFillOptimizer`]: `Idle -> Running -> {Completed, Cancelled}`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

/// Greedy lane-biased fill optimizer.
/// Panels are placed one by one, largest first, each at the best of its compacted orientation variants.
/// Decisions are final: no placement is ever moved or removed afterwards.
pub struct LaneFillOptimizer {
    pub instance: Instance,
    pub config: LFConfig,
    sheet: Sheet,
    state: RunState,
    /// Number of grid positions tested
    eval_counter: usize,
}

enum PanelOutcome {
    Placed(Placement),
    Unplaced(UnplacedReason),
    /// Cancellation was requested while searching
    Interrupted,
}

impl LaneFillOptimizer {
    pub fn new(instance: Instance, config: LFConfig) -> Result<Self> {
        ensure!(
            config.grid_step > 0.0 && config.compaction_step > 0.0,
            "grid and compaction steps must be positive, got {} and {}",
            config.grid_step,
            config.compaction_step
        );
        let sheet = Sheet::new(instance.sheet_width, instance.max_length)?;
        Ok(Self {
            instance,
            config,
            sheet,
            state: RunState::Idle,
            eval_counter: 0,
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Runs the optimizer to completion or until `monitor` requests cancellation.
    /// Panels that were never reached due to cancellation appear in neither list of the result.
    pub fn solve(mut self, monitor: &mut impl RunMonitor) -> RunResult {
        let start = Instant::now();
        self.transition(RunState::Running);

        let order = panel_placement_order(&self.instance.panels);
        let n_total = order.len();
        info!(
            "[LF] placing {} panels ({:.1} cm²) on a {:.1} cm wide sheet of at most {:.1} cm",
            n_total,
            self.instance.total_panel_area(),
            self.sheet.width,
            self.sheet.max_length
        );

        let mut placed: Vec<PlacedPanel> = vec![];
        let mut unplaced: Vec<UnplacedPanel> = vec![];

        for (i, &panel_idx) in order.iter().enumerate() {
            if monitor.cancel_requested() {
                info!("[LF] cancellation requested before panel {}/{}", i + 1, n_total);
                self.transition(RunState::Cancelled);
                break;
            }
            let panel = &self.instance.panels[panel_idx];

            let outcome = match &panel.shape {
                None => PanelOutcome::Unplaced(UnplacedReason::DegenerateInput),
                Some(shape) => search_panel(
                    &self.sheet,
                    panel_idx,
                    shape,
                    panel.lane,
                    &self.config,
                    monitor,
                    &mut self.eval_counter,
                ),
            };

            match outcome {
                PanelOutcome::Placed(placement) => {
                    info!(
                        "[LF] placing panel {}/{} with id {} ({}) at ({:.1}, {:.1}) [{}]",
                        i + 1,
                        n_total,
                        panel.id,
                        panel.style,
                        placement.offset.0,
                        placement.offset.1,
                        placement.orientation
                    );
                    placed.push(PlacedPanel {
                        id: panel.id.clone(),
                        style: panel.style.clone(),
                        orientation: placement.orientation,
                        offset: placement.offset,
                        shape: placement.shape.clone(),
                    });
                    self.sheet.accept(placement);
                }
                PanelOutcome::Unplaced(reason) => {
                    info!(
                        "[LF] panel {}/{} with id {} ({}) not placed: {reason}",
                        i + 1,
                        n_total,
                        panel.id,
                        panel.style
                    );
                    unplaced.push(UnplacedPanel {
                        panel: panel.clone(),
                        reason,
                    });
                }
                PanelOutcome::Interrupted => {
                    info!(
                        "[LF] cancellation requested while searching panel {}/{}",
                        i + 1,
                        n_total
                    );
                    self.transition(RunState::Cancelled);
                    break;
                }
            }
            monitor.report(&placed, i + 1, n_total);
        }

        if self.state == RunState::Running {
            self.transition(RunState::Completed);
        }
        let status = match self.state {
            RunState::Cancelled => RunStatus::Cancelled,
            _ => RunStatus::Completed,
        };

        let result = RunResult {
            placed,
            unplaced,
            status,
            sheet_width: self.sheet.width,
            max_length: self.sheet.max_length,
        };

        debug_assert!(assertions::sheet_is_consistent(&self.sheet));
        debug_assert!(
            status == RunStatus::Cancelled
                || assertions::result_is_partition(&self.instance.panels, &result)
        );

        info!(
            "[LF] run {:?} in {:.3}ms ({} positions evaluated)",
            status,
            start.elapsed().as_secs_f64() * 1000.0,
            self.eval_counter.separate_with_commas()
        );
        info!(
            "[LF] {} placed, {} unplaced, used length {:.2} cm, efficiency {:.2}%",
            result.placed.len(),
            result.unplaced.len(),
            result.used_length(),
            result.efficiency()
        );
        result
    }

    fn transition(&mut self, to: RunState) {
        debug_assert!(matches!(
            (self.state, to),
            (RunState::Idle, RunState::Running)
                | (RunState::Running, RunState::Completed)
                | (RunState::Running, RunState::Cancelled)
        ));
        debug!("[LF] {:?} -> {:?}", self.state, to);
        self.state = to;
    }
}

/// Evaluates every orientation variant of a panel and returns the one with the lowest score.
/// Ties keep the earlier orientation.
fn search_panel(
    sheet: &Sheet,
    panel_idx: usize,
    shape: &SPolygon,
    lane: Lane,
    config: &LFConfig,
    monitor: &mut impl RunMonitor,
    eval_counter: &mut usize,
) -> PanelOutcome {
    let variants = oriented_variants(shape, sheet);
    if variants.is_empty() {
        return PanelOutcome::Unplaced(UnplacedReason::OversizedPanel);
    }

    let mut best: Option<(PlacementScore, Placement)> = None;

    for oriented in variants {
        if config.poll_cancel_per_orientation && monitor.cancel_requested() {
            return PanelOutcome::Interrupted;
        }
        //positions beyond the best score can never improve on it
        let x_limit = best.as_ref().map(|(score, _)| score.value());

        let Some(raw_offset) = first_fit(sheet, &oriented, lane, config, x_limit, eval_counter)
        else {
            debug!("[LF] {}: no position found", oriented.orientation);
            continue;
        };
        let offset = compact(sheet, &oriented, raw_offset, config);
        let placement = Placement::new(panel_idx, &oriented, offset);
        let score = PlacementScore::from_bbox(&placement.bounds(), config.y_tiebreak_weight);

        debug!(
            "[LF] {}: ({:.1}, {:.1}) compacted to ({:.1}, {:.1}), score {:.3}",
            oriented.orientation,
            raw_offset.0,
            raw_offset.1,
            offset.0,
            offset.1,
            score.value()
        );

        if best.as_ref().is_none_or(|(best_score, _)| score < *best_score) {
            best = Some((score, placement));
        }
    }

    match best {
        Some((_, placement)) => PanelOutcome::Placed(placement),
        None => PanelOutcome::Unplaced(UnplacedReason::NoFeasiblePosition),
    }
}
