#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::path::Path;

    use float_cmp::approx_eq;
    use log::LevelFilter;
    use test_case::test_case;

    use lanefill::config::LFConfig;
    use lanefill::io;
    use lanefill::opt::batch::{RunJob, solve_batch};
    use lanefill::opt::lanefill_opt::{LaneFillOptimizer, RunState};
    use lanefill::opt::monitor::{CancelToken, FnMonitor, NoMonitor};
    use lanefill::opt::search::{first_fit, y_scan_order};
    use lanefill::opt::sequence::panel_placement_order;
    use marker_core::entities::{
        Instance, LANE_A_SUFFIX, Lane, OrientedShape, Panel, PanelId, Placement, RunResult,
        RunStatus, Sheet, UnplacedReason,
    };
    use marker_core::geometry::{Orientation, Rotation};
    use marker_core::geometry::primitives::{Point, SPolygon};
    use marker_core::io::export::export_solution;
    use marker_core::io::import::Importer;
    use marker_core::util::assertions;

    fn init_logger() {
        let _ = env_logger::Builder::from_default_env()
            .filter_level(LevelFilter::Info)
            .try_init();
    }

    fn rect(w: f64, h: f64) -> Vec<Point> {
        vec![Point(0.0, 0.0), Point(w, 0.0), Point(w, h), Point(0.0, h)]
    }

    fn panel(id: u64, style: &str, outline: Vec<Point>) -> Panel {
        Panel::new(id, style, outline, LANE_A_SUFFIX)
    }

    fn instance(sheet_width: f64, max_length: f64, panels: Vec<Panel>) -> Instance {
        Instance {
            name: "test".to_string(),
            sheet_width,
            max_length,
            min_length: None,
            panels,
        }
    }

    fn solve(instance: Instance) -> RunResult {
        init_logger();
        LaneFillOptimizer::new(instance, LFConfig::default())
            .unwrap()
            .solve(&mut NoMonitor)
    }

    /// A mix of rectangles, triangles, L-shapes and trapezoids in both lanes,
    /// including a clockwise outline, a closed outline, an oversized and a degenerate panel.
    fn mixed_instance() -> Instance {
        let triangle = vec![Point(0.0, 0.0), Point(15.0, 0.0), Point(0.0, 12.0)];
        let l_shape = vec![
            Point(0.0, 0.0),
            Point(12.0, 0.0),
            Point(12.0, 4.0),
            Point(4.0, 4.0),
            Point(4.0, 10.0),
            Point(0.0, 10.0),
        ];
        let trapezoid = vec![
            Point(0.0, 0.0),
            Point(16.0, 0.0),
            Point(12.0, 8.0),
            Point(4.0, 8.0),
        ];
        let clockwise = rect(8.0, 5.0).into_iter().rev().collect::<Vec<_>>();
        let closed = vec![
            Point(0.0, 0.0),
            Point(10.0, 0.0),
            Point(10.0, 7.0),
            Point(0.0, 0.0),
        ];
        let panels = vec![
            panel(1, "SHIRT_A", rect(20.0, 10.0)),
            panel(1, "SHIRT_A", rect(20.0, 10.0)),
            panel(2, "SHIRT_B", triangle.clone()),
            panel(2, "SHIRT_B", triangle.clone()),
            panel(2, "SHIRT_B", triangle),
            panel(3, "PANTS", l_shape.clone()),
            panel(3, "PANTS", l_shape),
            panel(4, "PANTS_A", trapezoid),
            panel(5, "POCKET", clockwise),
            panel(6, "POCKET_A", closed),
            panel(7, "BELT", rect(300.0, 5.0)),
            panel(8, "LABEL", vec![Point(0.0, 0.0), Point(1.0, 1.0), Point(2.0, 2.0)]),
        ];
        instance(60.0, 200.0, panels)
    }

    #[test_case("FRONT_A"; "lane a")]
    #[test_case("FRONT_B"; "lane b")]
    fn single_square_goes_to_origin(style: &str) {
        let result = solve(instance(10.0, 100.0, vec![panel(1, style, rect(4.0, 4.0))]));

        assert_eq!(result.status, RunStatus::Completed);
        assert_eq!(result.placed.len(), 1);
        assert!(result.unplaced.is_empty());

        let bbox = result.placed[0].shape.bbox;
        assert!(approx_eq!(f64, bbox.x_min, 0.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, bbox.y_min, 0.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, bbox.x_max, 4.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, bbox.y_max, 4.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, result.used_length(), 4.0, epsilon = 1e-9));

        let solution = export_solution(&result, 0);
        assert_eq!(solution.used_length, 4.0);
        assert_eq!(solution.efficiency, 40.0);
    }

    #[test]
    fn second_square_is_compacted_next_to_the_first() {
        let panels = vec![panel(1, "A", rect(4.0, 4.0)), panel(2, "A", rect(4.0, 4.0))];
        let result = solve(instance(4.0, 100.0, panels));

        assert_eq!(result.placed.len(), 2);
        let first = result.placed[0].shape.bbox;
        let second = result.placed[1].shape.bbox;
        assert_eq!(result.placed[0].id, PanelId::Int(1));

        assert!(approx_eq!(f64, first.x_min, 0.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, first.x_max, 4.0, epsilon = 1e-9));
        // touching counts as intersecting, so compaction stops one step short
        assert!(approx_eq!(f64, second.x_min, 4.5, epsilon = 1e-9));
        assert!(approx_eq!(f64, second.x_max, 8.5, epsilon = 1e-9));
        assert!(approx_eq!(f64, second.y_min, 0.0, epsilon = 1e-9));
        assert!(assertions::placed_panels_are_disjoint(&result));
    }

    #[test]
    fn oversized_panel_is_unplaced() {
        let panels = vec![
            panel(1, "BELT", rect(150.0, 20.0)),
            panel(2, "POCKET", rect(4.0, 4.0)),
        ];
        let result = solve(instance(10.0, 100.0, panels));

        assert_eq!(result.status, RunStatus::Completed);
        assert_eq!(result.unplaced.len(), 1);
        assert_eq!(result.unplaced[0].panel.id, PanelId::Int(1));
        assert_eq!(result.unplaced[0].reason, UnplacedReason::OversizedPanel);
        assert_eq!(result.placed.len(), 1);
    }

    #[test]
    fn full_sheet_leaves_panel_unplaced() {
        let panels = (0..3).map(|i| panel(i, "A", rect(4.0, 4.0))).collect();
        let result = solve(instance(4.0, 10.0, panels));

        assert_eq!(result.placed.len(), 2);
        assert_eq!(result.unplaced.len(), 1);
        assert_eq!(result.unplaced[0].panel.id, PanelId::Int(2));
        assert_eq!(
            result.unplaced[0].reason,
            UnplacedReason::NoFeasiblePosition
        );
    }

    #[test_case(vec![Point(0.0, 0.0), Point(5.0, 5.0)]; "two points")]
    #[test_case(vec![Point(0.0, 0.0), Point(1.0, 1.0), Point(2.0, 2.0)]; "collinear")]
    #[test_case(vec![Point(1.0, 1.0), Point(1.0, 1.0), Point(1.0, 1.0), Point(1.0, 1.0)]; "single point")]
    #[test_case(vec![Point(-1e308, -1e308), Point(1e308, -1e308), Point(1e308, 1e308), Point(-1e308, 1e308)]; "overflowing area")]
    fn degenerate_panel_is_unplaced(outline: Vec<Point>) {
        let panels = vec![
            panel(1, "LABEL", outline),
            panel(2, "POCKET", rect(4.0, 4.0)),
        ];
        let result = solve(instance(10.0, 100.0, panels));

        assert_eq!(result.placed.len(), 1);
        assert_eq!(result.unplaced.len(), 1);
        assert_eq!(result.unplaced[0].reason, UnplacedReason::DegenerateInput);
    }

    #[test]
    fn mixed_instance_respects_invariants() {
        let instance = mixed_instance();
        let panels = instance.panels.clone();
        let result = solve(instance);

        assert_eq!(result.status, RunStatus::Completed);
        assert!(assertions::placed_panels_are_disjoint(&result));
        assert!(assertions::placed_panels_within_sheet(&result));
        assert!(assertions::result_is_partition(&panels, &result));

        let reasons = result.unplaced.iter().map(|u| u.reason).collect::<Vec<_>>();
        assert!(reasons.contains(&UnplacedReason::OversizedPanel));
        assert!(reasons.contains(&UnplacedReason::DegenerateInput));
        assert_eq!(result.placed.len(), panels.len() - 2);
        assert!(result.efficiency() > 0.0 && result.efficiency() <= 100.0);
    }

    #[test]
    fn identical_inputs_give_identical_results() {
        let r1 = solve(mixed_instance());
        let r2 = solve(mixed_instance());

        assert_eq!(r1.placed.len(), r2.placed.len());
        for (p1, p2) in r1.placed.iter().zip(r2.placed.iter()) {
            assert_eq!(p1.id, p2.id);
            assert_eq!(p1.orientation, p2.orientation);
            assert_eq!(p1.offset, p2.offset);
            assert_eq!(p1.shape.points, p2.shape.points);
        }
        let unplaced_ids = |r: &RunResult| {
            r.unplaced
                .iter()
                .map(|u| u.panel.id.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(unplaced_ids(&r1), unplaced_ids(&r2));
    }

    #[test]
    fn progress_is_reported_once_per_panel() {
        init_logger();
        let instance = mixed_instance();
        let n_panels = instance.panels.len();
        let reports = RefCell::new(vec![]);

        let mut monitor = FnMonitor::new(
            |placed: &[_], n_processed, n_total| {
                reports.borrow_mut().push((placed.len(), n_processed, n_total))
            },
            || false,
        );
        let result = LaneFillOptimizer::new(instance, LFConfig::default())
            .unwrap()
            .solve(&mut monitor);

        let reports = reports.into_inner();
        assert_eq!(reports.len(), n_panels);
        for (i, &(n_placed, n_processed, n_total)) in reports.iter().enumerate() {
            assert_eq!(n_processed, i + 1);
            assert_eq!(n_total, n_panels);
            assert!(n_placed <= n_processed);
        }
        assert!(reports.windows(2).all(|w| w[0].0 <= w[1].0));
        assert_eq!(reports.last().unwrap().0, result.placed.len());
    }

    #[test_case(0; "before the first panel")]
    #[test_case(1; "before the second panel")]
    #[test_case(4; "before the fifth panel")]
    fn cancellation_truncates_the_run(k: usize) {
        init_logger();
        let panels = (0..6).map(|i| panel(i, "B", rect(4.0, 4.0))).collect();
        let n_processed = Cell::new(0);

        let mut monitor = FnMonitor::new(
            |_: &[_], n, _| n_processed.set(n),
            || n_processed.get() >= k,
        );
        let result = LaneFillOptimizer::new(instance(10.0, 100.0, panels), LFConfig::default())
            .unwrap()
            .solve(&mut monitor);

        assert_eq!(result.status, RunStatus::Cancelled);
        assert_eq!(result.n_processed(), k);
        assert!(assertions::placed_panels_are_disjoint(&result));
    }

    #[test]
    fn cancel_token_stops_after_the_first_panel() {
        init_logger();
        let panels = (0..5).map(|i| panel(i, "A", rect(4.0, 4.0))).collect();
        let token = CancelToken::new();

        let mut monitor = FnMonitor::new(
            |_: &[_], n, _| {
                if n == 1 {
                    token.cancel()
                }
            },
            || token.is_cancelled(),
        );
        let result = LaneFillOptimizer::new(instance(10.0, 100.0, panels), LFConfig::default())
            .unwrap()
            .solve(&mut monitor);

        assert_eq!(result.status, RunStatus::Cancelled);
        assert_eq!(result.placed.len() + result.unplaced.len(), 1);
    }

    #[test]
    fn cancellation_during_orientation_search_abandons_the_panel() {
        init_logger();
        let panels = (0..3).map(|i| panel(i, "A", rect(4.0, 4.0))).collect();
        // first panel: one poll before the panel and eight before its orientations
        let n_polls = Cell::new(0);
        let mut monitor = FnMonitor::new(
            |_: &[_], _, _| {},
            || {
                n_polls.set(n_polls.get() + 1);
                n_polls.get() > 12
            },
        );
        let result = LaneFillOptimizer::new(instance(10.0, 100.0, panels), LFConfig::default())
            .unwrap()
            .solve(&mut monitor);

        assert_eq!(result.status, RunStatus::Cancelled);
        assert_eq!(result.placed.len(), 1);
        assert!(result.unplaced.is_empty());
    }

    #[test]
    fn optimizer_starts_idle() {
        let optimizer =
            LaneFillOptimizer::new(instance(10.0, 100.0, vec![]), LFConfig::default()).unwrap();
        assert_eq!(optimizer.state(), RunState::Idle);

        let result = optimizer.solve(&mut NoMonitor);
        assert_eq!(result.status, RunStatus::Completed);
        assert_eq!(result.used_length(), 0.0);
        assert_eq!(result.efficiency(), 0.0);
    }

    #[test]
    fn invalid_sheet_is_rejected() {
        assert!(LaneFillOptimizer::new(instance(0.0, 100.0, vec![]), LFConfig::default()).is_err());
        let config = LFConfig {
            grid_step: 0.0,
            ..LFConfig::default()
        };
        assert!(LaneFillOptimizer::new(instance(10.0, 100.0, vec![]), config).is_err());
    }

    #[test]
    fn panels_are_ordered_by_area_then_extent() {
        let panels = vec![
            panel(0, "B", rect(2.0, 2.0)),
            panel(1, "B", rect(16.0, 1.0)),
            panel(2, "B", rect(4.0, 4.0)),
            panel(3, "B", rect(3.0, 3.0)),
            panel(4, "B", rect(3.0, 3.0)),
            panel(5, "B", vec![Point(0.0, 0.0), Point(1.0, 1.0)]),
        ];
        // the strip and the 4x4 square share an area, the strip has the larger extent
        assert_eq!(panel_placement_order(&panels), vec![1, 2, 3, 4, 0, 5]);
    }

    #[test]
    fn largest_panel_is_placed_first() {
        let panels = vec![
            panel(1, "B", rect(2.0, 2.0)),
            panel(2, "B", rect(4.0, 4.0)),
            panel(3, "B", rect(16.0, 1.0)),
        ];
        let result = solve(instance(10.0, 100.0, panels));

        let ids = result.placed.iter().map(|p| p.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids, vec![PanelId::Int(3), PanelId::Int(2), PanelId::Int(1)]);
        let strip = result.placed[0].shape.bbox;
        assert!(approx_eq!(f64, strip.x_min, 0.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, strip.y_min, 0.0, epsilon = 1e-9));
    }

    #[test]
    fn only_the_rotated_panel_fits() {
        // 15 high in its original orientation, the sheet is only 4 wide
        let result = solve(instance(4.0, 20.0, vec![panel(1, "B", rect(3.0, 15.0))]));

        assert_eq!(result.placed.len(), 1);
        let placed = &result.placed[0];
        // 270° gives the same score and comes later
        assert_eq!(
            placed.orientation,
            Orientation {
                rotation: Rotation::Deg90,
                mirrored: false
            }
        );
        let bbox = placed.shape.bbox;
        assert!(approx_eq!(f64, bbox.x_min, 0.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, bbox.y_min, 0.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, bbox.x_max, 15.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, bbox.y_max, 3.0, epsilon = 1e-9));
    }

    #[test]
    fn shorter_orientation_wins() {
        // upright the panel ends at x = 2 instead of x = 6
        let result = solve(instance(10.0, 100.0, vec![panel(1, "A_A", rect(6.0, 2.0))]));

        let placed = &result.placed[0];
        assert_eq!(placed.orientation.rotation, Rotation::Deg90);
        assert!(!placed.orientation.mirrored);
        assert!(approx_eq!(f64, placed.shape.bbox.x_max, 2.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, placed.shape.bbox.y_max, 6.0, epsilon = 1e-9));
    }

    #[test]
    fn tied_orientations_keep_the_first() {
        // mirrored or turned half way, the triangle has the same bounding box and the same score
        let triangle = vec![Point(0.0, 0.0), Point(3.0, 0.0), Point(0.0, 4.0)];
        let result = solve(instance(10.0, 100.0, vec![panel(1, "A_A", triangle)]));

        assert_eq!(result.placed.len(), 1);
        assert_eq!(result.placed[0].orientation, Orientation::IDENTITY);
        assert!(approx_eq!(f64, result.placed[0].shape.bbox.x_max, 3.0, epsilon = 1e-9));
    }

    #[test]
    fn lanes_scan_in_their_own_order() {
        assert_eq!(
            y_scan_order(Lane::B, 30.0, 4.0, 3.0),
            vec![15.0, 18.0, 21.0, 24.0, 0.0, 3.0, 6.0, 9.0, 12.0]
        );
        assert_eq!(
            y_scan_order(Lane::A, 30.0, 4.0, 3.0),
            vec![0.0, 3.0, 6.0, 9.0, 12.0, 15.0, 18.0, 21.0, 24.0]
        );
        // no grid value between half the width and the top, only the wrapped part remains
        assert_eq!(y_scan_order(Lane::B, 10.0, 8.0, 3.0), vec![0.0]);
        assert_eq!(y_scan_order(Lane::B, 4.0, 4.0, 3.0), vec![0.0]);
    }

    #[test]
    fn lane_b_search_starts_at_half_width() {
        let config = LFConfig::default();
        let mut sheet = Sheet::new(30.0, 100.0).unwrap();
        let square = OrientedShape::new(
            &SPolygon::try_new(rect(4.0, 4.0)).unwrap(),
            Orientation::IDENTITY,
        );
        let mut n_evals = 0;

        let raw_b = first_fit(&sheet, &square, Lane::B, &config, None, &mut n_evals);
        let raw_a = first_fit(&sheet, &square, Lane::A, &config, None, &mut n_evals);
        assert_eq!(raw_b, Some((0.0, 15.0)));
        assert_eq!(raw_a, Some((0.0, 0.0)));

        // occupy the upper part of the first columns, lane B wraps around to the bottom
        let block = OrientedShape::new(
            &SPolygon::try_new(rect(10.0, 18.0)).unwrap(),
            Orientation::IDENTITY,
        );
        sheet.accept(Placement::new(0, &block, (0.0, 12.0)));
        let raw_b = first_fit(&sheet, &square, Lane::B, &config, None, &mut n_evals);
        assert_eq!(raw_b, Some((0.0, 0.0)));

        // positions beyond the limit are never considered
        let pruned = first_fit(&sheet, &block, Lane::A, &config, Some(6.0), &mut n_evals);
        assert_eq!(pruned, None);
    }

    #[test]
    fn batch_matches_sequential_runs() {
        init_logger();
        let jobs = vec![
            RunJob {
                instance: mixed_instance(),
                config: LFConfig::default(),
            },
            RunJob {
                instance: instance(
                    4.0,
                    100.0,
                    (0..4).map(|i| panel(i, "A", rect(4.0, 4.0))).collect(),
                ),
                config: LFConfig::default(),
            },
        ];
        let sequential = jobs
            .iter()
            .map(|job| solve(job.instance.clone()))
            .collect::<Vec<_>>();
        let batch = solve_batch(jobs, &CancelToken::new());

        assert_eq!(batch.len(), sequential.len());
        for (b, s) in batch.into_iter().zip(sequential) {
            let b = b.unwrap();
            assert_eq!(b.status, s.status);
            let offsets = |r: &RunResult| r.placed.iter().map(|p| p.offset).collect::<Vec<_>>();
            assert_eq!(offsets(&b), offsets(&s));
        }
    }

    #[test]
    fn cancelled_batch_processes_nothing() {
        let token = CancelToken::new();
        token.cancel();
        let jobs = vec![RunJob {
            instance: mixed_instance(),
            config: LFConfig::default(),
        }];
        let results = solve_batch(jobs, &token);
        let result = results[0].as_ref().unwrap();
        assert_eq!(result.status, RunStatus::Cancelled);
        assert_eq!(result.n_processed(), 0);
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: LFConfig = serde_json::from_str(r#"{"grid_step": 1.5}"#).unwrap();
        assert_eq!(config.grid_step, 1.5);
        assert_eq!(config.compaction_step, 0.5);
        assert_eq!(config.lane_a_suffix, "_A");
        assert!(config.poll_cancel_per_orientation);
    }

    #[test_case("../assets/mixed_styles.json"; "mixed_styles")]
    fn test_instance(instance_path: &str) {
        init_logger();
        let ext_instance = io::read_instance(Path::new(instance_path)).unwrap();
        let config = LFConfig::default();
        let instance = Importer::new(config.lane_a_suffix.clone())
            .import_instance(&ext_instance)
            .unwrap();
        let panels = instance.panels.clone();

        let result = LaneFillOptimizer::new(instance, config)
            .unwrap()
            .solve(&mut NoMonitor);

        assert!(!result.placed.is_empty());
        assert!(assertions::placed_panels_are_disjoint(&result));
        assert!(assertions::placed_panels_within_sheet(&result));
        assert!(assertions::result_is_partition(&panels, &result));

        let solution = export_solution(&result, 0);
        assert_eq!(solution.placed.len(), result.placed.len());
        assert!(solution.used_length <= ext_instance.sheet.max_length);
    }
}
