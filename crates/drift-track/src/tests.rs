//! Unit tests for drift-track.
//!
//! All tests use hand-crafted waypoint lists; coordinates are from the
//! San Diego shoreline unless the geometry wants round numbers.

#[cfg(test)]
mod helpers {
    use drift_core::GeoPoint;
    use crate::{ProximityTrack, TrackBuilder};

    /// Two shoreline waypoints ~5.6 km apart, segments on, 500 m threshold.
    pub fn shoreline_pair() -> ProximityTrack {
        TrackBuilder::new()
            .waypoint(GeoPoint::new(32.55, -117.13))
            .waypoint(GeoPoint::new(32.60, -117.10))
            .generate_segments(true)
            .threshold_m(500.0)
            .build()
            .expect("valid two-waypoint track")
    }
}

// ── Segment geometry ──────────────────────────────────────────────────────────

#[cfg(test)]
mod segment {
    use crate::Segment;

    #[test]
    fn domain_and_range_are_sorted() {
        let s = Segment::new(3.0, 1.0, 1.0, 2.0);
        assert_eq!(s.dom, (1.0, 3.0));
        assert_eq!(s.rng, (1.0, 2.0));
        assert_eq!(s.slope, Some(-0.5));
    }

    #[test]
    fn vertical_segment_has_no_slope() {
        let s = Segment::new(5.0, 0.0, 5.0, 2.0);
        assert_eq!(s.slope, None);
        assert_eq!(s.dom, (5.0, 5.0));
    }

    #[test]
    fn vertical_projection_keeps_query_y() {
        let s = Segment::new(5.0, 0.0, 5.0, 2.0);
        assert_eq!(s.project(7.5, 1.25), (5.0, 1.25));
    }

    #[test]
    fn horizontal_projection_keeps_query_x() {
        let s = Segment::new(0.0, 4.0, 2.0, 4.0);
        assert_eq!(s.slope, Some(0.0));
        assert_eq!(s.project(1.3, 9.0), (1.3, 4.0));
    }

    #[test]
    fn diagonal_projection_drops_perpendicular() {
        // Foot of (2, 0) on the line y = x is (1, 1).
        let s = Segment::new(0.0, 0.0, 2.0, 2.0);
        let (x, y) = s.project(2.0, 0.0);
        assert!((x - 1.0).abs() < 1e-12, "got x = {x}");
        assert!((y - 1.0).abs() < 1e-12, "got y = {y}");
    }

    #[test]
    fn projection_of_point_on_line_is_identity() {
        let s = Segment::new(0.0, 0.0, 2.0, 1.0);
        let (x, y) = s.project(1.0, 0.5);
        assert!((x - 1.0).abs() < 1e-12);
        assert!((y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn contains_projection_bounds_are_inclusive() {
        let s = Segment::new(1.0, 1.0, 3.0, 2.0);
        assert!(s.contains_projection(1.0, 1.0));
        assert!(s.contains_projection(3.0, 2.0));
        assert!(s.contains_projection(2.0, 1.5));
    }

    #[test]
    fn contains_projection_rejects_outside_box() {
        let s = Segment::new(1.0, 1.0, 3.0, 2.0);
        assert!(!s.contains_projection(0.99, 1.5));
        assert!(!s.contains_projection(2.0, 2.01));
    }
}

// ── Waypoint index ────────────────────────────────────────────────────────────

#[cfg(test)]
mod index {
    use drift_core::{GeoPoint, WaypointId};
    use crate::{TrackError, WaypointIndex};

    fn coastal_points() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(32.55, -117.13),
            GeoPoint::new(32.58, -117.12),
            GeoPoint::new(32.60, -117.10),
        ]
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let err = WaypointIndex::build(&[], false).unwrap_err();
        assert!(matches!(err, TrackError::EmptyWaypoints));
    }

    #[test]
    fn non_finite_waypoint_is_rejected() {
        let points = [
            GeoPoint::new(32.55, -117.13),
            GeoPoint::new(f64::NAN, -117.12),
        ];
        let err = WaypointIndex::build(&points, false).unwrap_err();
        assert!(matches!(err, TrackError::NonFiniteWaypoint { index: 1 }));
    }

    #[test]
    fn nearest_picks_the_closest_waypoint() {
        let idx = WaypointIndex::build(&coastal_points(), false).unwrap();
        assert_eq!(idx.nearest(32.551, -117.131), Some(WaypointId(0)));
        assert_eq!(idx.nearest(32.599, -117.101), Some(WaypointId(2)));
        assert_eq!(idx.nearest(32.579, -117.121), Some(WaypointId(1)));
    }

    #[test]
    fn nearest_is_deterministic() {
        let idx = WaypointIndex::build(&coastal_points(), false).unwrap();
        let first = idx.nearest(32.57, -117.12);
        for _ in 0..10 {
            assert_eq!(idx.nearest(32.57, -117.12), first);
        }
    }

    #[test]
    fn segments_join_consecutive_waypoints() {
        let points = coastal_points();
        let idx = WaypointIndex::build(&points, true).unwrap();
        assert_eq!(idx.segments().len(), 2);
        assert_eq!(idx.segments()[0].x1, points[0].lon);
        assert_eq!(idx.segments()[0].y2, points[1].lat);
    }

    #[test]
    fn segment_generation_disabled_leaves_none() {
        let idx = WaypointIndex::build(&coastal_points(), false).unwrap();
        assert!(idx.segments().is_empty());
        assert!(idx.segment_ending_at(WaypointId(1)).is_none());
        assert!(idx.segment_starting_at(WaypointId(1)).is_none());
    }

    #[test]
    fn adjacent_segment_accessors_at_ends() {
        let idx = WaypointIndex::build(&coastal_points(), true).unwrap();
        assert!(idx.segment_ending_at(WaypointId(0)).is_none());
        assert!(idx.segment_starting_at(WaypointId(0)).is_some());
        assert!(idx.segment_ending_at(WaypointId(2)).is_some());
        assert!(idx.segment_starting_at(WaypointId(2)).is_none());
        assert!(idx.segment_ending_at(WaypointId(1)).is_some());
        assert!(idx.segment_starting_at(WaypointId(1)).is_some());
    }

    #[test]
    fn single_waypoint_track_has_no_segments() {
        let idx = WaypointIndex::build(&[GeoPoint::new(32.55, -117.13)], true).unwrap();
        assert_eq!(idx.len(), 1);
        assert!(idx.segments().is_empty());
    }
}

// ── Track construction ────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use drift_core::{GeoPoint, WaypointId};
    use crate::{TrackBuilder, TrackError};

    #[test]
    fn label_count_mismatch_is_rejected() {
        let err = TrackBuilder::new()
            .waypoint(GeoPoint::new(32.55, -117.13))
            .waypoint(GeoPoint::new(32.58, -117.12))
            .waypoint(GeoPoint::new(32.60, -117.10))
            .labels(["Pier", "River Mouth"])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TrackError::LabelCountMismatch { waypoints: 3, labels: 2 }
        ));
    }

    #[test]
    fn threshold_count_mismatch_is_rejected() {
        let err = TrackBuilder::new()
            .waypoint(GeoPoint::new(32.55, -117.13))
            .waypoint(GeoPoint::new(32.58, -117.12))
            .thresholds_m(vec![500.0])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TrackError::ThresholdCountMismatch { waypoints: 2, thresholds: 1 }
        ));
    }

    #[test]
    fn empty_track_is_rejected() {
        let err = TrackBuilder::new().build().unwrap_err();
        assert!(matches!(err, TrackError::EmptyWaypoints));
    }

    #[test]
    fn labels_and_thresholds_are_index_aligned() {
        let track = TrackBuilder::new()
            .waypoint(GeoPoint::new(32.55, -117.13))
            .waypoint(GeoPoint::new(32.58, -117.12))
            .labels(["Tijuana River Mouth", "Imperial Beach Pier"])
            .thresholds_m(vec![500.0, 250.0])
            .build()
            .unwrap();
        assert_eq!(track.label(WaypointId(0)), Some("Tijuana River Mouth"));
        assert_eq!(track.label(WaypointId(1)), Some("Imperial Beach Pier"));
        assert_eq!(track.threshold_m(WaypointId(0)), 500.0);
        assert_eq!(track.threshold_m(WaypointId(1)), 250.0);
    }

    #[test]
    fn unlabeled_track_has_no_labels() {
        let track = TrackBuilder::new()
            .waypoint(GeoPoint::new(32.55, -117.13))
            .build()
            .unwrap();
        assert!(track.labels().is_none());
        assert_eq!(track.label(WaypointId(0)), None);
    }
}

// ── Closest-distance query ────────────────────────────────────────────────────

#[cfg(test)]
mod closest {
    use drift_core::GeoPoint;
    use crate::{SegmentSearch, TrackBuilder};

    #[test]
    fn waypoint_only_track_falls_back_to_nearest_waypoint() {
        let w0 = GeoPoint::new(32.55, -117.13);
        let w1 = GeoPoint::new(32.60, -117.10);
        let track = TrackBuilder::new()
            .waypoints([w0, w1])
            .generate_segments(false)
            .build()
            .unwrap();

        let query = GeoPoint::new(32.551, -117.131);
        assert_eq!(track.closest_distance_m(query), query.distance_m(w0));
    }

    #[test]
    fn near_first_waypoint_scenario() {
        let track = super::helpers::shoreline_pair();
        let d = track.closest_distance_m(GeoPoint::new(32.551, -117.131));
        assert!(d > 0.0 && d < 200.0, "got {d}");
    }

    #[test]
    fn never_exceeds_nearest_waypoint_distance() {
        let track = super::helpers::shoreline_pair();
        for query in [
            GeoPoint::new(32.57, -117.12),
            GeoPoint::new(32.55, -117.20),
            GeoPoint::new(32.61, -117.09),
        ] {
            let closest = track.closest_distance_m(query);
            let to_waypoints = track
                .waypoints()
                .iter()
                .map(|w| query.distance_m(*w))
                .fold(f64::INFINITY, f64::min);
            assert!(closest <= to_waypoints, "{closest} > {to_waypoints}");
        }
    }

    #[test]
    fn midspan_projection_beats_both_endpoints() {
        // Horizontal segment along the equator; the query sits above its
        // midpoint, so the perpendicular foot wins by a wide margin.
        let w0 = GeoPoint::new(0.0, 0.0);
        let w1 = GeoPoint::new(0.0, 1.0);
        let track = TrackBuilder::new()
            .waypoints([w0, w1])
            .generate_segments(true)
            .build()
            .unwrap();

        let query = GeoPoint::new(0.01, 0.5);
        let d = track.closest_distance_m(query);
        assert!(d < query.distance_m(w0));
        assert!(d < query.distance_m(w1));
        // The foot is 0.01 degrees of latitude away, ~1.1 km.
        assert!((d - 1_112.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn vertical_segment_projects_cleanly() {
        // Both waypoints share a longitude: the pure north-south branch.
        let w0 = GeoPoint::new(32.0, -117.0);
        let w1 = GeoPoint::new(32.1, -117.0);
        let track = TrackBuilder::new()
            .waypoints([w0, w1])
            .generate_segments(true)
            .build()
            .unwrap();

        let query = GeoPoint::new(32.05, -117.01);
        let d = track.closest_distance_m(query);
        assert!(!d.is_nan());
        assert!(d < query.distance_m(w0));
        assert!(d < query.distance_m(w1));
    }

    #[test]
    fn nan_query_yields_nan_not_panic() {
        let track = super::helpers::shoreline_pair();
        assert!(track.closest_distance_m(GeoPoint::new(f64::NAN, -117.13)).is_nan());
        assert!(track.closest_distance_m(GeoPoint::new(32.55, f64::INFINITY)).is_nan());
        assert!(track.nearest_waypoint(GeoPoint::new(f64::NAN, -117.13)).is_none());
    }

    #[test]
    fn exhaustive_search_never_reports_farther() {
        let waypoints = [
            GeoPoint::new(32.55, -117.13),
            GeoPoint::new(32.58, -117.12),
            GeoPoint::new(32.60, -117.10),
            GeoPoint::new(32.63, -117.11),
        ];
        let adjacent = TrackBuilder::new()
            .waypoints(waypoints)
            .generate_segments(true)
            .build()
            .unwrap();
        let exhaustive = TrackBuilder::new()
            .waypoints(waypoints)
            .generate_segments(true)
            .search(SegmentSearch::Exhaustive)
            .build()
            .unwrap();

        for query in [
            GeoPoint::new(32.56, -117.14),
            GeoPoint::new(32.61, -117.10),
            GeoPoint::new(32.59, -117.11),
        ] {
            let a = adjacent.closest_distance_m(query);
            let e = exhaustive.closest_distance_m(query);
            assert!(e <= a, "exhaustive {e} > adjacent {a}");
        }
    }
}

// ── Near-waypoint counting ────────────────────────────────────────────────────

#[cfg(test)]
mod counting {
    use drift_core::GeoPoint;
    use crate::TrackBuilder;

    #[test]
    fn counts_are_index_aligned() {
        let track = super::helpers::shoreline_pair();
        let counts = track.count_near([GeoPoint::new(32.551, -117.131)]);
        assert_eq!(counts, vec![1, 0]);
    }

    #[test]
    fn every_position_is_tallied_per_waypoint() {
        let track = super::helpers::shoreline_pair();
        let batch = [
            GeoPoint::new(32.551, -117.131), // near waypoint 0
            GeoPoint::new(32.550, -117.130), // exactly waypoint 0
            GeoPoint::new(32.601, -117.101), // near waypoint 1
        ];
        let counts = track.count_near(batch);
        assert_eq!(counts, vec![2, 1]);
    }

    #[test]
    fn raising_the_threshold_never_lowers_counts() {
        let waypoints = [
            GeoPoint::new(32.55, -117.13),
            GeoPoint::new(32.60, -117.10),
        ];
        let batch = [
            GeoPoint::new(32.553, -117.133),
            GeoPoint::new(32.57, -117.12),
            GeoPoint::new(32.598, -117.102),
        ];

        let mut previous = vec![0u64; waypoints.len()];
        for threshold in [100.0, 500.0, 2_000.0, 10_000.0] {
            let track = TrackBuilder::new()
                .waypoints(waypoints)
                .threshold_m(threshold)
                .build()
                .unwrap();
            let counts = track.count_near(batch);
            for (now, before) in counts.iter().zip(&previous) {
                assert!(now >= before, "threshold {threshold} lowered a count");
            }
            previous = counts;
        }
    }

    #[test]
    fn per_waypoint_thresholds_count_independently() {
        let track = TrackBuilder::new()
            .waypoint(GeoPoint::new(32.55, -117.13))
            .waypoint(GeoPoint::new(32.56, -117.13))
            .thresholds_m(vec![2_000.0, 0.0])
            .build()
            .unwrap();
        // ~556 m from waypoint 0, ~556 m from waypoint 1: inside the first
        // radius, outside the zero radius.
        let counts = track.count_near([GeoPoint::new(32.555, -117.13)]);
        assert_eq!(counts, vec![1, 0]);
    }

    #[test]
    fn nan_positions_are_skipped_not_fatal() {
        let track = super::helpers::shoreline_pair();
        let batch = [
            GeoPoint::new(f64::NAN, -117.131),
            GeoPoint::new(32.551, -117.131),
            GeoPoint::new(32.551, f64::NAN),
        ];
        assert_eq!(track.count_near(batch), vec![1, 0]);
    }

    #[test]
    fn zero_radius_still_counts_exact_hits() {
        let w0 = GeoPoint::new(32.55, -117.13);
        let track = TrackBuilder::new()
            .waypoint(w0)
            .threshold_m(0.0)
            .build()
            .unwrap();
        assert_eq!(track.count_near([w0]), vec![1]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_counting_matches_serial() {
        let track = super::helpers::shoreline_pair();
        let batch: Vec<GeoPoint> = (0..500)
            .map(|i| GeoPoint::new(32.54 + 0.0002 * i as f64, -117.131))
            .collect();
        assert_eq!(track.par_count_near(&batch), track.count_near(batch.iter().copied()));
    }
}
