//! Object tracking with life counters.
//!
//! Turns per-frame detection points into stable tracked objects:
//!
//! 1. **Merge** detections closer than the isolation distance.
//! 2. **Reinforce** existing objects that a detection overlaps: the detection
//!    replaces the object and inherits its life plus a boost.
//! 3. **Zone filter**: detections near the side edges or outside the central
//!    vertical band are not inserted. An object they replaced is gone too.
//! 4. **Age** every object by one frame; expired objects are dropped.
//! 5. **Confirm**: only objects older than `too_young` are reported.
//!
//! Growth (+2 per reinforcement) outpaces decay (-1 per frame), so an object
//! with intermittent detections survives, while one-frame noise never gets
//! reported.

use serde::Serialize;
use steadycam_frame_model::config::TrackerConfig;
use steadycam_frame_model::geometry::{FrameSize, Point2D};

/// An object followed across frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackedObject {
    pub point: Point2D,
    /// Remaining life in frames, in `[0, max_life]`.
    pub life: u32,
}

/// Tracks objects for one video stream, in working-resolution pixels.
#[derive(Debug, Clone)]
pub struct ObjectTracker {
    config: TrackerConfig,
    frame: FrameSize,
    objects: Vec<TrackedObject>,
}

impl ObjectTracker {
    /// Create an empty tracker for frames of the given size.
    pub fn new(config: TrackerConfig, frame: FrameSize) -> Self {
        Self {
            config,
            frame,
            objects: Vec::new(),
        }
    }

    /// Feed one frame of detections and return confirmed object positions.
    pub fn update(&mut self, detections: &[Point2D]) -> Vec<Point2D> {
        let mut candidates = self.merge_candidates(detections);
        let isolation_sq = self.config.isolation * self.config.isolation;

        // Each existing object either hands its life to exactly one candidate
        // (the nearest overlapping one) or survives untouched.
        let mut survivors = Vec::with_capacity(self.objects.len());
        for object in &self.objects {
            let nearest = candidates
                .iter_mut()
                .map(|c| (object.point.distance_sq(&c.point), c))
                .filter(|(d, _)| *d < isolation_sq)
                .min_by(|(a, _), (b, _)| a.total_cmp(b));

            match nearest {
                Some((_, candidate)) => {
                    let boosted = object.life.saturating_add(self.config.reinforce_boost);
                    candidate.life = candidate.life.max(boosted);
                }
                None => survivors.push(*object),
            }
        }

        let matched = candidates.len();
        candidates.retain(|c| self.in_valid_zone(&c.point));
        let discarded = matched - candidates.len();

        let reinforced = candidates.iter().filter(|c| c.life > 1).count();
        let spawned = candidates.len() - reinforced;
        let before_aging = survivors.len() + candidates.len();

        let max_life = self.config.max_life;
        let next: Vec<TrackedObject> = survivors
            .into_iter()
            .chain(candidates.into_iter().map(|mut c| {
                c.life = c.life.min(max_life);
                c
            }))
            .filter_map(|mut object| {
                // Life would go negative: the object expires.
                object.life = object.life.checked_sub(1)?;
                Some(object)
            })
            .collect();

        tracing::trace!(
            detections = detections.len(),
            reinforced,
            spawned,
            discarded,
            expired = before_aging - next.len(),
            live = next.len(),
            "tracker update"
        );

        self.objects = next;
        self.objects()
    }

    /// Confirmed object positions, without advancing state.
    pub fn objects(&self) -> Vec<Point2D> {
        self.objects
            .iter()
            .filter(|o| self.is_confirmed(o))
            .map(|o| o.point)
            .collect()
    }

    /// All live objects, including ones not yet confirmed.
    pub fn tracked(&self) -> &[TrackedObject] {
        &self.objects
    }

    /// Whether an object has lived long enough to be reported.
    pub fn is_confirmed(&self, object: &TrackedObject) -> bool {
        object.life > self.config.too_young
    }

    /// Number of live objects, confirmed or not.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Forget all objects.
    pub fn reset(&mut self) {
        self.objects.clear();
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Whether a detection lies where tracking is trusted: away from the side
    /// edges and inside the central vertical band.
    pub fn in_valid_zone(&self, p: &Point2D) -> bool {
        let width = self.frame.width as f64;
        let height = self.frame.height as f64;
        p.x > self.config.border_zone
            && p.x < width - self.config.border_zone
            && p.y > height * self.config.band_top
            && p.y < height * self.config.band_bottom
    }

    /// Wrap finite detections as fresh objects, merging any that overlap an
    /// earlier one in the same frame. Zone filtering happens after matching.
    fn merge_candidates(&self, detections: &[Point2D]) -> Vec<TrackedObject> {
        let isolation_sq = self.config.isolation * self.config.isolation;
        let mut candidates: Vec<TrackedObject> = Vec::with_capacity(detections.len());

        for p in detections {
            if !p.is_finite() {
                continue;
            }
            if candidates
                .iter()
                .any(|c| c.point.distance_sq(p) < isolation_sq)
            {
                continue;
            }
            candidates.push(TrackedObject {
                point: *p,
                life: 1,
            });
        }

        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> ObjectTracker {
        ObjectTracker::new(TrackerConfig::default(), FrameSize::new(640, 360))
    }

    fn center() -> Point2D {
        Point2D::new(320.0, 180.0)
    }

    #[test]
    fn test_empty_update_is_pure_aging() {
        let mut tracker = tracker();
        assert!(tracker.update(&[]).is_empty());
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_repeated_detection_becomes_confirmed() {
        let mut tracker = tracker();
        let too_young = tracker.config().too_young as usize;

        let mut confirmed_at = None;
        for frame in 1..=50 {
            let confirmed = tracker.update(&[center()]);
            if !confirmed.is_empty() && confirmed_at.is_none() {
                confirmed_at = Some(frame);
            }
        }

        let confirmed_at = confirmed_at.expect("object never confirmed");
        assert!(confirmed_at >= too_young);
        assert_eq!(tracker.objects(), vec![center()]);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_life_grows_by_one_per_reinforced_frame() {
        let mut tracker = tracker();
        for frame in 1..=5u32 {
            tracker.update(&[center()]);
            assert_eq!(tracker.tracked()[0].life, frame - 1);
        }
    }

    #[test]
    fn test_object_vanishes_within_max_life_after_detections_stop() {
        let config = TrackerConfig {
            max_life: 40,
            ..Default::default()
        };
        let mut tracker = ObjectTracker::new(config, FrameSize::new(640, 360));

        for _ in 0..100 {
            tracker.update(&[center()]);
        }
        assert!(tracker.tracked()[0].life <= config.max_life);

        let mut gone_after = None;
        for frame in 1..=config.max_life as usize {
            tracker.update(&[]);
            if tracker.is_empty() {
                gone_after = Some(frame);
                break;
            }
        }
        assert!(gone_after.is_some(), "object outlived max_life");
    }

    #[test]
    fn test_life_is_capped() {
        let mut tracker = tracker();
        for _ in 0..2000 {
            tracker.update(&[center()]);
        }
        let life = tracker.tracked()[0].life;
        assert!(life <= tracker.config().max_life);
        assert_eq!(life, tracker.config().max_life - 1);
    }

    #[test]
    fn test_close_detections_merge_in_one_update() {
        let mut tracker = tracker();
        tracker.update(&[Point2D::new(300.0, 180.0), Point2D::new(330.0, 190.0)]);
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.tracked()[0].point, Point2D::new(300.0, 180.0));
    }

    #[test]
    fn test_far_detections_stay_separate() {
        let mut tracker = tracker();
        tracker.update(&[Point2D::new(150.0, 180.0), Point2D::new(450.0, 180.0)]);
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_detection_replaces_overlapping_object() {
        let mut tracker = tracker();
        for _ in 0..20 {
            tracker.update(&[center()]);
        }
        let moved = Point2D::new(350.0, 185.0);
        tracker.update(&[moved]);

        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.tracked()[0].point, moved);
        assert_eq!(tracker.objects(), vec![moved]);
    }

    #[test]
    fn test_one_prior_life_boosts_only_one_candidate() {
        let mut tracker = tracker();
        for _ in 0..30 {
            tracker.update(&[center()]);
        }
        let old_life = tracker.tracked()[0].life;

        // Two detections 70 px apart, both within isolation of the old object.
        let near = Point2D::new(300.0, 180.0);
        let far = Point2D::new(370.0, 180.0);
        tracker.update(&[far, near]);

        let mut lives: Vec<(f64, u32)> = tracker
            .tracked()
            .iter()
            .map(|o| (o.point.x, o.life))
            .collect();
        lives.sort_by(|a, b| a.0.total_cmp(&b.0));

        assert_eq!(lives.len(), 2);
        // Nearest candidate inherits the boosted life, the other starts fresh.
        assert_eq!(lives[0], (300.0, old_life + 2 - 1));
        assert_eq!(lives[1], (370.0, 0));
    }

    #[test]
    fn test_unmatched_objects_age_and_survive() {
        let mut tracker = tracker();
        for _ in 0..15 {
            tracker.update(&[Point2D::new(150.0, 180.0)]);
        }
        let life = tracker.tracked()[0].life;

        tracker.update(&[Point2D::new(450.0, 180.0)]);
        assert_eq!(tracker.len(), 2);
        let old = tracker
            .tracked()
            .iter()
            .find(|o| o.point.x == 150.0)
            .unwrap();
        assert_eq!(old.life, life - 1);
    }

    #[test]
    fn test_detections_outside_valid_zone_are_never_tracked() {
        let mut tracker = tracker();
        let rejected = [
            Point2D::new(10.0, 180.0),  // left border zone
            Point2D::new(630.0, 180.0), // right border zone
            Point2D::new(320.0, 50.0),  // above the band
            Point2D::new(320.0, 320.0), // below the band
            Point2D::new(320.0, 90.0),  // exactly on the band edge
        ];

        for _ in 0..100 {
            for p in &rejected {
                tracker.update(&[*p]);
                assert!(tracker.is_empty(), "{p:?} was tracked");
            }
        }
    }

    #[test]
    fn test_out_of_zone_detection_still_consumes_overlapping_object() {
        let mut tracker = tracker();
        // Band top is 90 px; the object sits just inside it.
        let inside = Point2D::new(320.0, 100.0);
        for _ in 0..30 {
            tracker.update(&[inside]);
        }
        assert_eq!(tracker.objects(), vec![inside]);

        tracker.update(&[Point2D::new(320.0, 85.0)]);
        assert!(tracker.is_empty(), "{:?}", tracker.tracked());
    }

    #[test]
    fn test_out_of_zone_detection_leaves_distant_objects_alone() {
        let mut tracker = tracker();
        for _ in 0..30 {
            tracker.update(&[center()]);
        }
        let life = tracker.tracked()[0].life;

        tracker.update(&[Point2D::new(320.0, 20.0)]);
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.tracked()[0].life, life - 1);
    }

    #[test]
    fn test_non_finite_detections_are_dropped() {
        let mut tracker = tracker();
        tracker.update(&[Point2D::new(f64::NAN, 180.0), Point2D::new(320.0, f64::INFINITY)]);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_reset_forgets_objects() {
        let mut tracker = tracker();
        for _ in 0..20 {
            tracker.update(&[center()]);
        }
        tracker.reset();
        assert!(tracker.objects().is_empty());
        assert!(tracker.is_empty());
    }

    proptest::proptest! {
        #[test]
        fn prop_objects_stay_isolated(
            frames in proptest::collection::vec(
                proptest::collection::vec((0.0f64..640.0, 0.0f64..360.0), 0..8),
                1..40,
            )
        ) {
            let mut tracker = tracker();
            let isolation_sq = tracker.config().isolation.powi(2);
            let max_life = tracker.config().max_life;

            for frame in frames {
                let points: Vec<Point2D> =
                    frame.into_iter().map(|(x, y)| Point2D::new(x, y)).collect();
                tracker.update(&points);

                let objects = tracker.tracked();
                for (i, a) in objects.iter().enumerate() {
                    proptest::prop_assert!(a.life <= max_life);
                    proptest::prop_assert!(tracker.in_valid_zone(&a.point));
                    for b in &objects[i + 1..] {
                        proptest::prop_assert!(a.point.distance_sq(&b.point) >= isolation_sq);
                    }
                }
            }
        }
    }
}
