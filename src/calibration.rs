// Interactive calibration of a camera view. Fitting the board from a video frame is done
// elsewhere; this module only keeps and adjusts the resulting parameters.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::board::{BoardGeometry, RingFractions, Target};
use crate::coord::Point;
use crate::error::DartsError;


const SQUASH_STEP: f64 = 0.01;
const MIN_SQUASH: f64 = 0.1;
const TREBLE_STEP: f64 = 0.01;
const BULL_STEP: f64 = 0.002;
const MIN_INNER_BULL: f64 = 0.005;
const DOUBLE_STEP: f64 = 0.005;
const MIN_INNER_DOUBLE: f64 = 0.01;
const ANGLE_STEP_DEG: f64 = 1.0;

// Treble center measured on a regulation board: 103mm / 170mm.
const DETECTED_TREBLE_CENTER: f64 = 0.606;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Decrease,
    Increase,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Direction::Decrease => -1.0,
            Direction::Increase => 1.0,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CalibrationAdjustment {
    Squash(Direction),
    TrebleCenter(Direction),
    InnerBull(Direction),
    OuterBull(Direction),
    InnerDouble(Direction),
    OuterDouble(Direction),
    Rotation(Direction),
    Tilt(Direction),
}


#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalibrationSession {
    center: Option<Point>,
    radius: Option<f64>,
    squash: f64,
    rotation_deg: f64,
    tilt_deg: f64,
    rings: RingFractions,
}

impl CalibrationSession {
    pub fn new() -> Self {
        CalibrationSession {
            center: None,
            radius: None,
            squash: 1.0,
            rotation_deg: 0.0,
            tilt_deg: 0.0,
            rings: RingFractions::standard(),
        }
    }

    pub fn center(&self) -> Option<Point> { self.center }
    pub fn radius(&self) -> Option<f64> { self.radius }
    pub fn squash(&self) -> f64 { self.squash }
    pub fn rotation_deg(&self) -> f64 { self.rotation_deg }
    pub fn tilt_deg(&self) -> f64 { self.tilt_deg }
    pub fn rings(&self) -> &RingFractions { &self.rings }
    pub fn is_complete(&self) -> bool { self.center.is_some() && self.radius.is_some() }

    pub fn set_center(&mut self, center: Point) {
        debug!("Calibration center set to {:?}", center);
        self.center = Some(center);
    }

    // The radius is measured in the corrected space: a point on the outer double edge gives
    // the same radius wherever on the ellipse it was picked.
    pub fn set_radius_from_edge(&mut self, edge: Point) -> Result<f64, DartsError> {
        let center = self.center.ok_or_else(|| {
            DartsError::InvalidCalibration("center must be set before the radius".to_owned())
        })?;
        let radius = (edge - center).rotated(-self.tilt_deg).scale_y(1.0 / self.squash).length();
        if !(radius.is_finite() && radius > 0.0) {
            return Err(DartsError::InvalidCalibration(format!("bad radius {}", radius)));
        }
        debug!("Calibration radius set to {:.2}", radius);
        self.radius = Some(radius);
        Ok(radius)
    }

    pub fn clear(&mut self) {
        info!("Calibration cleared");
        self.center = None;
        self.radius = None;
    }

    pub fn reset_rings(&mut self) {
        self.rings = RingFractions {
            treble_center: DETECTED_TREBLE_CENTER,
            ..RingFractions::standard()
        };
    }

    // Takes the ellipse found by an external board detector.
    pub fn apply_detection(&mut self, center: Point, radius: f64, squash: f64, tilt_deg: f64) {
        self.center = Some(center);
        self.radius = Some(radius);
        self.squash = squash;
        self.tilt_deg = tilt_deg;
        self.reset_rings();
        info!(
            "Board detected: center={:?}, radius={:.1}, squash={:.2}, tilt={:.1}",
            center, radius, squash, tilt_deg
        );
    }

    // Single-step nudge. Each ring boundary is clamped against its neighbour the way a
    // person adjusting them one key press at a time would expect.
    pub fn adjust(&mut self, adjustment: CalibrationAdjustment) {
        use CalibrationAdjustment::*;
        let rings = &mut self.rings;
        match adjustment {
            Squash(dir) => self.squash = (self.squash + dir.sign() * SQUASH_STEP).max(MIN_SQUASH),
            TrebleCenter(dir) => rings.treble_center += dir.sign() * TREBLE_STEP,
            InnerBull(dir) => {
                rings.inner_bull = (rings.inner_bull + dir.sign() * BULL_STEP).max(MIN_INNER_BULL)
            }
            OuterBull(dir) => {
                rings.outer_bull = (rings.outer_bull + dir.sign() * BULL_STEP).max(rings.inner_bull)
            }
            InnerDouble(dir) => {
                rings.inner_double = (rings.inner_double + dir.sign() * DOUBLE_STEP)
                    .clamp(MIN_INNER_DOUBLE, rings.outer_double)
            }
            OuterDouble(dir) => {
                rings.outer_double =
                    (rings.outer_double + dir.sign() * DOUBLE_STEP).max(rings.inner_double)
            }
            Rotation(dir) => self.rotation_deg += dir.sign() * ANGLE_STEP_DEG,
            Tilt(dir) => self.tilt_deg += dir.sign() * ANGLE_STEP_DEG,
        }
        debug!("Calibration adjusted: {:?}", adjustment);
    }

    // Fails while the center or the radius are unknown, or if the adjustments broke the ring
    // ordering (e.g. the treble center was pushed past the double ring).
    pub fn geometry(&self) -> Result<BoardGeometry, DartsError> {
        let (Some(center), Some(radius)) = (self.center, self.radius) else {
            return Err(DartsError::InvalidCalibration("calibration is incomplete".to_owned()));
        };
        BoardGeometry::new(
            center, radius, self.squash, self.rotation_deg, self.tilt_deg, self.rings,
        )
    }

    pub fn score_click(&self, click: Point) -> Result<Target, DartsError> {
        let target = self.geometry()?.score_from_point(click);
        debug!("Test click at {:?} -> {}", click, target);
        Ok(target)
    }
}
