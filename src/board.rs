use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::coord::Point;
use crate::dart::{MISS_TOKEN, Multiplier, NUM_SEGMENTS, SEGMENTS, segment_index};
use crate::error::DartsError;


pub const SEGMENT_ARC_DEG: f64 = 360.0 / NUM_SEGMENTS as f64;

// The treble ring is calibrated by its center line; it extends this far to either side.
pub const TREBLE_HALF_WIDTH: f64 = 0.03;

// Random jitter around the segment center used when synthesizing a landing point.
const SEGMENT_JITTER_DEG: f64 = 8.0;


// Ring boundaries as fractions of the outer radius (the outer edge of the double ring).
// Must satisfy `0 < inner_bull < outer_bull < treble_center < inner_double <= outer_double`.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct RingFractions {
    pub inner_bull: f64,
    pub outer_bull: f64,
    pub treble_center: f64,
    pub inner_double: f64,
    pub outer_double: f64,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Ring {
    InnerBull,
    OuterBull,
    Single,
    Treble,
    Double,
    OffBoard,
}

impl RingFractions {
    // Regulation board: 6.35mm, 15.9mm, 103mm, 162mm and 170mm from the center.
    pub fn standard() -> Self {
        RingFractions {
            inner_bull: 0.0374,
            outer_bull: 0.0935,
            treble_center: 0.61,
            inner_double: 0.953,
            outer_double: 1.0,
        }
    }

    pub fn validate(&self) -> Result<(), DartsError> {
        let fractions = [
            self.inner_bull,
            self.outer_bull,
            self.treble_center,
            self.inner_double,
            self.outer_double,
        ];
        if fractions.iter().any(|f| !f.is_finite()) {
            return Err(DartsError::InvalidCalibration("ring fractions must be finite".to_owned()));
        }
        let ordered = 0.0 < self.inner_bull
            && self.inner_bull < self.outer_bull
            && self.outer_bull < self.treble_center
            && self.treble_center < self.inner_double
            && self.inner_double <= self.outer_double;
        if !ordered {
            return Err(DartsError::InvalidCalibration(format!(
                "ring fractions out of order: {:?}",
                fractions
            )));
        }
        Ok(())
    }

    // Checks are ordered: bulls first, then treble, then double. Overlapping bands resolve to
    // whichever is tested first.
    pub fn classify(&self, norm_dist: f64) -> Ring {
        if norm_dist <= self.inner_bull {
            Ring::InnerBull
        } else if norm_dist <= self.outer_bull {
            Ring::OuterBull
        } else if (self.treble_lo()..=self.treble_hi()).contains(&norm_dist) {
            Ring::Treble
        } else if (self.inner_double..=self.outer_double).contains(&norm_dist) {
            Ring::Double
        } else if norm_dist > self.outer_double {
            Ring::OffBoard
        } else {
            Ring::Single
        }
    }

    fn treble_lo(&self) -> f64 { self.treble_center - TREBLE_HALF_WIDTH }
    fn treble_hi(&self) -> f64 { self.treble_center + TREBLE_HALF_WIDTH }

    // Radial intervals that `classify` maps to the given ring. Intervals are open at both
    // ends; empty ones are dropped.
    fn bands(&self, ring: Ring) -> Vec<(f64, f64)> {
        let bands = match ring {
            Ring::InnerBull => vec![(0.0, self.inner_bull)],
            Ring::OuterBull => vec![(self.inner_bull, self.outer_bull)],
            Ring::Treble => vec![(self.treble_lo().max(self.outer_bull), self.treble_hi())],
            Ring::Double => vec![(self.inner_double.max(self.treble_hi()), self.outer_double)],
            Ring::Single => vec![
                (self.outer_bull, self.treble_lo()),
                (self.treble_hi(), self.inner_double),
            ],
            Ring::OffBoard => vec![],
        };
        bands.into_iter().filter(|(lo, hi)| hi - lo > 1e-9).collect()
    }
}

impl Default for RingFractions {
    fn default() -> Self { Self::standard() }
}


// What a dart hit, in typed form. `Display` renders dart notation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Target {
    Miss,
    OuterBull,
    InnerBull,
    Segment(Multiplier, u8),
}

impl Target {
    // Accepts the same notation as `dart::parse_dart`, but only for spots that exist on a
    // board: segment numbers must be 1 to 20.
    pub fn from_token(token: &str) -> Option<Self> {
        let s = token.trim().to_ascii_uppercase();
        match s.as_str() {
            MISS_TOKEN | "0" => return Some(Target::Miss),
            "50" => return Some(Target::InnerBull),
            "25" => return Some(Target::OuterBull),
            _ => {}
        }
        let (multiplier, digits) = match s.chars().next().and_then(Multiplier::from_letter) {
            Some(m) => (m, &s[1..]),
            None => (Multiplier::Single, s.as_str()),
        };
        if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
            return None;
        }
        let segment: u8 = digits.parse().ok()?;
        segment_index(segment)?;
        Some(Target::Segment(multiplier, segment))
    }

    pub fn ring(self) -> Ring {
        match self {
            Target::Miss => Ring::OffBoard,
            Target::OuterBull => Ring::OuterBull,
            Target::InnerBull => Ring::InnerBull,
            Target::Segment(Multiplier::Single, _) => Ring::Single,
            Target::Segment(Multiplier::Double, _) => Ring::Double,
            Target::Segment(Multiplier::Treble, _) => Ring::Treble,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Miss => f.write_str(MISS_TOKEN),
            Target::OuterBull => f.write_str("25"),
            Target::InnerBull => f.write_str("50"),
            Target::Segment(Multiplier::Single, segment) => write!(f, "{}", segment),
            Target::Segment(multiplier, segment) => {
                write!(f, "{}{}", multiplier.to_letter(), segment)
            }
        }
    }
}


// Screen angle of the segment center on an unrotated board. The 20 is straight up (-90°).
fn segment_center_angle(segment: u8) -> Option<f64> {
    segment_index(segment).map(|idx| idx as f64 * SEGMENT_ARC_DEG - 90.0)
}

// The 20 sector spans [-9°, 9°] around `board_angle` = 0, which grows clockwise from the top.
fn segment_at_angle(board_angle: f64) -> u8 {
    let shifted = (board_angle + SEGMENT_ARC_DEG / 2.0).rem_euclid(360.0);
    // `rem_euclid` can round up to exactly 360.0 for tiny negative inputs.
    let idx = (shifted / SEGMENT_ARC_DEG) as usize % NUM_SEGMENTS;
    SEGMENTS[idx]
}


// Calibration of a dartboard as seen by the camera.
//   - `center`, `radius`: pixel position of the bull and distance to the outer double edge
//     along the unsquashed axis.
//   - `squash`: vertical compression caused by a camera looking at the board at an angle.
//   - `tilt_deg`: rotation of the ellipse axes relative to the image axes.
//   - `rotation_deg`: rotation of the board face, i.e. where the 20 points.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct BoardGeometry {
    pub center: Point,
    pub radius: f64,
    #[serde(default = "default_squash")]
    pub squash: f64,
    #[serde(default)]
    pub rotation_deg: f64,
    #[serde(default)]
    pub tilt_deg: f64,
    #[serde(default)]
    pub rings: RingFractions,
}

fn default_squash() -> f64 { 1.0 }

impl BoardGeometry {
    pub fn new(
        center: Point, radius: f64, squash: f64, rotation_deg: f64, tilt_deg: f64,
        rings: RingFractions,
    ) -> Result<Self, DartsError> {
        let geometry = BoardGeometry { center, radius, squash, rotation_deg, tilt_deg, rings };
        geometry.validate()?;
        Ok(geometry)
    }

    // Board of radius 1 centered at the origin, viewed head-on. Pixel and normalized
    // coordinates coincide.
    pub fn unit() -> Self {
        BoardGeometry {
            center: Point::ORIGIN,
            radius: 1.0,
            squash: 1.0,
            rotation_deg: 0.0,
            tilt_deg: 0.0,
            rings: RingFractions::standard(),
        }
    }

    pub fn validate(&self) -> Result<(), DartsError> {
        if !self.center.is_finite() {
            return Err(DartsError::InvalidCalibration("center must be finite".to_owned()));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(DartsError::InvalidCalibration(format!("bad radius {}", self.radius)));
        }
        if !(self.squash.is_finite() && self.squash > 0.0) {
            return Err(DartsError::InvalidCalibration(format!("bad squash {}", self.squash)));
        }
        if !(self.rotation_deg.is_finite() && self.tilt_deg.is_finite()) {
            return Err(DartsError::InvalidCalibration("angles must be finite".to_owned()));
        }
        self.rings.validate()
    }

    // Pixel point -> normalized board point (unsquashed, untilted, unit radius).
    pub fn to_board(&self, pixel: Point) -> Point {
        (pixel - self.center).rotated(-self.tilt_deg).scale_y(1.0 / self.squash) / self.radius
    }

    // Normalized board point -> pixel point. Inverse of `to_board`.
    pub fn to_pixel(&self, board: Point) -> Point {
        (board * self.radius).scale_y(self.squash).rotated(self.tilt_deg) + self.center
    }

    pub fn normalized_distance(&self, pixel: Point) -> f64 { self.to_board(pixel).length() }

    pub fn score_from_point(&self, pixel: Point) -> Target {
        let board = self.to_board(pixel);
        let multiplier = match self.rings.classify(board.length()) {
            Ring::InnerBull => return Target::InnerBull,
            Ring::OuterBull => return Target::OuterBull,
            Ring::OffBoard => return Target::Miss,
            Ring::Single => Multiplier::Single,
            Ring::Treble => Multiplier::Treble,
            Ring::Double => Multiplier::Double,
        };
        let board_angle = board.angle_deg() + 90.0 - self.rotation_deg;
        Target::Segment(multiplier, segment_at_angle(board_angle))
    }

    // Synthesizes a plausible pixel landing point for the target under this calibration.
    // The radius is sampled from the band this calibration classifies as the target's ring,
    // so `score_from_point` maps the result back to `target`. Returns `None` for a miss and
    // for rings that this calibration leaves no room for.
    pub fn sample_point(&self, target: Target, rng: &mut impl Rng) -> Option<Point> {
        let angle = match target {
            Target::Miss => return None,
            Target::InnerBull => return Some(self.center),
            Target::OuterBull => rng.random_range(0.0..360.0),
            Target::Segment(_, segment) => {
                segment_center_angle(segment)?
                    + self.rotation_deg
                    + rng.random_range(-SEGMENT_JITTER_DEG..=SEGMENT_JITTER_DEG)
            }
        };
        let bands = self.rings.bands(target.ring());
        if bands.is_empty() {
            return None;
        }
        let (lo, hi) = bands[rng.random_range(0..bands.len())];
        // Stay clear of the band edges so that rounding never flips the ring.
        let margin = (hi - lo) / 6.0;
        let radius = rng.random_range((lo + margin)..=(hi - margin));
        Some(self.to_pixel(Point::from_polar(radius, angle)))
    }
}


// Synthesizes a plausible landing point for a dart given only its notation, e.g. for darts
// entered by hand. Coordinates are normalized: unit radius, origin at the bull, standard
// ring layout. Returns `None` for misses and for notation that does not name a board spot.
pub fn point_from_score(token: &str, rng: &mut impl Rng) -> Option<Point> {
    match Target::from_token(token)? {
        Target::Miss => None,
        Target::InnerBull => Some(Point::ORIGIN),
        Target::OuterBull => {
            let angle = rng.random_range(0.0..360.0);
            Some(Point::from_polar(rng.random_range(0.04..=0.09), angle))
        }
        Target::Segment(multiplier, segment) => {
            let angle = segment_center_angle(segment)?
                + rng.random_range(-SEGMENT_JITTER_DEG..=SEGMENT_JITTER_DEG);
            let radius = match multiplier {
                Multiplier::Treble => rng.random_range(0.59..=0.63),
                Multiplier::Double => rng.random_range(0.96..=0.99),
                // Either of the two single areas, on each side of the treble ring.
                Multiplier::Single => {
                    if rng.random_bool(0.5) {
                        rng.random_range(0.15..=0.55)
                    } else {
                        rng.random_range(0.66..=0.93)
                    }
                }
            };
            Some(Point::from_polar(radius, angle))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn score(x: f64, y: f64) -> String {
        BoardGeometry::unit().score_from_point(Point::new(x, y)).to_string()
    }

    #[test]
    fn rings_on_unit_board() {
        assert_eq!(score(0.0, 0.0), "50");
        assert_eq!(score(0.0, -0.03), "50");
        assert_eq!(score(0.0, -0.05), "25");
        assert_eq!(score(0.0, -0.3), "20");
        assert_eq!(score(0.0, -0.61), "T20");
        assert_eq!(score(0.0, -0.8), "20");
        assert_eq!(score(0.0, -0.97), "D20");
        assert_eq!(score(0.0, -1.01), "MISS");
    }

    #[test]
    fn segments_clockwise_from_top() {
        // Right is the 6, bottom is the 3, left is the 11.
        assert_eq!(score(0.3, 0.0), "6");
        assert_eq!(score(0.0, 0.3), "3");
        assert_eq!(score(-0.3, 0.0), "11");
        // One sector clockwise from the 20 is the 1.
        let p = Point::from_polar(0.3, -90.0 + 18.0);
        assert_eq!(BoardGeometry::unit().score_from_point(p).to_string(), "1");
        let p = Point::from_polar(0.3, -90.0 - 18.0);
        assert_eq!(BoardGeometry::unit().score_from_point(p).to_string(), "5");
    }

    #[test]
    fn sector_edges() {
        let board = BoardGeometry::unit();
        assert_eq!(board.score_from_point(Point::from_polar(0.3, -90.0 + 8.9)).to_string(), "20");
        assert_eq!(board.score_from_point(Point::from_polar(0.3, -90.0 + 9.1)).to_string(), "1");
        assert_eq!(board.score_from_point(Point::from_polar(0.3, -90.0 - 8.9)).to_string(), "20");
        assert_eq!(board.score_from_point(Point::from_polar(0.3, -90.0 - 9.1)).to_string(), "5");
    }

    #[test]
    fn board_rotation_moves_the_twenty() {
        let mut board = BoardGeometry::unit();
        board.rotation_deg = 18.0;
        // The 20 now sits where the 1 used to be.
        assert_eq!(board.score_from_point(Point::from_polar(0.3, -72.0)).to_string(), "20");
        assert_eq!(board.score_from_point(Point::from_polar(0.3, -90.0)).to_string(), "5");
    }

    #[test]
    fn squash_is_undone() {
        let mut board = BoardGeometry::unit();
        board.squash = 0.5;
        // 0.3 px up on a half-height ellipse is 0.6 board radii: treble.
        assert_eq!(board.score_from_point(Point::new(0.0, -0.3)).to_string(), "T20");
        // Horizontal distances are unaffected.
        assert_eq!(board.score_from_point(Point::new(0.3, 0.0)).to_string(), "6");
    }

    #[test]
    fn pixel_mapping_round_trip() {
        let board = BoardGeometry::new(
            Point::new(320.0, 240.0), 180.0, 0.7, 12.0, -25.0, RingFractions::standard(),
        )
        .unwrap();
        let p = Point::new(0.31, -0.44);
        let back = board.to_board(board.to_pixel(p));
        assert!((back - p).length() < 1e-12);
    }

    #[test]
    fn target_tokens() {
        assert_eq!(Target::from_token("t20"), Some(Target::Segment(Multiplier::Treble, 20)));
        assert_eq!(Target::from_token("S7"), Some(Target::Segment(Multiplier::Single, 7)));
        assert_eq!(Target::from_token("miss"), Some(Target::Miss));
        assert_eq!(Target::from_token("T0"), None);
        assert_eq!(Target::from_token("21"), None);
        assert_eq!(Target::from_token("D"), None);
        assert_eq!(Target::from_token("X5"), None);
        assert_eq!(Target::Segment(Multiplier::Double, 16).to_string(), "D16");
        assert_eq!(Target::Segment(Multiplier::Single, 16).to_string(), "16");
    }

    #[test]
    fn ring_validation() {
        assert!(RingFractions::standard().validate().is_ok());
        let mut rings = RingFractions::standard();
        rings.outer_bull = rings.inner_bull;
        assert!(matches!(rings.validate(), Err(DartsError::InvalidCalibration(_))));
        let mut rings = RingFractions::standard();
        rings.inner_double = rings.outer_double;
        assert!(rings.validate().is_ok());
        rings.inner_bull = 0.0;
        assert!(rings.validate().is_err());
    }

    #[test]
    fn degenerate_geometry_is_rejected() {
        let rings = RingFractions::standard();
        assert!(BoardGeometry::new(Point::ORIGIN, 0.0, 1.0, 0.0, 0.0, rings).is_err());
        assert!(BoardGeometry::new(Point::ORIGIN, 1.0, 0.0, 0.0, 0.0, rings).is_err());
        assert!(BoardGeometry::new(Point::ORIGIN, 1.0, 1.0, f64::NAN, 0.0, rings).is_err());
    }
}
