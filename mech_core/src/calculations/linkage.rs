//! # Four-Bar Linkage Analysis
//!
//! Feasibility, Grashof classification and transmission angle bounds for a
//! planar four-bar linkage with explicit link roles.
//!
//! ## Assumptions
//!
//! - Links are identified by role (ground, crank, coupler, rocker), never by
//!   length ordering
//! - The crank is the input link pivoted on the ground
//! - Transmission angle bounds are taken at the two extreme crank positions
//!   (crank along the ground line, θ = 0°, and opposed to it, θ = 180°)
//! - A linkage whose loop cannot close at both extremes is rejected, since
//!   the crank cannot sweep its full range
//!
//! ## Example
//!
//! ```rust
//! use mech_core::calculations::linkage::{analyze, FourBarLinkage, GrashofClass};
//!
//! let linkage = FourBarLinkage::new(4.0, 1.0, 4.0, 3.0);
//! let result = analyze(&linkage).unwrap();
//!
//! assert!(result.is_crank_rocker);
//! assert_eq!(result.grashof_class, GrashofClass::CrankRocker);
//! assert!(!result.poor_transmission);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::equations::linkage::{diagonal_length, grashof_condition, transmission_angle_cos};
use crate::equations::registry::{Equation, EquationTracker};
use crate::errors::{MechError, MechResult};
use crate::settings::DesignSettings;
use crate::units::{DEG_TO_RAD, RAD_TO_DEG};
use crate::validation::POSITIVE;

/// Relative slack allowed when checking loop closure at an arbitrary crank
/// angle, where the diagonal comes from trigonometry rather than exact sums.
const CLOSURE_TOLERANCE: f64 = 1e-12;

/// Planar four-bar linkage with explicit link roles.
///
/// ## JSON Example
///
/// ```json
/// { "ground": 7.0, "crank": 2.0, "coupler": 9.0, "rocker": 6.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FourBarLinkage {
    /// Fixed link between the crank and rocker pivots
    pub ground: f64,
    /// Input link
    pub crank: f64,
    /// Floating link joining crank and rocker
    pub coupler: f64,
    /// Output link
    pub rocker: f64,
}

impl FourBarLinkage {
    pub fn new(ground: f64, crank: f64, coupler: f64, rocker: f64) -> Self {
        Self { ground, crank, coupler, rocker }
    }

    /// Build from lengths in role order `[ground, crank, coupler, rocker]`
    pub fn from_lengths(lengths: [f64; 4]) -> Self {
        let [ground, crank, coupler, rocker] = lengths;
        Self { ground, crank, coupler, rocker }
    }

    /// Lengths in role order `[ground, crank, coupler, rocker]`
    pub fn lengths(&self) -> [f64; 4] {
        [self.ground, self.crank, self.coupler, self.rocker]
    }

    /// Check every length is positive and finite.
    pub fn validate(&self) -> MechResult<()> {
        POSITIVE.check("ground", self.ground).map_err(MechError::geometry)?;
        POSITIVE.check("crank", self.crank).map_err(MechError::geometry)?;
        POSITIVE.check("coupler", self.coupler).map_err(MechError::geometry)?;
        POSITIVE.check("rocker", self.rocker).map_err(MechError::geometry)?;
        Ok(())
    }

    /// Quadrilateral closure: every link must be strictly shorter than the
    /// sum of the other three.
    fn check_quadrilateral(&self) -> MechResult<()> {
        let lengths = self.lengths();
        let total: f64 = lengths.iter().sum();
        for (role, length) in ["ground", "crank", "coupler", "rocker"].iter().zip(lengths) {
            let others = total - length;
            if length >= others {
                return Err(MechError::unclosable_linkage(
                    lengths,
                    format!(
                        "{} ({}) is not shorter than the sum of the other three links ({})",
                        role, length, others
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Lengths sorted ascending: (s, p, q, l)
    fn sorted(&self) -> [f64; 4] {
        let mut lengths = self.lengths();
        lengths.sort_by(|a, b| a.total_cmp(b));
        lengths
    }
}

/// Grashof classification by which link is shortest and how s + l compares
/// with p + q.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrashofClass {
    /// Shortest link is the crank or rocker; it rotates fully
    CrankRocker,
    /// Shortest link is the ground; both side links rotate fully
    DoubleCrank,
    /// Shortest link is the coupler; it rotates, side links only rock
    DoubleRocker,
    /// s + l = p + q; the linkage can pass through a flat position
    ChangePoint,
    /// Non-Grashof; no link rotates fully
    TripleRocker,
}

impl GrashofClass {
    pub fn display_name(&self) -> &'static str {
        match self {
            GrashofClass::CrankRocker => "Crank-rocker",
            GrashofClass::DoubleCrank => "Double-crank (drag link)",
            GrashofClass::DoubleRocker => "Grashof double-rocker",
            GrashofClass::ChangePoint => "Change point",
            GrashofClass::TripleRocker => "Triple-rocker (non-Grashof)",
        }
    }

    /// Whether s + l ≤ p + q
    pub fn is_grashof(&self) -> bool {
        !matches!(self, GrashofClass::TripleRocker)
    }
}

/// Result of a linkage analysis.
///
/// ## JSON Example
///
/// ```json
/// {
///   "is_crank_rocker": true,
///   "is_grashof": true,
///   "grashof_class": "crank_rocker",
///   "transmission_angle_range_deg": [48.19, 90.0],
///   "poor_transmission": false,
///   "equations": [ ... ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkageResult {
    /// Grashof and the shortest link is adjacent to the ground (crank or
    /// rocker).
    ///
    /// `analyze` only accepts linkages whose crank sweeps a full turn. A
    /// linkage whose rocker is strictly shorter than its crank passes that
    /// check only at the change point (s + l = p + q, a kite with ground =
    /// rocker and crank = coupler). A shortest rocker therefore sets this
    /// flag only for change-point linkages.
    pub is_crank_rocker: bool,

    /// s + l ≤ p + q
    pub is_grashof: bool,

    pub grashof_class: GrashofClass,

    /// (min μ, max μ) over the crank's range of motion, degrees
    pub transmission_angle_range_deg: (f64, f64),

    /// Advisory: the range leaves the configured comfortable band
    pub poor_transmission: bool,

    /// Equations applied
    pub equations: EquationTracker,
}

impl LinkageResult {
    pub fn min_transmission_angle_deg(&self) -> f64 {
        self.transmission_angle_range_deg.0
    }

    pub fn max_transmission_angle_deg(&self) -> f64 {
        self.transmission_angle_range_deg.1
    }
}

/// Classify a linkage by the Grashof criterion.
///
/// Only quadrilateral closure is required here; a linkage that cannot close
/// at every crank angle still has a class.
pub fn grashof_class(linkage: &FourBarLinkage) -> MechResult<GrashofClass> {
    linkage.validate()?;
    linkage.check_quadrilateral()?;
    Ok(classify(linkage))
}

fn classify(linkage: &FourBarLinkage) -> GrashofClass {
    let [s, p, q, l] = linkage.sorted();
    if !grashof_condition(s, l, p, q) {
        return GrashofClass::TripleRocker;
    }
    if s + l == p + q {
        return GrashofClass::ChangePoint;
    }
    // Strict Grashof implies a unique shortest link
    if linkage.ground == s {
        GrashofClass::DoubleCrank
    } else if linkage.coupler == s {
        GrashofClass::DoubleRocker
    } else {
        GrashofClass::CrankRocker
    }
}

/// Analyze with default design settings.
pub fn analyze(linkage: &FourBarLinkage) -> MechResult<LinkageResult> {
    analyze_with(linkage, &DesignSettings::default())
}

/// Analyze feasibility, Grashof class and transmission angle bounds.
///
/// # Errors
///
/// * `InvalidGeometry` - a length is non-positive or not finite
/// * `UnclosableLinkage` - a link is at least as long as the other three
///   combined, or the loop cannot close with the crank along or opposed to
///   the ground
pub fn analyze_with(linkage: &FourBarLinkage, settings: &DesignSettings) -> MechResult<LinkageResult> {
    linkage.validate()?;
    linkage.check_quadrilateral()?;

    let FourBarLinkage { ground: g, crank: a, coupler: b, rocker: c } = *linkage;
    let lengths = linkage.lengths();

    // Diagonal O4-B at θ = 0° and θ = 180°
    let d_aligned = (g - a).abs();
    let d_opposed = g + a;

    if d_opposed > b + c {
        return Err(MechError::unclosable_linkage(
            lengths,
            format!(
                "coupler and rocker ({} + {}) cannot span ground + crank ({}) at crank angle 180°",
                b, c, d_opposed
            ),
        ));
    }
    if d_aligned < (b - c).abs() {
        return Err(MechError::unclosable_linkage(
            lengths,
            format!(
                "|ground - crank| ({}) is shorter than |coupler - rocker| ({}) at crank angle 0°",
                d_aligned,
                (b - c).abs()
            ),
        ));
    }

    let mut tracker = EquationTracker::new();
    tracker.record(Equation::GrashofCondition, "Grashof classification");
    tracker.record(Equation::DiagonalLength, "Extreme crank positions");
    tracker.record(Equation::TransmissionAngle, "Extreme crank positions");

    let mu_aligned = transmission_angle_cos(b, c, d_aligned).clamp(-1.0, 1.0).acos() * RAD_TO_DEG;
    let mu_opposed = transmission_angle_cos(b, c, d_opposed).clamp(-1.0, 1.0).acos() * RAD_TO_DEG;
    let min_deg = mu_aligned.min(mu_opposed);
    let max_deg = mu_aligned.max(mu_opposed);

    let grashof_class = classify(linkage);
    let [s, p, q, l] = linkage.sorted();
    let is_grashof = grashof_condition(s, l, p, q);
    let is_crank_rocker = is_grashof && (linkage.crank == s || linkage.rocker == s);

    let poor_transmission = settings.is_poor_transmission(min_deg, max_deg);
    if poor_transmission {
        warn!(
            min_deg,
            max_deg,
            limit_min = settings.transmission_angle_min_deg,
            limit_max = settings.transmission_angle_max_deg,
            "transmission angle range outside recommended band"
        );
    }

    debug!(
        ?lengths,
        class = grashof_class.display_name(),
        min_deg,
        max_deg,
        "linkage analyzed"
    );

    Ok(LinkageResult {
        is_crank_rocker,
        is_grashof,
        grashof_class,
        transmission_angle_range_deg: (min_deg, max_deg),
        poor_transmission,
        equations: tracker,
    })
}

/// Transmission angle μ (degrees) at a given crank angle.
///
/// # Errors
///
/// * `InvalidGeometry` - a length is non-positive or not finite, or the
///   angle is not finite
/// * `UnclosableLinkage` - the loop cannot close at this crank angle
pub fn transmission_angle_at(linkage: &FourBarLinkage, crank_angle_deg: f64) -> MechResult<f64> {
    linkage.validate()?;
    linkage.check_quadrilateral()?;
    if !crank_angle_deg.is_finite() {
        return Err(MechError::invalid_geometry(
            "crank_angle_deg",
            crank_angle_deg,
            "Crank angle must be a finite number",
        ));
    }

    let FourBarLinkage { ground: g, crank: a, coupler: b, rocker: c } = *linkage;
    let d = diagonal_length(g, a, crank_angle_deg * DEG_TO_RAD);
    let slack = CLOSURE_TOLERANCE * (b + c);

    if d > b + c + slack || d < (b - c).abs() - slack {
        return Err(MechError::unclosable_linkage(
            linkage.lengths(),
            format!("loop cannot close at crank angle {}°", crank_angle_deg),
        ));
    }

    Ok(transmission_angle_cos(b, c, d).clamp(-1.0, 1.0).acos() * RAD_TO_DEG)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn crank_rocker() -> FourBarLinkage {
        FourBarLinkage::new(7.0, 2.0, 9.0, 6.0)
    }

    #[test]
    fn test_crank_rocker_angles() {
        let result = analyze(&crank_rocker()).unwrap();
        assert!(result.is_crank_rocker);
        assert!(result.is_grashof);
        assert_eq!(result.grashof_class, GrashofClass::CrankRocker);

        // θ = 0: d = 5, cos μ = 92/108; θ = 180°: d = 9, cos μ = 1/3
        let expected_min = (92.0_f64 / 108.0).acos().to_degrees();
        let expected_max = (1.0_f64 / 3.0).acos().to_degrees();
        assert!((result.min_transmission_angle_deg() - expected_min).abs() < TOL);
        assert!((result.max_transmission_angle_deg() - expected_max).abs() < TOL);

        // min ≈ 31.6° < 40°
        assert!(result.poor_transmission);
        assert!(result.equations.contains(Equation::TransmissionAngle));
    }

    #[test]
    fn test_good_transmission() {
        let result = analyze(&FourBarLinkage::new(4.0, 1.0, 4.0, 3.0)).unwrap();
        let (min, max) = result.transmission_angle_range_deg;
        assert!((min - (2.0_f64 / 3.0).acos().to_degrees()).abs() < TOL);
        assert!((max - 90.0).abs() < TOL);
        assert!(!result.poor_transmission);
    }

    #[test]
    fn test_poor_transmission_uses_settings() {
        let linkage = FourBarLinkage::new(4.0, 1.0, 4.0, 3.0);
        let strict = DesignSettings {
            transmission_angle_min_deg: 50.0,
            ..DesignSettings::default()
        };
        assert!(analyze_with(&linkage, &strict).unwrap().poor_transmission);
    }

    #[test]
    fn test_grounding_changes_crank_rocker() {
        // Same four lengths {2, 6, 7, 9}
        let shortest_as_crank = FourBarLinkage::new(7.0, 2.0, 9.0, 6.0);
        let shortest_as_ground = FourBarLinkage::new(2.0, 7.0, 6.0, 9.0);

        let crank = analyze(&shortest_as_crank).unwrap();
        let ground = analyze(&shortest_as_ground).unwrap();

        assert!(crank.is_crank_rocker);
        assert!(!ground.is_crank_rocker);
        assert_eq!(ground.grashof_class, GrashofClass::DoubleCrank);
        assert!(crank.is_grashof && ground.is_grashof);
    }

    #[test]
    fn test_shortest_rocker_only_at_change_point() {
        // Kite: ground = rocker = 2, crank = coupler = 5; dead centre at both extremes
        let kite = analyze(&FourBarLinkage::new(2.0, 5.0, 5.0, 2.0)).unwrap();
        assert!(kite.is_crank_rocker);
        assert_eq!(kite.grashof_class, GrashofClass::ChangePoint);
        assert!(kite.min_transmission_angle_deg().abs() < 1e-9);
        assert!((kite.max_transmission_angle_deg() - 180.0).abs() < 1e-9);

        // Shortest link as rocker away from the change point: the crank cannot turn fully
        let err = analyze(&FourBarLinkage::new(7.0, 6.0, 9.0, 2.0)).unwrap_err();
        assert_eq!(err.error_code(), "UNCLOSABLE_LINKAGE");
    }

    #[test]
    fn test_grashof_independent_of_role_permutation() {
        let lengths = [2.0, 6.0, 7.0, 9.0];
        let mut seen = Vec::new();
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    for m in 0..4 {
                        let mut idx = [i, j, k, m];
                        idx.sort_unstable();
                        if idx != [0, 1, 2, 3] {
                            continue;
                        }
                        let linkage = FourBarLinkage::new(lengths[i], lengths[j], lengths[k], lengths[m]);
                        let class = grashof_class(&linkage).unwrap();
                        assert!(class.is_grashof());
                        seen.push(class);
                    }
                }
            }
        }
        assert_eq!(seen.len(), 24);
        assert!(seen.contains(&GrashofClass::CrankRocker));
        assert!(seen.contains(&GrashofClass::DoubleCrank));
        assert!(seen.contains(&GrashofClass::DoubleRocker));
    }

    #[test]
    fn test_grashof_classes() {
        assert_eq!(
            grashof_class(&FourBarLinkage::new(7.0, 9.0, 2.0, 6.0)).unwrap(),
            GrashofClass::DoubleRocker
        );
        // 2 + 9 = 6 + 5
        assert_eq!(
            grashof_class(&FourBarLinkage::new(6.0, 2.0, 9.0, 5.0)).unwrap(),
            GrashofClass::ChangePoint
        );
        // 2 + 9 > 5 + 5
        assert_eq!(
            grashof_class(&FourBarLinkage::new(5.0, 2.0, 9.0, 5.0)).unwrap(),
            GrashofClass::TripleRocker
        );
    }

    #[test]
    fn test_double_rocker_cannot_be_analyzed() {
        let err = analyze(&FourBarLinkage::new(7.0, 9.0, 2.0, 6.0)).unwrap_err();
        assert_eq!(err.error_code(), "UNCLOSABLE_LINKAGE");
    }

    #[test]
    fn test_ten_twenty_five_ten_ten_unclosable() {
        let linkage = FourBarLinkage::from_lengths([10.0, 25.0, 10.0, 10.0]);
        let err = analyze(&linkage).unwrap_err();
        assert_eq!(err.error_code(), "UNCLOSABLE_LINKAGE");
        // It still passes the quadrilateral check on its own
        assert_eq!(grashof_class(&linkage).unwrap(), GrashofClass::TripleRocker);
    }

    #[test]
    fn test_quadrilateral_closure_boundaries() {
        // Longest equal to the sum of the other three: degenerate
        for lengths in [
            [3.0, 1.0, 1.0, 1.0],
            [1.0, 3.0, 1.0, 1.0],
            [1.0, 1.0, 3.0, 1.0],
            [1.0, 1.0, 1.0, 3.0],
        ] {
            let linkage = FourBarLinkage::from_lengths(lengths);
            assert_eq!(grashof_class(&linkage).unwrap_err().error_code(), "UNCLOSABLE_LINKAGE");
            assert_eq!(analyze(&linkage).unwrap_err().error_code(), "UNCLOSABLE_LINKAGE");
        }
        // Longest exceeding the sum
        let over = FourBarLinkage::from_lengths([1.0, 1.0, 1.0, 3.5]);
        assert_eq!(grashof_class(&over).unwrap_err().error_code(), "UNCLOSABLE_LINKAGE");
        // Just under the sum
        let under = FourBarLinkage::from_lengths([1.0, 1.0, 1.0, 2.5]);
        assert!(grashof_class(&under).is_ok());
    }

    #[test]
    fn test_opposed_position_boundary() {
        // g + a = b + c: closes with coupler and rocker collinear (μ = 180°)
        let flat = analyze(&FourBarLinkage::new(4.0, 2.0, 3.0, 3.0)).unwrap();
        assert!((flat.max_transmission_angle_deg() - 180.0).abs() < TOL);
        assert!(flat.poor_transmission);

        // g + a > b + c
        let err = analyze(&FourBarLinkage::new(4.0, 2.5, 3.0, 3.0)).unwrap_err();
        assert_eq!(err.error_code(), "UNCLOSABLE_LINKAGE");
        assert!(err.to_string().contains("180"));
    }

    #[test]
    fn test_aligned_position_boundary() {
        // |g - a| = |b - c|: closes with coupler folded onto rocker (μ = 0°)
        let folded = analyze(&FourBarLinkage::new(5.0, 2.0, 6.0, 3.0)).unwrap();
        assert!(folded.min_transmission_angle_deg().abs() < TOL);
        assert_eq!(folded.grashof_class, GrashofClass::ChangePoint);

        // |g - a| < |b - c|
        let err = analyze(&FourBarLinkage::new(5.0, 2.0, 6.5, 3.0)).unwrap_err();
        assert_eq!(err.error_code(), "UNCLOSABLE_LINKAGE");
    }

    #[test]
    fn test_invalid_lengths() {
        for lengths in [
            [0.0, 2.0, 9.0, 6.0],
            [7.0, -2.0, 9.0, 6.0],
            [7.0, 2.0, f64::NAN, 6.0],
            [7.0, 2.0, 9.0, f64::INFINITY],
        ] {
            let err = analyze(&FourBarLinkage::from_lengths(lengths)).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_GEOMETRY");
        }
    }

    #[test]
    fn test_transmission_angle_at_extremes_matches_range() {
        let linkage = crank_rocker();
        let result = analyze(&linkage).unwrap();
        let at_0 = transmission_angle_at(&linkage, 0.0).unwrap();
        let at_180 = transmission_angle_at(&linkage, 180.0).unwrap();
        assert!((at_0 - result.min_transmission_angle_deg()).abs() < 1e-6);
        assert!((at_180 - result.max_transmission_angle_deg()).abs() < 1e-6);

        let at_90 = transmission_angle_at(&linkage, 90.0).unwrap();
        assert!(at_90 > at_0 && at_90 < at_180);
    }

    #[test]
    fn test_transmission_angle_at_unreachable_position() {
        // Coupler-shortest double rocker cannot reach θ = 180°
        let linkage = FourBarLinkage::new(7.0, 9.0, 2.0, 6.0);
        let err = transmission_angle_at(&linkage, 180.0).unwrap_err();
        assert_eq!(err.error_code(), "UNCLOSABLE_LINKAGE");
        assert!(transmission_angle_at(&linkage, f64::NAN).is_err());
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let linkage = FourBarLinkage::new(7.3, 2.1, 8.7, 5.9);
        let first = analyze(&linkage).unwrap();
        let second = analyze(&linkage).unwrap();
        assert_eq!(
            first.transmission_angle_range_deg.0.to_bits(),
            second.transmission_angle_range_deg.0.to_bits()
        );
        assert_eq!(
            first.transmission_angle_range_deg.1.to_bits(),
            second.transmission_angle_range_deg.1.to_bits()
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_serialization() {
        let result = analyze(&crank_rocker()).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"grashof_class\":\"crank_rocker\""));
        let roundtrip: LinkageResult = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.grashof_class, result.grashof_class);
        assert_eq!(roundtrip.equations, result.equations);
    }
}
