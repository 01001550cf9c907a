//! Clasp connector geometry.
//!
//! Each clasp has an eye ring just outside each sphere's surface along the
//! center-to-center direction and a link at the midpoint of the eyes.
//! Debug builds compare the realized eye-to-eye gap with the nominal one and
//! warn once per connector key; nothing is rejected.

use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

use nalgebra::Vector2;

use crate::cfg::{CLASP_EYE_RADIUS, CLASP_GAP_TOLERANCE, DIST_EPS};
use crate::model::ClaspConnector;

/// Clasp between the sphere at `c1` (radius `r1`) and the one at `c2` (radius `r2`).
///
/// `gap` is the nominal surface-to-surface gap; `key` identifies the connector
/// for the one-time diagnostic.
pub fn clasp_between(
    c1: Vector2<f64>,
    r1: f64,
    c2: Vector2<f64>,
    r2: f64,
    gap: f64,
    key: &str,
) -> ClaspConnector {
    let delta = c2 - c1;
    let dir = delta / delta.norm().max(DIST_EPS);
    let eye_top = c1 + dir * (r1 + CLASP_EYE_RADIUS);
    let eye_bottom = c2 - dir * (r2 + CLASP_EYE_RADIUS);
    let link_center = (eye_top + eye_bottom) * 0.5;

    if cfg!(debug_assertions) {
        let realized = (eye_bottom - eye_top).dot(&dir);
        let nominal = gap - 2.0 * CLASP_EYE_RADIUS;
        if (realized - nominal).abs() > CLASP_GAP_TOLERANCE {
            warn_once(key, realized, nominal);
        }
    }

    ClaspConnector {
        eye_top,
        eye_bottom,
        link_center,
        angle: dir.y.atan2(dir.x),
    }
}

fn warn_once(key: &str, realized: f64, nominal: f64) {
    static WARNED: OnceLock<Mutex<HashSet<String>>> = OnceLock::new();
    let Ok(mut seen) = WARNED.get_or_init(Default::default).lock() else {
        return;
    };
    if seen.insert(key.to_string()) {
        tracing::warn!(key, realized, nominal, "clasp eye gap diverges from design gap");
    }
}
