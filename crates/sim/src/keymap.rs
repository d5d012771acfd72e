use glam::Vec3;

use crate::action::Action;

/// Map a single-character key identifier to its action.
///
/// Matching is case-insensitive. `w`/`s` move along −z/+z, `a`/`d` along
/// +x/−x, each by `step` units. Anything else is a no-op.
pub fn action_for_key(key: char, step: f32) -> Action {
    match key {
        'w' | 'W' => Action::Nudge(Vec3::new(0.0, 0.0, -step)),
        's' | 'S' => Action::Nudge(Vec3::new(0.0, 0.0, step)),
        'a' | 'A' => Action::Nudge(Vec3::new(step, 0.0, 0.0)),
        'd' | 'D' => Action::Nudge(Vec3::new(-step, 0.0, 0.0)),
        _ => Action::Noop,
    }
}
