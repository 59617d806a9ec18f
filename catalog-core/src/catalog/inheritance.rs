use super::types::{AppearanceAttributes, ResolvedAttributes};

/// Resolve the effective appearance of a colour.
///
/// Each attribute set on the colour wins; otherwise the filament default is
/// used. `translucent` and `glow` fall back to `false` when neither level
/// sets them, so the result never carries an unset flag.
pub fn resolve_color_attributes(
    defaults: &AppearanceAttributes,
    overrides: &AppearanceAttributes,
) -> ResolvedAttributes {
    ResolvedAttributes {
        finish: inherit(overrides.finish, defaults.finish),
        multi_color_direction: inherit(
            overrides.multi_color_direction,
            defaults.multi_color_direction,
        ),
        pattern: inherit(overrides.pattern, defaults.pattern),
        translucent: inherit(overrides.translucent, defaults.translucent).unwrap_or(false),
        glow: inherit(overrides.glow, defaults.glow).unwrap_or(false),
    }
}

/// Child value if present, parent value otherwise.
fn inherit<T: Copy>(own: Option<T>, parent: Option<T>) -> Option<T> {
    own.or(parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::{Finish, MultiColorDirection, Pattern};

    #[test]
    fn test_no_attributes_resolve_to_defaults() {
        let resolved = resolve_color_attributes(
            &AppearanceAttributes::default(),
            &AppearanceAttributes::default(),
        );
        assert_eq!(
            resolved,
            ResolvedAttributes {
                finish: None,
                multi_color_direction: None,
                pattern: None,
                translucent: false,
                glow: false,
            }
        );
    }

    #[test]
    fn test_color_override_wins_over_filament_default() {
        let defaults = AppearanceAttributes {
            glow: Some(true),
            finish: Some(Finish::Matte),
            ..Default::default()
        };
        let overrides = AppearanceAttributes {
            glow: Some(false),
            finish: Some(Finish::Glossy),
            ..Default::default()
        };
        let resolved = resolve_color_attributes(&defaults, &overrides);
        assert!(!resolved.glow);
        assert_eq!(resolved.finish, Some(Finish::Glossy));
    }

    #[test]
    fn test_missing_override_inherits_filament_default() {
        let defaults = AppearanceAttributes {
            glow: Some(true),
            translucent: Some(true),
            pattern: Some(Pattern::Sparkle),
            multi_color_direction: Some(MultiColorDirection::Coaxial),
            ..Default::default()
        };
        let resolved = resolve_color_attributes(&defaults, &AppearanceAttributes::default());
        assert!(resolved.glow);
        assert!(resolved.translucent);
        assert_eq!(resolved.pattern, Some(Pattern::Sparkle));
        assert_eq!(
            resolved.multi_color_direction,
            Some(MultiColorDirection::Coaxial)
        );
    }

    #[test]
    fn test_override_without_default() {
        let overrides = AppearanceAttributes {
            translucent: Some(true),
            multi_color_direction: Some(MultiColorDirection::Longitudinal),
            ..Default::default()
        };
        let resolved = resolve_color_attributes(&AppearanceAttributes::default(), &overrides);
        assert!(resolved.translucent);
        assert!(!resolved.glow);
        assert_eq!(
            resolved.multi_color_direction,
            Some(MultiColorDirection::Longitudinal)
        );
    }
}
