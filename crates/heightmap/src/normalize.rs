//! Rescaling of raw ridge fields to `[0, 1]`.

use bevy::log::debug;

use crate::config::DEGENERATE_FILL;
use crate::fields::HeightField;
use crate::warnings::HeightMapWarning;

/// What `normalize` did to the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalization {
    /// Rescaled from the given raw range.
    Scaled { min: f32, max: f32 },
    /// No usable range; every value was set to `DEGENERATE_FILL`.
    Degenerate,
}

impl Normalization {
    /// The warning to surface for this outcome, if any.
    pub fn warning(self) -> Option<HeightMapWarning> {
        match self {
            Normalization::Scaled { .. } => None,
            Normalization::Degenerate => Some(HeightMapWarning::DegenerateField {
                value: DEGENERATE_FILL,
            }),
        }
    }
}

/// Rescale `field` in place so that its minimum is 0.0 and its maximum 1.0.
///
/// A field whose range is zero or not finite (constant, empty, or containing
/// NaN / infinity) is filled with `DEGENERATE_FILL` instead of dividing by
/// zero.
pub fn normalize(field: &mut HeightField) -> Normalization {
    let range = field
        .min_max()
        .map(|(min, max)| (min, max, max - min))
        .filter(|&(_, _, span)| span.is_finite() && span > 0.0);

    let Some((min, max, span)) = range else {
        field.values.fill(DEGENERATE_FILL);
        debug!(
            "Normalize: {}x{} field has no range, filling with {}",
            field.width, field.height, DEGENERATE_FILL
        );
        return Normalization::Degenerate;
    };

    for v in field.values.iter_mut() {
        *v = (*v - min) / span;
    }
    Normalization::Scaled { min, max }
}

/// By-value form of `normalize`.
pub fn normalized(mut field: HeightField) -> (HeightField, Normalization) {
    let outcome = normalize(&mut field);
    (field, outcome)
}
