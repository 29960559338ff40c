//! Value-axis domain for chart overlays.

/// Padded `(min, max)` over the finite values, or `None` if there are none.
///
/// The padding is `padding_ratio` of the span on each side. A flat series has no
/// span, so it is padded by `padding_ratio * |value|`, or by 1.0 around zero.
pub fn axis_domain<I>(values: I, padding_ratio: f64) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (lo, hi) = values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

    let ratio = padding_ratio.max(0.0);
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * ratio
    } else if lo != 0.0 {
        lo.abs() * ratio
    } else {
        1.0
    };
    Some((lo - pad, hi + pad))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_by_span() {
        let d = axis_domain([Some(10.0), None, Some(20.0), Some(15.0)], 0.1).unwrap();
        assert!((d.0 - 9.0).abs() < 1e-12);
        assert!((d.1 - 21.0).abs() < 1e-12);
    }

    #[test]
    fn ignores_nulls_and_non_finite() {
        let d = axis_domain([None, Some(f64::NAN), Some(5.0), Some(f64::INFINITY)], 0.0);
        assert_eq!(d, Some((5.0, 5.0)));
    }

    #[test]
    fn empty_has_no_domain() {
        assert_eq!(axis_domain(Vec::<Option<f64>>::new(), 0.1), None);
        assert_eq!(axis_domain([None, None], 0.1), None);
    }

    #[test]
    fn flat_zero_series_gets_unit_padding() {
        assert_eq!(axis_domain([Some(0.0), Some(0.0)], 0.05), Some((-1.0, 1.0)));
    }

    #[test]
    fn flat_series_pads_by_magnitude() {
        let d = axis_domain([Some(200.0)], 0.1).unwrap();
        assert!((d.0 - 180.0).abs() < 1e-12);
        assert!((d.1 - 220.0).abs() < 1e-12);
    }
}
