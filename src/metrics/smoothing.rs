use crate::assert_interval;

/// Exponentially weighted moving average with smoothing factor `alpha`.
///
/// Each output is the weighted mean of all inputs so far, the input `i` steps back weighted
/// by `(1 - alpha)^i`:
///
/// y<sub>t</sub> = Σ (1-α)<sup>i</sup> x<sub>t-i</sub> / Σ (1-α)<sup>i</sup>
///
/// NaN inputs carry no weight but still age the weights of earlier inputs. Outputs before the
/// first non-NaN input are NaN.
///
/// **Panics** if `alpha` is not in the interval `[0,1]`
pub fn ewma(values: &[f64], alpha: f64) -> Vec<f64> {
    assert_interval!(alpha, 0.0, 1.0);
    let decay = 1.0 - alpha;
    let mut num = 0.0;
    let mut den = 0.0;

    values
        .iter()
        .map(|&x| {
            num *= decay;
            den *= decay;
            if !x.is_nan() {
                num += x;
                den += 1.0;
            }
            if den > 0.0 {
                num / den
            } else {
                f64::NAN
            }
        })
        .collect()
}
