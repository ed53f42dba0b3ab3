use std::cmp::Ordering;

const LOG_EPSILON: f32 = 1e-9;

/// Re-scales a probability vector by `temperature` and renormalizes it.
///
/// The input is treated as probabilities, so it is taken back to log space
/// (`ln(p + 1e-9)`) before dividing by the temperature and applying a
/// max-shifted softmax. A degenerate exponential sum yields the uniform
/// distribution. Non-positive or non-finite temperatures mean no scaling.
pub fn calibrate(probs: &[f32], temperature: f32) -> Vec<f32> {
    if probs.is_empty() {
        return Vec::new();
    }

    let temperature = normalized_temperature(temperature);
    let scaled: Vec<f32> = probs
        .iter()
        .map(|&p| (p + LOG_EPSILON).ln() / temperature)
        .collect();
    let max_logit = scaled.iter().copied().fold(f32::NEG_INFINITY, f32::max);

    let exps: Vec<f32> = scaled.iter().map(|&s| (s - max_logit).exp()).collect();
    let sum: f32 = exps.iter().sum();

    if !sum.is_finite() || sum <= 0.0 {
        let uniform = 1.0 / probs.len() as f32;
        return vec![uniform; probs.len()];
    }

    exps.into_iter().map(|e| e / sum).collect()
}

pub fn normalized_temperature(temperature: f32) -> f32 {
    if temperature.is_finite() && temperature > 0.0 {
        temperature
    } else {
        1.0
    }
}

/// The `k` most probable `(index, probability)` pairs, highest first.
///
/// Equal probabilities keep ascending index order; NaN entries rank last.
pub fn top_k(probs: &[f32], k: usize) -> Vec<(usize, f32)> {
    let mut candidates: Vec<(usize, f32)> = probs.iter().copied().enumerate().collect();
    candidates.sort_by(|a, b| rank(b.1, a.1).then_with(|| a.0.cmp(&b.0)));
    candidates.truncate(k.min(probs.len()));
    candidates
}

fn rank(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}
