pub(crate) fn relu(z: f64) -> f64 {
    if z > 0.0 {
        z
    } else {
        0.0
    }
}

pub(crate) fn relu_grad(z: f64) -> f64 {
    if z > 0.0 {
        1.0
    } else {
        0.0
    }
}

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(ai, bi)| ai * bi).sum()
}

pub(crate) fn mean_squared_error(pred: &[f64], truth: &[f64]) -> f64 {
    let n = pred.len().max(1) as f64;
    pred.iter()
        .zip(truth.iter())
        .map(|(p, t)| (p - t) * (p - t))
        .sum::<f64>()
        / n
}

pub(crate) fn mean_absolute_error(pred: &[f64], truth: &[f64]) -> f64 {
    let n = pred.len().max(1) as f64;
    pred.iter()
        .zip(truth.iter())
        .map(|(p, t)| (p - t).abs())
        .sum::<f64>()
        / n
}
