pub fn dot(lhs: &[f64], rhs: &[f64]) -> f64 {
    assert_eq!(lhs.len(), rhs.len());
    lhs.iter().zip(rhs.iter()).map(|(a, b)| a * b).sum()
}

pub fn positive_sum(values: &[f64]) -> f64 {
    values.iter().filter(|v| **v > 0.0).sum()
}

pub fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}
