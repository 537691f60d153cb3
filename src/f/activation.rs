pub fn relu(x: f64) -> f64 {
    if x < 0. {
        return 0.;
    }
    x
}

/// Backward rule for `relu`, keyed on the post-activation value. A unit that
/// sits exactly at zero passes no gradient.
pub fn relu_gate(activation: f64, grad: f64) -> f64 {
    if activation > 0. {
        return grad;
    }
    0.
}
