/// The logistic function.
pub fn sigmoid(z: f64) -> f64 {
    1. / (1. + (-z).exp())
}

/// The derivative of the logistic function written in terms of its output `a = sigmoid(z)`.
pub fn sigmoid_prime(a: f64) -> f64 {
    a * (1. - a)
}

/// The inverse of `sigmoid`, only defined in the open interval (0, 1).
///
/// # Returns
/// `NaN` (or an infinity at the bounds) whenever `a` is outside (0, 1).
pub fn inverse_sigmoid(a: f64) -> f64 {
    (-a / (a - 1.)).ln()
}
