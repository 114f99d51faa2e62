/// Cubic segment `a + b*t + c*t^2 + d*t^3` in local coordinate `t = x - origin`.
#[derive(Debug)]
pub struct Polynomial {
    origin: f64,
    coefficients: [f64; 4],
}

impl Polynomial {

    pub fn new(origin: f64, coefficients: [f64; 4]) -> Self {
        Polynomial { origin, coefficients }
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let t = x - self.origin;
        let [a, b, c, d] = self.coefficients;
        a + t * (b + t * (c + t * d))
    }
}
