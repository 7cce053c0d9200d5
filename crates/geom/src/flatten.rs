use crate::scalar::{Float, Scalar};
use crate::segment::Segment;
use crate::Point;

/// Fraction of the parameter range covered by an unshrunk step.
const PARAMETER_STEP: f32 = 1.0 / 32.0;
/// Factor applied to a step when the polyline turns too sharply.
const SHRINK_FACTOR: f32 = 0.67;
/// Samples are accepted when the cosine of the turn across them is above this value.
const FLATNESS_COSINE: f32 = 0.6;
/// Below this step the current sample is accepted as is.
const MIN_PARAMETER_STEP: f32 = 1.0 / 4096.0;

/// An adaptive flattening iterator for curve segments.
///
/// Walks the curve forward in parameter steps of `1/32`. Before yielding a sample, the
/// curve is evaluated half way between the previous and the candidate samples and the
/// step is shrunk until the two halves are nearly aligned. The end point of the curve
/// is always the last point yielded.
pub struct Flattened<T: Segment> {
    curve: T,
    prev_t: T::Scalar,
    prev: Point<T::Scalar>,
    emitted_to: bool,
    done: bool,
}

impl<T: Segment> Flattened<T> {
    #[inline]
    pub(crate) fn new(curve: &T) -> Self {
        Flattened {
            curve: *curve,
            prev_t: T::Scalar::ZERO,
            prev: curve.from(),
            emitted_to: false,
            done: false,
        }
    }

    fn next_parameter(&self) -> T::Scalar {
        let shrink = T::Scalar::value(SHRINK_FACTOR);
        let flat = T::Scalar::value(FLATNESS_COSINE);
        let min_step = T::Scalar::value(MIN_PARAMETER_STEP);

        let mut t = self.prev_t + T::Scalar::value(PARAMETER_STEP);
        loop {
            let delta = t - self.prev_t;
            if delta < min_step {
                return t;
            }

            let mid = self.curve.sample((self.prev_t + t) * T::Scalar::HALF);
            let v1 = self.curve.sample(t) - mid;
            let v2 = mid - self.prev;
            let d = (v1.square_length() * v2.square_length()).sqrt();
            if d <= T::Scalar::ZERO {
                return t;
            }

            // NaN passes.
            let cosine = v1.dot(v2) / d;
            if !(cosine <= flat) {
                return t;
            }

            t = self.prev_t + delta * shrink;
        }
    }
}

impl<T: Segment> Iterator for Flattened<T> {
    type Item = Point<T::Scalar>;

    fn next(&mut self) -> Option<Point<T::Scalar>> {
        if self.done {
            return None;
        }

        let t = self.next_parameter();
        if t >= T::Scalar::ONE {
            self.done = true;
            if self.emitted_to && self.prev == self.curve.to() {
                return None;
            }
            return Some(self.curve.to());
        }

        let p = self.curve.sample(t);
        self.prev_t = t;
        self.prev = p;
        self.emitted_to = p == self.curve.to();

        Some(p)
    }
}
