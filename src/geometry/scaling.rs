/// Bounding box in projected coordinates (meters)
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Create bounds from a set of points
    pub fn from_points(points: &[(f64, f64)]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut min_x = f64::MAX;
        let mut max_x = f64::MIN;
        let mut min_y = f64::MAX;
        let mut max_y = f64::MIN;

        for &(x, y) in points {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }

        Some(Self {
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// Rectangle on the page, in points, that a drawing is fitted into
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    /// Where the centre of the drawing lands on the page
    pub center: (f64, f64),
    /// Fraction of the frame the drawing may fill
    pub fill: f64,
}

/// Uniformly scales projected coordinates (meters) onto a page (points)
#[derive(Debug, Clone)]
pub struct Scaler {
    /// Scale factor: page points per meter
    scale: f64,
    source_center: (f64, f64),
    page_center: (f64, f64),
}

impl Scaler {
    /// Fit `bounds` into `frame`, keeping the aspect ratio.
    ///
    /// A zero-width or zero-height extent falls back to 1 pt per meter on that
    /// axis before the smaller of the two ratios is taken.
    pub fn fit(bounds: &Bounds, frame: &Frame) -> Self {
        let scale_x = if bounds.width() > 0.0 {
            frame.width / bounds.width()
        } else {
            1.0
        };
        let scale_y = if bounds.height() > 0.0 {
            frame.height / bounds.height()
        } else {
            1.0
        };

        Self {
            scale: frame.fill * scale_x.min(scale_y),
            source_center: bounds.center(),
            page_center: frame.center,
        }
    }

    /// Scale a point from meters to page points (y up)
    pub fn scale(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.source_center.0) * self.scale + self.page_center.0,
            (y - self.source_center.1) * self.scale + self.page_center.1,
        )
    }

    /// Scale a slice of points
    pub fn scale_points(&self, points: &[(f64, f64)]) -> Vec<(f64, f64)> {
        points.iter().map(|&(x, y)| self.scale(x, y)).collect()
    }

    /// Get the scale factor (points per meter)
    pub fn scale_factor(&self) -> f64 {
        self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_points() {
        let points = vec![(0.0, 0.0), (1000.0, 2000.0), (500.0, 1000.0)];
        let bounds = Bounds::from_points(&points).unwrap();

        assert_eq!(bounds.min_x, 0.0);
        assert_eq!(bounds.max_x, 1000.0);
        assert_eq!(bounds.min_y, 0.0);
        assert_eq!(bounds.max_y, 2000.0);
        assert_eq!(bounds.center(), (500.0, 1000.0));
        assert!(Bounds::from_points(&[]).is_none());
    }

    #[test]
    fn test_scaler_fits_limiting_axis() {
        let bounds = Bounds {
            min_x: 0.0,
            max_x: 100.0,
            min_y: 0.0,
            max_y: 50.0,
        };
        let frame = Frame {
            width: 400.0,
            height: 400.0,
            center: (300.0, 400.0),
            fill: 0.5,
        };

        let scaler = Scaler::fit(&bounds, &frame);

        // Width limits: 400 / 100 = 4 pt/m, halved by the fill factor
        assert!((scaler.scale_factor() - 2.0).abs() < 1e-12);

        let (x, y) = scaler.scale(50.0, 25.0);
        assert!((x - 300.0).abs() < 1e-9);
        assert!((y - 400.0).abs() < 1e-9);

        let scaled = scaler.scale_points(&[(0.0, 0.0), (100.0, 50.0)]);
        assert_eq!(scaled, vec![(200.0, 350.0), (400.0, 450.0)]);
    }
}
