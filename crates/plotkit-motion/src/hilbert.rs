//! Hilbert curve geometry
//!
//! Conversions between a distance along the curve and grid coordinates on an
//! `n × n` grid (`n` a power of two), plus sizing helpers.

/// Rotate/flip a quadrant of size `n`
fn rotate(n: i32, x: &mut i32, y: &mut i32, rx: i32, ry: i32) {
    if ry == 0 {
        if rx == 1 {
            *x = n - 1 - *x;
            *y = n - 1 - *y;
        }
        std::mem::swap(x, y);
    }
}

/// Grid coordinates `(x, y)` to distance along the curve
pub fn xy2d(n: i32, mut x: i32, mut y: i32) -> i32 {
    let mut d = 0;
    let mut s = n / 2;
    while s > 0 {
        let rx = i32::from(x & s > 0);
        let ry = i32::from(y & s > 0);
        d += s * s * ((3 * rx) ^ ry);
        rotate(s, &mut x, &mut y, rx, ry);
        s /= 2;
    }
    d
}

/// Distance along the curve to grid coordinates `(x, y)`
pub fn d2xy(n: i32, d: i32) -> (i32, i32) {
    let (mut x, mut y) = (0, 0);
    let mut t = d;
    let mut s = 1;
    while s < n {
        let rx = 1 & (t / 2);
        let ry = 1 & (t ^ rx);
        rotate(s, &mut x, &mut y, rx, ry);
        x += s * rx;
        y += s * ry;
        t /= 4;
        s *= 2;
    }
    (x, y)
}

/// Number of points on the curve for an `n × n` grid
pub fn curve_length(n: i32) -> i32 {
    n * n
}

/// Tiles per side for recursion depth `r` (`None` if negative or too deep)
pub fn depth_to_tiles(r: i32) -> Option<i32> {
    u32::try_from(r).ok().and_then(|r| 1i32.checked_shl(r)).filter(|n| *n > 0)
}

/// Recursion depth for `n` tiles per side, rounding down; `-1` if `n <= 0`
pub fn tiles_to_depth(n: i32) -> i32 {
    if n <= 0 {
        return -1;
    }
    31 - n.leading_zeros() as i32
}

/// Edge length of the whole image from tiles per side and cell size
pub fn image_size(n: i32, cell: f64) -> f64 {
    f64::from(n) * cell
}

/// Cell size from tiles per side and image edge length
pub fn cell_size(n: i32, image: f64) -> f64 {
    image / f64::from(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_one_curve() {
        let points: Vec<_> = (0..4).map(|d| d2xy(2, d)).collect();
        assert_eq!(points, vec![(0, 0), (0, 1), (1, 1), (1, 0)]);
    }

    #[test]
    fn test_order_two_curve_starts_and_ends_on_bottom_edge() {
        assert_eq!(d2xy(4, 0), (0, 0));
        assert_eq!(d2xy(4, 15), (3, 0));
        assert_eq!(xy2d(4, 3, 0), 15);
    }

    #[test]
    fn test_consecutive_points_are_adjacent() {
        let n = 16;
        for d in 1..curve_length(n) {
            let (ax, ay) = d2xy(n, d - 1);
            let (bx, by) = d2xy(n, d);
            assert_eq!((ax - bx).abs() + (ay - by).abs(), 1, "d = {}", d);
        }
    }

    #[test]
    fn test_depth_conversions() {
        assert_eq!(depth_to_tiles(0), Some(1));
        assert_eq!(depth_to_tiles(3), Some(8));
        assert_eq!(depth_to_tiles(-1), None);
        assert_eq!(depth_to_tiles(31), None);
        assert_eq!(tiles_to_depth(8), 3);
        assert_eq!(tiles_to_depth(9), 3);
        assert_eq!(tiles_to_depth(1), 0);
        assert_eq!(tiles_to_depth(0), -1);
    }

    #[test]
    fn test_sizing() {
        assert_eq!(cell_size(4, 150.0), 37.5);
        assert_eq!(image_size(4, 37.5), 150.0);
        assert_eq!(curve_length(8), 64);
    }
}
