use pcl_core::pointcloud::point::PointCloud;

use super::Transform;

/// Keeps the points of one scan line, in their original order.
pub struct SliceTransform {
    slice: i64,
}

impl SliceTransform {
    pub fn new(slice: i64) -> Self {
        Self { slice }
    }
}

impl Transform for SliceTransform {
    fn transform(&self, point_cloud: PointCloud) -> PointCloud {
        let index = self.slice as f64;
        let total = point_cloud.len();
        let points: Vec<_> = point_cloud
            .points
            .into_iter()
            .filter(|p| p.x == index)
            .collect();

        log::debug!("slice {}: kept {} of {} points", self.slice, points.len(), total);

        PointCloud::new(points)
    }
}

#[cfg(test)]
mod tests {
    use pcl_core::pointcloud::point::Point;

    use super::*;

    fn cloud() -> PointCloud {
        PointCloud::new(vec![
            Point::new(1.0, 0.0, 0.0, Some(2.0)),
            Point::new(2.0, 0.0, 0.0, Some(5.0)),
            Point::new(1.0, 0.0, 1.0, Some(0.0)),
            Point::new(3.0, 1.0, 1.0, None),
            Point::new(1.0, 1.0, 0.0, None),
        ])
    }

    #[test]
    fn keeps_exactly_the_matching_rows_in_order() {
        let input = cloud();
        let expected: Vec<Point> = input
            .points
            .iter()
            .filter(|p| p.x == 1.0)
            .cloned()
            .collect();

        let sliced = SliceTransform::new(1).transform(input);
        assert_eq!(sliced.points, expected);
        assert_eq!(sliced.metadata.point_count, 3);
        assert_eq!(sliced.metadata.sky_hits, 1);
    }

    // xorshift, so every run sees the same tables
    fn random_cloud(seed: u64, len: usize) -> PointCloud {
        let mut state = seed.max(1);
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };
        let points = (0..len)
            .map(|_| {
                let x = (next() % 6) as f64 - 1.0;
                let y = (next() % 10) as f64;
                let z = (next() % 40) as f64;
                let vai = match next() % 4 {
                    0 => None,
                    1 => Some(0.0),
                    _ => Some((next() % 800) as f64 / 100.0),
                };
                Point::new(x, y, z, vai)
            })
            .collect();
        PointCloud::new(points)
    }

    #[test]
    fn slice_equals_row_filter_for_many_tables() {
        for seed in 1..=25u64 {
            let input = random_cloud(seed, (seed as usize) * 17);
            for slice in -2..=5i64 {
                let expected: Vec<Point> = input
                    .points
                    .iter()
                    .filter(|p| p.x == slice as f64)
                    .cloned()
                    .collect();
                let sliced = SliceTransform::new(slice).transform(input.clone());

                assert_eq!(sliced.points, expected, "seed {} slice {}", seed, slice);
                assert_eq!(sliced.metadata.point_count, expected.len());
                assert_eq!(
                    sliced.metadata.sky_hits,
                    expected.iter().filter(|p| p.vai.is_none()).count()
                );
            }
        }
    }

    #[test]
    fn fractional_scan_lines_never_match() {
        let pc = PointCloud::new(vec![Point::new(1.5, 0.0, 0.0, Some(1.0))]);
        assert!(SliceTransform::new(1).transform(pc).is_empty());
    }

    #[test]
    fn unknown_slice_is_empty() {
        let sliced = SliceTransform::new(42).transform(cloud());
        assert!(sliced.is_empty());
    }
}
