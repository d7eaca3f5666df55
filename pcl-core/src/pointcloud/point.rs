/// Vegetation area index of a single voxel.
///
/// `None` marks a sky hit (no canopy return). `Some(0.0)` is a measured
/// zero and takes part in every aggregation.
pub type Vai = Option<f64>;

/// Tokens the loaders treat as "no data".
pub const MISSING_TOKENS: [&str; 4] = ["", "NA", "NaN", "nan"];

pub fn parse_vai(value: &str) -> Result<Vai, std::num::ParseFloatError> {
    let value = value.trim();
    if MISSING_TOKENS.contains(&value) {
        return Ok(None);
    }
    let v: f64 = value.parse()?;
    if v.is_nan() {
        Ok(None)
    } else {
        Ok(Some(v))
    }
}

// x is the scan-line index, y the lateral offset along the transect,
// z the height above ground
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub vai: Vai,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64, vai: Vai) -> Self {
        Self { x, y, z, vai }
    }

    pub fn is_sky_hit(&self) -> bool {
        self.vai.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    pub points: Vec<Point>,
    pub metadata: Metadata,
}

impl PointCloud {
    pub fn new(points: Vec<Point>) -> Self {
        let mut bounding_volume = BoundingVolume {
            min: [f64::MAX, f64::MAX, f64::MAX],
            max: [f64::MIN, f64::MIN, f64::MIN],
        };
        let mut sky_hits = 0;

        for point in &points {
            bounding_volume.max[0] = bounding_volume.max[0].max(point.x);
            bounding_volume.max[1] = bounding_volume.max[1].max(point.y);
            bounding_volume.max[2] = bounding_volume.max[2].max(point.z);
            bounding_volume.min[0] = bounding_volume.min[0].min(point.x);
            bounding_volume.min[1] = bounding_volume.min[1].min(point.y);
            bounding_volume.min[2] = bounding_volume.min[2].min(point.z);

            if point.is_sky_hit() {
                sky_hits += 1;
            }
        }

        if points.is_empty() {
            bounding_volume = BoundingVolume::default();
        }

        let metadata = Metadata {
            point_count: points.len(),
            sky_hits,
            bounding_volume,
        };

        PointCloud { points, metadata }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// Extent of the raw coordinates; all zero for an empty cloud.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundingVolume {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub point_count: usize,
    pub sky_hits: usize,
    pub bounding_volume: BoundingVolume,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tokens_become_none() {
        for token in ["NA", "", " NaN ", "nan"] {
            assert_eq!(parse_vai(token).unwrap(), None, "token {:?}", token);
        }
        assert_eq!(parse_vai("0").unwrap(), Some(0.0));
        assert_eq!(parse_vai("2.5").unwrap(), Some(2.5));
        assert!(parse_vai("leaf").is_err());
    }

    #[test]
    fn metadata_tracks_extent_and_sky_hits() {
        let pc = PointCloud::new(vec![
            Point::new(1.0, 0.0, 3.0, Some(1.0)),
            Point::new(2.0, 5.0, 0.0, None),
        ]);
        assert_eq!(pc.metadata.point_count, 2);
        assert_eq!(pc.metadata.sky_hits, 1);
        assert_eq!(pc.metadata.bounding_volume.min, [1.0, 0.0, 0.0]);
        assert_eq!(pc.metadata.bounding_volume.max, [2.0, 5.0, 3.0]);
    }

    #[test]
    fn empty_cloud_has_zero_extent() {
        let pc = PointCloud::new(Vec::new());
        assert!(pc.is_empty());
        assert_eq!(pc.metadata.bounding_volume, BoundingVolume::default());
    }
}
