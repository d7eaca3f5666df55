use pcl_core::pointcloud::{point::PointCloud, transect::Transect};

use crate::{
    builder::{TransectTransformBuilder, TransformBuilder},
    transform::{reshape::to_transect, Transform},
};

pub trait Transformer {
    fn execute(&self, point_cloud: PointCloud) -> Transect;
}

/// Cuts one transect out of a point cloud and brings it into the
/// `xbin, zbin, vai` schema.
pub struct TransectExtractor {
    slice: i64,
    transform: Box<dyn Transform>,
}

impl TransectExtractor {
    pub fn new(slice: i64) -> Self {
        let builder = TransectTransformBuilder::new(slice);
        Self {
            slice,
            transform: builder.build(),
        }
    }
}

impl Transformer for TransectExtractor {
    fn execute(&self, point_cloud: PointCloud) -> Transect {
        let sliced = self.transform.transform(point_cloud);
        if sliced.is_empty() {
            log::warn!("slice {} matched no points, transect is empty", self.slice);
        }
        to_transect(self.slice, sliced)
    }
}
