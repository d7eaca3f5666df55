use pcl_core::pointcloud::point::PointCloud;

pub mod reshape;
pub mod slice;

pub trait Transform {
    fn transform(&self, point_cloud: PointCloud) -> PointCloud;
}
