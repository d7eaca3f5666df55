use pcl_core::pointcloud::{
    point::{Point, PointCloud},
    transect::{Transect, TransectCell},
};

/// Renames `y -> xbin` and `z -> zbin`; `vai` is carried over untouched
/// and the scan-line index is dropped.
pub fn to_cell(point: Point) -> TransectCell {
    TransectCell {
        xbin: point.y,
        zbin: point.z,
        vai: point.vai,
    }
}

pub fn to_transect(slice: i64, point_cloud: PointCloud) -> Transect {
    Transect::new(slice, point_cloud.points.into_iter().map(to_cell).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_keeps_values() {
        let points = vec![
            Point::new(7.0, 3.25, 11.0, Some(0.4)),
            Point::new(7.0, 4.0, 0.0, Some(0.0)),
            Point::new(7.0, 5.0, 2.0, None),
        ];
        let transect = to_transect(7, PointCloud::new(points.clone()));

        assert_eq!(transect.slice, 7);
        assert_eq!(transect.len(), points.len());
        for (cell, point) in transect.cells.iter().zip(&points) {
            assert_eq!(cell.xbin, point.y);
            assert_eq!(cell.zbin, point.z);
            assert_eq!(cell.vai, point.vai);
        }
    }

    #[test]
    fn empty_cloud_is_empty_transect() {
        let transect = to_transect(0, PointCloud::default());
        assert!(transect.is_empty());
        assert_eq!(transect.xbin_range(), None);
    }
}
