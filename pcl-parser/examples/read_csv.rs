use std::path::PathBuf;

use pcl_parser::{load, PointSource};

fn main() {
    let source = PointSource::Path(PathBuf::from("examples/data/sample_transect.csv"));

    let data = match load(source) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    println!(
        "{name}: {num_points} points, {sky} sky hits",
        name = data.name,
        num_points = data.cloud.len(),
        sky = data.cloud.metadata.sky_hits
    );

    if let Some(point) = data.cloud.points.first() {
        println!("First point: {:?}", point);
    }
}
