//! Builds a small centripetal spline and logs evenly spaced samples.
//!
//! Usage:
//! ```text
//! cargo run --example sample_spline
//! RUST_LOG=splinekit=debug cargo run --example sample_spline
//! ```

use splinekit::math::{Euclidean2, Point2};
use splinekit::sampling::SampleEvery;
use splinekit::spline::HandleMargins;
use splinekit::{CatmullRomSpline, SplineError, SplineType};

fn main() -> Result<(), SplineError> {
    // Default: WARN for everything, INFO for the demo and splinekit.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("sample_spline=info".parse().unwrap_or_default())
        .add_directive("splinekit=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let spline = CatmullRomSpline::try_from_handles(
        [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 2.0),
            Point2::new(3.0, 2.5),
            Point2::new(4.0, 0.0),
            Point2::new(6.0, 1.0),
        ],
        Euclidean2::default(),
        SplineType::Centripetal,
        HandleMargins::Reflected,
    )?;
    tracing::info!(
        segments = spline.segment_count(),
        length = spline.length(),
        "spline ready"
    );

    for sample in SampleEvery::new(0.5).execute(&spline)? {
        let p = sample.position();
        let v = sample.velocity();
        tracing::info!(
            location = format!("{:.3}", sample.location().value()),
            x = format!("{:.3}", p.x),
            y = format!("{:.3}", p.y),
            speed = format!("{:.3}", v.norm()),
            "sample"
        );
    }
    Ok(())
}
