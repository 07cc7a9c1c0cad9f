//! Reference chart overlay coordinates
//!
//! Only pixel coordinates leave this module; drawing on the image is the
//! renderer's job.

pub mod axis;

pub use axis::{map_to_pixel, AxisCalibration, ChartCalibration, PixelPoint};
