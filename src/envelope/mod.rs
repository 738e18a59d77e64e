//! Envelope geometry: flaps, corners and the assembled cut contour

pub mod assemble;
pub mod config;
pub mod corner;
pub mod defaults;
pub mod flaps;
pub mod transform;

pub use assemble::{Envelope, Layout, Side, assemble, validate};
pub use config::EnvelopeConfig;
pub use corner::{Connector, CornerFrame, CornerStyle, PlainCorner, TabbedCorner};
pub use flaps::{FlapShape, left_right_flap, top_bottom_flap};
pub use transform::{mirror, translate};
