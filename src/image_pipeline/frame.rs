//! Frame model module
//!
//! Canonical in-memory representation of a sensor frame, its raw byte
//! layout and its orientation metadata.

mod layout;
pub mod orientation;
pub mod types;

pub use layout::RawLayout;
pub use orientation::{Orientation, Rotation};
pub use types::{Frame, Samples};
