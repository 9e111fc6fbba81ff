//! Shared primitives for the switchboard crates.
//!
//! Deliberately small: boxed-future aliases used at async seams, the device
//! classification consulted by availability checks, and the screen geometry
//! used for detached menu placement. Nothing here depends on the registry or
//! menu layers.

pub mod device;
pub mod future;
pub mod geometry;

pub use device::{DeviceClass, DeviceFacts, DeviceParseError};
pub use future::{BoxFutureLocal, BoxFutureSend, BoxFutureStatic};
pub use geometry::{Point, Rect, Size};
