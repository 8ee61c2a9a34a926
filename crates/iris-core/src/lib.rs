pub mod consts;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod gesture;
pub mod transform;
pub mod timer;
pub mod slideshow;
pub mod host;
pub mod input;
pub mod events;
pub mod config;
pub mod source;
pub mod viewer;

