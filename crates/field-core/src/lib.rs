//! Ambient particle field: particles, flares and travelling links over a
//! parallaxed drawing surface. Nothing here touches a browser API; the web
//! and native front-ends provide a [`Surface`] and a [`FrameScheduler`].

pub mod color;
pub mod constants;
pub mod field;
pub mod frame;
pub mod input;
pub mod link;
pub mod mesh;
pub mod noise;
pub mod particle;
pub mod registry;
pub mod settings;
pub mod surface;
pub mod view;

pub use color::*;
pub use field::*;
pub use frame::*;
pub use input::*;
pub use link::*;
pub use noise::*;
pub use particle::*;
pub use registry::*;
pub use settings::*;
pub use surface::*;
pub use view::*;
