//! Static structure builders.
//!
//! Every builder is a pure function from sample tables (or plain
//! parameters) to a [`StructureDescriptor`]. Nothing is animated here;
//! the one exception is the screen-door builder, which also hands back the
//! [`crate::platform_doors::DoorGroup`] that drives its leaves.

mod bridges;
mod catenary;
mod concourse;
mod guideway;
mod platform;
mod rails;
mod roof;
mod screen_doors;
mod types;


pub use bridges::{
    build_arch_bridge, build_girder_bridge, ArcParams, ArchBridgeParams, GirderBridgeParams,
};
pub use catenary::{build_catenary, lattice_tower, portal_template, CatenaryParams};
pub use concourse::{build_concourse, ceiling_spacing, deck_width, ConcourseParams};
pub use guideway::{build_guideway, girder};
pub use platform::build_platform;
pub use rails::{build_rails, build_tunnel_walls};
pub use roof::build_roof;
pub use screen_doors::{build_screen_doors, place_unit, PlatformSide, ScreenDoorSet};
pub use types::*;
