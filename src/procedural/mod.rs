pub mod ambient;
pub mod floating_shapes;
pub mod helix;

pub use floating_shapes::{build_floating_shapes, FloatingShape};
pub use helix::{build_helix, Helix};
