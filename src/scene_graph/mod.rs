pub mod geometry;
pub mod material;
pub mod object3d;
pub mod point_cloud;
pub mod scene;
pub mod transform;

pub use geometry::{MeshGeometry, PrimitiveKind};
pub use material::{Blending, LineMaterial, MeshMaterial, PointsMaterial};
pub use object3d::{Line, Mesh, Node, Object3D, ObjectId, Points};
pub use point_cloud::PointCloud;
pub use scene::Scene;
