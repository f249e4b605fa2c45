use glam::Vec3;
use id_arena::Id;

use crate::scene_graph::geometry::GeometryId;
use crate::scene_graph::material::{LineMaterial, MaterialId, PointsMaterial};
use crate::scene_graph::point_cloud::PointCloud;
#[cfg(test)]
use crate::scene_graph::scene::Scene;
use crate::scene_graph::transform::Transform;

pub type ObjectId = Id<Object3D>;

#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: GeometryId,
    pub material: MaterialId,
}

#[derive(Debug, Clone)]
pub struct Points {
    pub cloud: PointCloud,
    pub material: PointsMaterial,
}

/// A single segment in object space.
#[derive(Debug, Clone)]
pub struct Line {
    pub start: Vec3,
    pub end: Vec3,
    pub material: LineMaterial,
}

#[derive(Debug, Clone, Default)]
pub enum Node {
    #[default]
    Group,
    Mesh(Mesh),
    Points(Points),
    Line(Line),
}

pub struct Object3D {
    pub name: String,
    pub transform: Transform,
    pub node: Node,
    pub parent_id: Option<ObjectId>,
    pub child_ids: Vec<ObjectId>,
}

impl Object3D {
    pub fn new(name: impl Into<String>, node: Node) -> Self {
        Self {
            name: name.into(),
            node,
            ..Default::default()
        }
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.transform.set_translation(translation);
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.transform.set_rotation(rotation);
        self
    }
}

#[cfg(test)]
impl Object3D {
    pub fn children<'a, 'b>(&'a self, scene: &'b Scene) -> impl Iterator<Item = &'b Object3D> + 'b
    where
        'a: 'b,
    {
        self.child_ids
            .iter()
            .filter_map(move |id| scene.get_object(*id))
    }
}

impl Default for Object3D {
    fn default() -> Self {
        Self {
            name: String::new(),
            transform: Transform::from_translation(Vec3::ZERO),
            node: Node::Group,
            parent_id: None,
            child_ids: Vec::new(),
        }
    }
}
