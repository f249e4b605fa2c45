use glam::{Mat4, Vec3};
use id_arena::Arena;

use crate::scene_graph::geometry::{GeometryId, MeshGeometry};
use crate::scene_graph::material::{MaterialId, MeshMaterial};
use crate::scene_graph::object3d::{Node, Object3D, ObjectId, Points};
#[cfg(test)]
use crate::scene_graph::transform::Transform;

/// Owns every node of one visual plus the geometries and materials they share.
/// Objects are never removed individually; the whole scene is dropped at teardown.
pub struct Scene {
    pub objects: Arena<Object3D>,
    pub geometries: Arena<MeshGeometry>,
    pub materials: Arena<MeshMaterial>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Arena::new(),
            geometries: Arena::new(),
            materials: Arena::new(),
        }
    }

    pub fn add_object(&mut self, object: Object3D) -> ObjectId {
        self.objects.alloc(object)
    }

    /// Adds `object` under `parent`, or at the root when `parent` is `None`.
    pub fn add_child(&mut self, parent: Option<ObjectId>, object: Object3D) -> ObjectId {
        let id = self.add_object(object);
        if parent.is_some() {
            self.set_object_parent(id, parent);
        }
        id
    }

    pub fn add_geometry(&mut self, geometry: MeshGeometry) -> GeometryId {
        self.geometries.alloc(geometry)
    }

    pub fn add_material(&mut self, material: MeshMaterial) -> MaterialId {
        self.materials.alloc(material)
    }

    pub fn points_mut(&mut self, id: ObjectId) -> Option<&mut Points> {
        match self.objects.get_mut(id).map(|object| &mut object.node) {
            Some(Node::Points(points)) => Some(points),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Updates all object transforms in hierarchical order
    fn update_transforms(&self) {
        let root_objects = self
            .objects
            .iter()
            .filter(|(_, object)| object.parent_id.is_none())
            .map(|(id, _)| id);

        for root_id in root_objects {
            self.update_object_transform_recursive(root_id, Mat4::IDENTITY, false);
        }
    }

    fn update_object_transform_recursive(
        &self,
        object_id: ObjectId,
        parent_world_matrix: Mat4,
        parent_changed: bool,
    ) {
        if let Some(object) = self.objects.get(object_id) {
            let changed = parent_changed || object.transform.is_world_dirty();
            if changed {
                let local_matrix = *object.transform.get_local_matrix();
                object
                    .transform
                    .set_world_matrix(parent_world_matrix * local_matrix);
            }

            let world_matrix = *object.transform.get_world_matrix();
            for &child_id in &object.child_ids {
                self.update_object_transform_recursive(child_id, world_matrix, changed);
            }
        }
    }

    /// Sets the parent of an object and updates child relationships
    pub fn set_object_parent(&mut self, child_id: ObjectId, new_parent_id: Option<ObjectId>) {
        if let Some(old_parent_id) = self.objects.get(child_id).and_then(|c| c.parent_id) {
            if let Some(old_parent) = self.objects.get_mut(old_parent_id) {
                old_parent.child_ids.retain(|&id| id != child_id);
            }
        }

        if let Some(child) = self.objects.get_mut(child_id) {
            child.parent_id = new_parent_id;
        }

        if let Some(new_parent) = new_parent_id.and_then(|id| self.objects.get_mut(id)) {
            new_parent.child_ids.push(child_id);
        }

        if let Some(child) = self.objects.get(child_id) {
            child.transform.invalidate_world();
        }
    }

    pub fn set_object_translation(&mut self, object_id: ObjectId, translation: Vec3) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.set_translation(translation);
        }
    }

    pub fn set_object_rotation(&mut self, object_id: ObjectId, rotation: Vec3) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.set_rotation(rotation);
        }
    }

    pub fn rotate_object(&mut self, object_id: ObjectId, delta: Vec3) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.rotate(delta);
        }
    }

    /// Brings every world matrix up to date before drawing.
    pub fn late_update(&self) {
        self.update_transforms();
    }
}

#[cfg(test)]
impl Scene {
    pub fn get_object(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id)
    }

    pub fn get_object_transform(&self, object_id: ObjectId) -> Option<&Transform> {
        self.objects.get(object_id).map(|object| &object.transform)
    }

    pub fn world_matrix(&self, object_id: ObjectId) -> Option<Mat4> {
        self.objects
            .get(object_id)
            .map(|object| *object.transform.get_world_matrix())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_world_matrix_includes_parent() {
        let mut scene = Scene::new();
        let group = scene.add_object(
            Object3D::new("group", Node::Group).with_translation(Vec3::new(1.0, 0.0, 0.0)),
        );
        let child = scene.add_child(
            Some(group),
            Object3D::new("child", Node::Group).with_translation(Vec3::new(0.0, 2.0, 0.0)),
        );

        scene.late_update();
        let origin = scene.world_matrix(child).unwrap().transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), 1e-6));

        scene.set_object_translation(group, Vec3::new(-1.0, 0.0, 0.0));
        scene.late_update();
        let moved = scene.world_matrix(child).unwrap().transform_point3(Vec3::ZERO);
        assert!(moved.abs_diff_eq(Vec3::new(-1.0, 2.0, 0.0), 1e-6));
    }

    #[test]
    fn reparenting_updates_child_lists() {
        let mut scene = Scene::new();
        let a = scene.add_object(Object3D::new("a", Node::Group));
        let b = scene.add_object(Object3D::new("b", Node::Group));
        let child = scene.add_child(Some(a), Object3D::new("child", Node::Group));

        scene.set_object_parent(child, Some(b));

        assert!(scene.get_object(a).unwrap().child_ids.is_empty());
        assert_eq!(scene.get_object(b).unwrap().child_ids, vec![child]);
        assert_eq!(scene.get_object(child).unwrap().parent_id, Some(b));
    }

    #[test]
    fn points_mut_only_matches_point_nodes() {
        let mut scene = Scene::new();
        let group = scene.add_object(Object3D::new("group", Node::Group));
        assert!(scene.points_mut(group).is_none());
    }
}
