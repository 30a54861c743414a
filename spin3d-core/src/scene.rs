//! Insertion-ordered scene container
use crate::object::Object3D;

/// Handle to an object inside a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// All renderable objects for a frame, in the order they were added
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<Object3D>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: Object3D) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    pub fn get(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id.0)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object3D> {
        self.objects.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &Object3D)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(index, object)| (ObjectId(index), object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::geometry::{BoxGeometry, LineGeometry};
    use crate::material::{LineBasicMaterial, MeshBasicMaterial};

    #[test]
    fn test_insertion_order() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());

        let first = scene.add(Object3D::mesh(
            BoxGeometry::new(1.0, 1.0, 1.0),
            MeshBasicMaterial::new(Color::from_hex(0xff0000)),
        ));
        let second = scene.add(Object3D::line(
            LineGeometry::from_points(Vec::new()),
            LineBasicMaterial::new(Color::from_hex(0x0000ff)),
        ));

        assert_eq!(scene.len(), 2);
        assert_eq!((first.index(), second.index()), (0, 1));
        let ids: Vec<_> = scene.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_get_mut_changes_object() {
        let mut scene = Scene::new();
        let id = scene.add(Object3D::mesh(
            BoxGeometry::new(1.0, 1.0, 1.0),
            MeshBasicMaterial::new(Color::from_hex(0xff0000)),
        ));
        scene.get_mut(id).unwrap().rotation.rotate(0.5, 0.0, 0.0);
        assert_eq!(scene.get(id).unwrap().rotation.x, 0.5);
        assert!(scene.get(ObjectId(7)).is_none());
    }
}
