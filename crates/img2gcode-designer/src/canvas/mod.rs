//! Canvas object list.
//!
//! Objects are kept in insertion order, which is also the paint order.
//! Overlay objects (grid, rulers, dimension indicators) share the list with
//! design objects but are filtered out of everything that is saved,
//! exported or selected.

mod operations;

pub use operations::snap_to_grid;

use crate::model::{Bounds, Point, Shape};
use crate::object::{CanvasObject, OverlayKind};

#[derive(Debug, Clone, Default)]
pub struct Canvas {
    objects: Vec<CanvasObject>,
    next_id: u64,
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            next_id: 1,
        }
    }

    pub fn generate_id(&mut self) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    /// Adds a design object and returns its id.
    pub fn add_shape(&mut self, shape: Shape) -> u64 {
        let id = self.generate_id();
        self.objects.push(CanvasObject::new(id, shape));
        id
    }

    /// Inserts a prepared object. Its id is kept unless already taken.
    pub fn insert_object(&mut self, mut obj: CanvasObject) -> u64 {
        if obj.id == 0 || self.get(obj.id).is_some() {
            obj.id = self.generate_id();
        } else if obj.id >= self.next_id {
            self.next_id = obj.id + 1;
        }
        let id = obj.id;
        self.objects.push(obj);
        id
    }

    pub fn get(&self, id: u64) -> Option<&CanvasObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut CanvasObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn remove(&mut self, id: u64) -> Option<CanvasObject> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(index))
    }

    /// All objects, overlays included, in paint order.
    pub fn objects(&self) -> impl Iterator<Item = &CanvasObject> {
        self.objects.iter()
    }

    /// Objects that belong to the design.
    pub fn design_objects(&self) -> impl Iterator<Item = &CanvasObject> {
        self.objects.iter().filter(|o| !o.is_overlay())
    }

    pub fn design_count(&self) -> usize {
        self.design_objects().count()
    }

    pub fn overlays(&self, kind: OverlayKind) -> impl Iterator<Item = &CanvasObject> {
        self.objects
            .iter()
            .filter(move |o| o.overlay == Some(kind))
    }

    pub fn add_overlay(&mut self, kind: OverlayKind, shape: Shape, style: crate::object::Style) -> u64 {
        let id = self.generate_id();
        self.objects.push(CanvasObject::overlay(id, kind, shape, style));
        id
    }

    /// Removes every overlay of `kind`; returns how many were removed.
    pub fn remove_overlays(&mut self, kind: OverlayKind) -> usize {
        let before = self.objects.len();
        self.objects.retain(|o| o.overlay != Some(kind));
        before - self.objects.len()
    }

    /// Removes all design objects, leaving overlays; returns the count.
    pub fn clear_design(&mut self) -> usize {
        let before = self.objects.len();
        self.objects.retain(|o| o.is_overlay());
        before - self.objects.len()
    }

    pub fn select(&mut self, id: u64, multi: bool) -> bool {
        if !multi {
            self.deselect_all();
        }
        match self.get_mut(id) {
            Some(obj) if !obj.is_overlay() => {
                obj.selected = true;
                true
            }
            _ => false,
        }
    }

    pub fn select_all(&mut self) {
        for obj in self.objects.iter_mut().filter(|o| !o.is_overlay()) {
            obj.selected = true;
        }
    }

    pub fn deselect_all(&mut self) {
        for obj in &mut self.objects {
            obj.selected = false;
        }
    }

    /// Selects the topmost design object under `point`.
    pub fn select_at(&mut self, point: Point, tolerance: f64, multi: bool) -> Option<u64> {
        let hit = self
            .objects
            .iter()
            .rev()
            .filter(|o| !o.is_overlay())
            .find(|o| crate::model::DesignerShape::contains_point(&o.shape, point, tolerance))
            .map(|o| o.id);
        match hit {
            Some(id) => {
                self.select(id, multi);
            }
            None if !multi => self.deselect_all(),
            None => {}
        }
        hit
    }

    pub fn selected_ids(&self) -> Vec<u64> {
        self.objects
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.id)
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.objects.iter().filter(|o| o.selected).count()
    }

    pub fn selection_bounds(&self) -> Option<Bounds> {
        self.objects
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.bounds())
            .reduce(|a, b| a.union(&b))
    }

    /// Bounding box of every design object.
    pub fn design_bounds(&self) -> Option<Bounds> {
        self.design_objects()
            .map(|o| o.bounds())
            .reduce(|a, b| a.union(&b))
    }
}
