use crate::location::{Boundary, Location};

use super::Way;

/// Anything that can be tested against a [`Boundary`]
pub trait Containable {
    fn is_contained_in(&self, boundary: &Boundary) -> bool;
}

impl Containable for Location {
    fn is_contained_in(&self, boundary: &Boundary) -> bool {
        boundary.contains(self)
    }
}

/// A way is contained if every point of its geometry is. Ways without
/// geometry are never contained.
impl Containable for Way {
    fn is_contained_in(&self, boundary: &Boundary) -> bool {
        !self.geometry().is_empty()
            && self
                .geometry()
                .iter()
                .all(|location| boundary.contains(location))
    }
}

/// A sequence is contained if any of its elements is.
impl<T: Containable> Containable for [T] {
    fn is_contained_in(&self, boundary: &Boundary) -> bool {
        self.iter().any(|item| item.is_contained_in(boundary))
    }
}

impl<T: Containable> Containable for Vec<T> {
    fn is_contained_in(&self, boundary: &Boundary) -> bool {
        self.as_slice().is_contained_in(boundary)
    }
}

impl<T: Containable + ?Sized> Containable for &T {
    fn is_contained_in(&self, boundary: &Boundary) -> bool {
        (**self).is_contained_in(boundary)
    }
}
