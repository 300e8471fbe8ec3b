use glam::Vec3;

/// A host-owned object whose position a layer drives.
///
/// The core never creates or destroys entities; it only reads the position
/// at setup and writes a new one every tick. Each entity should be driven by
/// at most one [`crate::layer::Layer`].
pub trait Positionable {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
}

/// A bare position is its own entity.
impl Positionable for Vec3 {
    #[inline]
    fn position(&self) -> Vec3 {
        *self
    }

    #[inline]
    fn set_position(&mut self, position: Vec3) {
        *self = position;
    }
}

impl<T: Positionable + ?Sized> Positionable for Box<T> {
    #[inline]
    fn position(&self) -> Vec3 {
        (**self).position()
    }

    #[inline]
    fn set_position(&mut self, position: Vec3) {
        (**self).set_position(position);
    }
}
