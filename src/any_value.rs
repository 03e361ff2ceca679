use crate::error::ContainerError;
use std::any::{type_name, Any, TypeId};
use std::fmt;

/// Object-safe bridge that lets an erased value clone itself.
pub(crate) trait CloneAny: Any {
    fn clone_box(&self) -> Box<dyn CloneAny>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any + Clone> CloneAny for T {
    fn clone_box(&self) -> Box<dyn CloneAny> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A type-erased value that preserves its type tag
///
/// `AnyValue` is the element type of [`AnyContainer`](crate::AnyContainer).
/// The tag is captured once at construction and never changes; only the value
/// behind it can be mutated.
///
/// # Examples
///
/// ```
/// use sovran_hetero::{AnyValue, ContainerError};
///
/// let mut value = AnyValue::new(41i32);
/// *value.downcast_mut::<i32>()? += 1;
/// assert_eq!(value.downcast_ref::<i32>()?, &42);
///
/// assert!(matches!(
///     value.downcast_ref::<String>(),
///     Err(ContainerError::TypeMismatch { .. })
/// ));
/// # Ok::<(), ContainerError>(())
/// ```
pub struct AnyValue {
    type_id: TypeId,
    type_name: &'static str,
    value: Box<dyn CloneAny>,
}

impl AnyValue {
    /// Create a new AnyValue from any cloneable value
    pub fn new<T: Any + Clone>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            value: Box::new(value),
        }
    }

    /// Check if the contained value is of type T
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// The type tag of the contained value
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The name of the contained value's type, for diagnostics
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Get a reference to the contained value if it is of type T
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::TypeMismatch` if the value is not a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Result<&T, ContainerError> {
        let found = self.type_name;
        self.as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| mismatch::<T>(found))
    }

    /// Get a mutable reference to the contained value if it is of type T
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::TypeMismatch` if the value is not a `T`.
    pub fn downcast_mut<T: Any>(&mut self) -> Result<&mut T, ContainerError> {
        let found = self.type_name;
        self.as_any_mut()
            .downcast_mut::<T>()
            .ok_or_else(|| mismatch::<T>(found))
    }

    /// Turn the value into a `T`, or get `self` back if it is not a `T`
    ///
    /// Stored values are always `Clone`; the `T` is cloned out of the box and
    /// the box is dropped with `self`.
    pub fn downcast<T: Any + Clone>(self) -> Result<T, Self> {
        if let Ok(value) = self.downcast_ref::<T>() {
            return Ok(value.clone());
        }
        Err(self)
    }

    pub(crate) fn as_any(&self) -> &dyn Any {
        (*self.value).as_any()
    }

    pub(crate) fn as_any_mut(&mut self) -> &mut dyn Any {
        (*self.value).as_any_mut()
    }

    pub(crate) fn into_any(self) -> Box<dyn Any> {
        self.value.into_any()
    }
}

fn mismatch<T>(found: &'static str) -> ContainerError {
    ContainerError::TypeMismatch {
        expected: type_name::<T>(),
        found,
    }
}

impl Clone for AnyValue {
    fn clone(&self) -> Self {
        Self {
            type_id: self.type_id,
            type_name: self.type_name,
            value: (*self.value).clone_box(),
        }
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyValue")
            .field("type", &self.type_name)
            .finish_non_exhaustive()
    }
}
