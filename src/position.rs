//! Positions handed out by filtered views.
//!
//! A filtered view such as `common_entries::<T>()` skips elements of other
//! types, so the n-th item it yields is not the n-th element of the
//! container. The positions it yields still carry the index into the
//! underlying storage, and [`BasePosition`] reduces every kind of position to
//! that index so `erase_at` accepts them all. The bucket container counts
//! positions per bucket instead, and hands out [`BucketPosition`]s that only
//! its own `erase_at` takes.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// An index into a container's underlying storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position(usize);

impl Position {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for Position {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// A storage index that also names the type of the element it points at.
///
/// Produced by the `common_entries` views of
/// [`AnyContainer`](crate::AnyContainer) and
/// [`VariantContainer`](crate::VariantContainer). The position holds no
/// borrow, so it outlives the view that produced it.
pub struct TypedPosition<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

/// An index into the bucket of `T` inside a
/// [`BucketContainer`](crate::BucketContainer).
///
/// It counts only elements of `T`, so it is a different type from
/// [`TypedPosition`] and has no [`BasePosition`] impl: neither kind of
/// position is accepted where the other is expected.
pub struct BucketPosition<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

// Manual impls: the derives would require `T: Clone` etc.
macro_rules! impl_marker_position {
    ($name:ident) => {
        impl<T> $name<T> {
            pub fn new(index: usize) -> Self {
                Self {
                    index,
                    _marker: PhantomData,
                }
            }

            pub fn index(self) -> usize {
                self.index
            }
        }

        impl<T> Clone for $name<T> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<T> Copy for $name<T> {}

        impl<T> PartialEq for $name<T> {
            fn eq(&self, other: &Self) -> bool {
                self.index == other.index
            }
        }

        impl<T> Eq for $name<T> {}

        impl<T> Hash for $name<T> {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.index.hash(state);
            }
        }

        impl<T> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("type", &std::any::type_name::<T>())
                    .field("index", &self.index)
                    .finish()
            }
        }
    };
}

impl_marker_position!(TypedPosition);
impl_marker_position!(BucketPosition);

/// Reduces a (possibly typed) position to the raw storage index.
pub trait BasePosition {
    fn base(&self) -> Position;
}

impl BasePosition for Position {
    fn base(&self) -> Position {
        *self
    }
}

impl BasePosition for usize {
    fn base(&self) -> Position {
        Position(*self)
    }
}

impl<T> BasePosition for TypedPosition<T> {
    fn base(&self) -> Position {
        Position(self.index)
    }
}

impl<P: BasePosition + ?Sized> BasePosition for &P {
    fn base(&self) -> Position {
        (**self).base()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_position_reduces_to_its_index() {
        assert_eq!(3usize.base(), Position::new(3));
        assert_eq!(Position::new(5).base().index(), 5);
        assert_eq!(TypedPosition::<String>::new(7).base(), Position::from(7));
        assert_eq!((&TypedPosition::<u8>::new(2)).base().index(), 2);
    }

    #[test]
    fn test_typed_position_is_copy_for_non_clone_types() {
        struct NotClone;
        let position = TypedPosition::<NotClone>::new(1);
        let copy = position;
        assert_eq!(position, copy);
        assert_eq!(copy.index(), 1);
    }

    #[test]
    fn test_typed_position_debug_names_type() {
        let position = TypedPosition::<i32>::new(4);
        assert_eq!(
            format!("{:?}", position),
            "TypedPosition { type: \"i32\", index: 4 }"
        );
    }

    #[test]
    fn test_bucket_position_is_its_own_type() {
        let position = BucketPosition::<u8>::new(2);
        assert_eq!(position, BucketPosition::new(2));
        assert_eq!(position.index(), 2);
        assert_eq!(
            format!("{:?}", position),
            "BucketPosition { type: \"u8\", index: 2 }"
        );
    }
}
