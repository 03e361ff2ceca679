//! Type-indexed container.
//!
//! Instead of one unified sequence, [`BucketContainer`] keeps one ordered
//! bucket per element type. Each bucket is registered the first time the
//! container stores a value of its type, and is owned by that container
//! alone: cloning reproduces every bucket through its vtable, and clearing or
//! dropping releases exactly this container's buckets.

use crate::error::ContainerError;
use crate::position::BucketPosition;
use crate::visitor::{TypeFn, TypeList, Visit, Visitor};
use indexmap::IndexMap;
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::ops::ControlFlow;
use tracing::trace;

/// Type-erased bucket of values of one type.
///
/// The vtable of `dyn Bucket` plays the part of the per-type "copy my
/// bucket" and "erase my bucket" callbacks: `clone_bucket` copies, dropping
/// the box erases.
trait Bucket: Any {
    fn len(&self) -> usize;
    fn type_name(&self) -> &'static str;
    fn clone_bucket(&self) -> Box<dyn Bucket>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any + Clone> Bucket for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn clone_bucket(&self) -> Box<dyn Bucket> {
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

/// A heterogeneous container that groups its elements by type
///
/// Elements of the same type keep their insertion order. Across types there
/// is no global insertion order: visiting walks the visitor's declared types
/// in order and, for each, the whole bucket of that type.
///
/// # Examples
///
/// ```
/// use sovran_hetero::{BucketContainer, Visit, Visitor};
///
/// #[derive(Default)]
/// struct Collect(Vec<String>);
///
/// impl Visitor for Collect {
///     type Types = (String, i32);
/// }
///
/// impl<T: ToString> Visit<T> for Collect {
///     fn visit(&mut self, value: &T) {
///         self.0.push(value.to_string());
///     }
/// }
///
/// let mut container = BucketContainer::new();
/// container.push_back(1i32);
/// container.push_back(String::from("a"));
/// container.push_back(2i32);
///
/// let mut collect = Collect::default();
/// container.visit(&mut collect);
/// // declared order: all strings first, then all integers
/// assert_eq!(collect.0, vec!["a", "1", "2"]);
///
/// let copy = container.clone();
/// assert_eq!(container.erase::<i32>(), 2);
/// assert_eq!(copy.count::<i32>(), 2);
/// ```
#[derive(Default)]
pub struct BucketContainer {
    buckets: IndexMap<TypeId, Box<dyn Bucket>>,
    len: usize,
}

impl BucketContainer {
    /// Creates a new, empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value to the bucket of its type
    pub fn push_back<T: Any + Clone>(&mut self, value: T) {
        self.bucket_or_register::<T>().push(value);
        self.len += 1;
    }

    /// Builds a `T` from `args` and appends it to the bucket of `T`
    pub fn emplace_back<T, A>(&mut self, args: A)
    where
        T: Any + Clone + From<A>,
    {
        self.push_back(T::from(args));
    }

    /// Reserves room for `additional` more values of type `T`
    pub fn reserve<T: Any + Clone>(&mut self, additional: usize) {
        self.bucket_or_register::<T>().reserve(additional);
    }

    /// Drops the whole bucket of `T`
    ///
    /// # Returns
    ///
    /// The number of elements removed; `0` if `T` was never stored.
    pub fn erase<T: Any>(&mut self) -> usize {
        let erased = self
            .buckets
            .shift_remove(&TypeId::of::<T>())
            .map_or(0, |bucket| bucket.len());
        self.len -= erased;
        trace!(type_name = type_name::<T>(), erased, "erased bucket");
        erased
    }

    /// Drops the bucket of `T`, failing if it was never registered
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::MissingBucket` if the container never stored a
    /// `T` (or its bucket was already erased).
    pub fn try_erase<T: Any>(&mut self) -> Result<usize, ContainerError> {
        if !self.buckets.contains_key(&TypeId::of::<T>()) {
            return Err(ContainerError::MissingBucket {
                type_name: type_name::<T>(),
            });
        }
        Ok(self.erase::<T>())
    }

    /// Removes one element from the bucket of `T` and returns it
    ///
    /// The element type comes from the position, which must have been
    /// produced by [`common_entries`](Self::common_entries) on this container.
    ///
    /// Positions from the other containers count storage slots, not bucket
    /// slots, and are rejected at compile time:
    ///
    /// ```compile_fail
    /// use sovran_hetero::{AnyContainer, BucketContainer};
    ///
    /// let mut any = AnyContainer::new();
    /// any.push_back(1i32);
    /// let (position, _) = any.common_entries::<i32>().next().unwrap();
    ///
    /// let mut buckets = BucketContainer::new();
    /// buckets.push_back(1i32);
    /// buckets.erase_at(position);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if there is no bucket of `T` or the index is out of bounds.
    pub fn erase_at<T: Any>(&mut self, position: BucketPosition<T>) -> T {
        match self.try_erase_at(position) {
            Ok(value) => value,
            Err(err) => panic!("erase_at: {}", err),
        }
    }

    /// Removes one element from the bucket of `T` if the position is valid
    ///
    /// An emptied bucket stays registered.
    ///
    /// # Errors
    ///
    /// - Returns `ContainerError::MissingBucket` if there is no bucket of `T`
    /// - Returns `ContainerError::OutOfBounds` if the index is past the bucket
    pub fn try_erase_at<T: Any>(&mut self, position: BucketPosition<T>) -> Result<T, ContainerError> {
        let index = position.index();
        let bucket = self
            .bucket_mut::<T>()
            .ok_or(ContainerError::MissingBucket {
                type_name: type_name::<T>(),
            })?;
        if index >= bucket.len() {
            return Err(ContainerError::OutOfBounds {
                index,
                len: bucket.len(),
            });
        }
        let value = bucket.remove(index);
        self.len -= 1;
        Ok(value)
    }

    /// The values of type `T`, in insertion order
    pub fn bucket<T: Any>(&self) -> Option<&[T]> {
        self.buckets
            .get(&TypeId::of::<T>())
            .and_then(|bucket| bucket.as_any().downcast_ref::<Vec<T>>())
            .map(Vec::as_slice)
    }

    fn bucket_mut<T: Any>(&mut self) -> Option<&mut Vec<T>> {
        self.buckets
            .get_mut(&TypeId::of::<T>())
            .and_then(|bucket| bucket.as_any_mut().downcast_mut::<Vec<T>>())
    }

    fn bucket_or_register<T: Any + Clone>(&mut self) -> &mut Vec<T> {
        let bucket = self.buckets.entry(TypeId::of::<T>()).or_insert_with(|| {
            trace!(type_name = type_name::<T>(), "registered bucket");
            Box::new(Vec::<T>::new()) as Box<dyn Bucket>
        });
        match bucket.as_any_mut().downcast_mut::<Vec<T>>() {
            Some(bucket) => bucket,
            None => unreachable!("bucket keyed by the TypeId of a different type"),
        }
    }

    /// A lazy view over the elements of type `T`, in insertion order
    ///
    /// Empty if `T` was never stored.
    pub fn common_elements<T: Any>(&self) -> std::slice::Iter<'_, T> {
        self.bucket::<T>().unwrap_or(&[]).iter()
    }

    pub fn common_elements_mut<T: Any>(&mut self) -> std::slice::IterMut<'_, T> {
        self.bucket_mut::<T>()
            .map(Vec::as_mut_slice)
            .unwrap_or_default()
            .iter_mut()
    }

    /// The elements of type `T`, each paired with its position in the bucket
    pub fn common_entries<T: Any>(&self) -> impl Iterator<Item = (BucketPosition<T>, &T)> + Clone + '_ {
        self.common_elements::<T>()
            .enumerate()
            .map(|(index, value)| (BucketPosition::new(index), value))
    }

    pub fn count<T: Any>(&self) -> usize {
        self.bucket::<T>().map_or(0, <[T]>::len)
    }

    /// Returns true if the bucket of `T` holds at least one element
    pub fn contains<T: Any>(&self) -> bool {
        self.count::<T>() > 0
    }

    /// Number of registered buckets, including emptied ones
    pub fn type_count(&self) -> usize {
        self.buckets.len()
    }

    /// Names of the registered element types, in registration order
    pub fn type_names(&self) -> Vec<&'static str> {
        self.buckets.values().map(|bucket| bucket.type_name()).collect()
    }

    /// Visits every bucket whose type the visitor declares, in the
    /// visitor's declared order
    pub fn visit<V: Visitor>(&self, visitor: &mut V) {
        let mut walk = VisitBuckets {
            container: self,
            walked: Vec::new(),
        };
        let _ = V::Types::for_each_type(&mut walk, visitor);
    }

    /// Like [`visit`](Self::visit), handing out mutable references
    pub fn visit_mut<V: Visitor>(&mut self, visitor: &mut V) {
        let mut walk = VisitBucketsMut {
            container: self,
            walked: Vec::new(),
        };
        let _ = V::Types::for_each_type(&mut walk, visitor);
    }

    /// Consumes the container, handing the visitor every element of its
    /// declared types by value
    pub fn into_visit<V: Visitor>(mut self, visitor: &mut V) {
        let _ = V::Types::for_each_type(&mut DrainBuckets { container: &mut self }, visitor);
    }

    /// Total number of elements across all buckets
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every bucket and forgets their registrations
    ///
    /// Calling it again is a no-op.
    pub fn clear(&mut self) {
        if self.buckets.is_empty() {
            return;
        }
        trace!(buckets = self.buckets.len(), len = self.len, "clearing buckets");
        self.buckets.clear();
        self.len = 0;
    }
}

impl Clone for BucketContainer {
    fn clone(&self) -> Self {
        trace!(buckets = self.buckets.len(), len = self.len, "copying buckets");
        Self {
            buckets: self
                .buckets
                .iter()
                .map(|(id, bucket)| (*id, bucket.clone_bucket()))
                .collect(),
            len: self.len,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.buckets.extend(
            source
                .buckets
                .iter()
                .map(|(id, bucket)| (*id, bucket.clone_bucket())),
        );
        self.len = source.len;
    }
}

impl fmt::Debug for BucketContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketContainer")
            .field("len", &self.len)
            .field(
                "buckets",
                &self
                    .buckets
                    .values()
                    .map(|bucket| (bucket.type_name(), bucket.len()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

// A type declared twice is walked once; `walked` remembers the buckets seen.
struct VisitBuckets<'a> {
    container: &'a BucketContainer,
    walked: Vec<TypeId>,
}

fn first_walk<T: 'static>(walked: &mut Vec<TypeId>) -> bool {
    let id = TypeId::of::<T>();
    if walked.contains(&id) {
        return false;
    }
    walked.push(id);
    true
}

impl<V> TypeFn<V> for VisitBuckets<'_> {
    fn apply<T: 'static>(&mut self, visitor: &mut V) -> ControlFlow<()>
    where
        V: Visit<T>,
    {
        if !first_walk::<T>(&mut self.walked) {
            return ControlFlow::Continue(());
        }
        for value in self.container.common_elements::<T>() {
            visitor.visit(value);
        }
        ControlFlow::Continue(())
    }
}

struct VisitBucketsMut<'a> {
    container: &'a mut BucketContainer,
    walked: Vec<TypeId>,
}

impl<V> TypeFn<V> for VisitBucketsMut<'_> {
    fn apply<T: 'static>(&mut self, visitor: &mut V) -> ControlFlow<()>
    where
        V: Visit<T>,
    {
        if !first_walk::<T>(&mut self.walked) {
            return ControlFlow::Continue(());
        }
        for value in self.container.common_elements_mut::<T>() {
            visitor.visit_mut(value);
        }
        ControlFlow::Continue(())
    }
}

struct DrainBuckets<'a> {
    container: &'a mut BucketContainer,
}

impl<V> TypeFn<V> for DrainBuckets<'_> {
    fn apply<T: 'static>(&mut self, visitor: &mut V) -> ControlFlow<()>
    where
        V: Visit<T>,
    {
        let Some(bucket) = self.container.buckets.shift_remove(&TypeId::of::<T>()) else {
            return ControlFlow::Continue(());
        };
        if let Ok(values) = bucket.into_any().downcast::<Vec<T>>() {
            self.container.len -= values.len();
            for value in *values {
                visitor.visit_owned(value);
            }
        }
        ControlFlow::Continue(())
    }
}
