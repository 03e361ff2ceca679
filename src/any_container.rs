use crate::any_value::AnyValue;
use crate::error::ContainerError;
use crate::position::{BasePosition, TypedPosition};
use crate::visitor::{self, Visitor};
use std::any::{type_name, Any};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::slice;
use tracing::trace;

/// A heterogeneous sequence over an open set of types
///
/// `AnyContainer` stores one ordered sequence of type-erased [`AnyValue`]s.
/// Any cloneable `'static` type can be pushed without being named in
/// advance; every element carries its own type tag, which is checked on
/// access.
///
/// # Examples
///
/// ```
/// use sovran_hetero::{AnyContainer, Visit, Visitor};
///
/// #[derive(Default)]
/// struct Printer(Vec<String>);
///
/// impl Visitor for Printer {
///     type Types = (i32, f64, String);
/// }
///
/// impl<T: std::fmt::Display> Visit<T> for Printer {
///     fn visit(&mut self, value: &T) {
///         self.0.push(value.to_string());
///     }
/// }
///
/// let mut container = AnyContainer::new();
/// container.push_back(42i32);
/// container.push_back(4.5f64);
/// container.emplace_back::<String, _>("Hello world");
/// container.push_back('x'); // not declared by Printer, skipped
///
/// assert_eq!(container.common_elements::<i32>().collect::<Vec<_>>(), vec![&42]);
///
/// let mut printer = Printer::default();
/// container.visit(&mut printer);
/// assert_eq!(printer.0, vec!["42", "4.5", "Hello world"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AnyContainer {
    items: Vec<AnyValue>,
}

impl AnyContainer {
    /// Creates a new, empty container
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates an empty container with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Appends a value at the end of the sequence
    pub fn push_back<T: Any + Clone>(&mut self, value: T) {
        self.items.push(AnyValue::new(value));
    }

    /// Builds a `T` from `args` and appends it
    ///
    /// ```
    /// # use sovran_hetero::AnyContainer;
    /// let mut container = AnyContainer::new();
    /// container.emplace_back::<String, _>("built in place");
    /// assert!(container.contains::<String>());
    /// assert!(!container.contains::<&str>());
    /// ```
    pub fn emplace_back<T, A>(&mut self, args: A)
    where
        T: Any + Clone + From<A>,
    {
        self.items.push(AnyValue::new(T::from(args)));
    }

    /// Removes every element of type `T`, keeping the order of the rest
    ///
    /// # Returns
    ///
    /// The number of elements removed.
    pub fn erase<T: Any>(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.is::<T>());
        let erased = before - self.items.len();
        trace!(type_name = type_name::<T>(), erased, "erased elements by type");
        erased
    }

    /// Removes the element at `position` and returns it
    ///
    /// Accepts a raw index, a [`Position`](crate::Position) or a
    /// [`TypedPosition`] obtained from [`common_entries`](Self::common_entries).
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds. Positions from another
    /// container are not detected.
    pub fn erase_at<P: BasePosition>(&mut self, position: P) -> AnyValue {
        self.items.remove(position.base().index())
    }

    /// Removes the element at `position` if it exists
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::OutOfBounds` if the position does not refer to
    /// a live element.
    pub fn try_erase_at<P: BasePosition>(&mut self, position: P) -> Result<AnyValue, ContainerError> {
        let index = position.base().index();
        if index >= self.items.len() {
            return Err(ContainerError::OutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// A lazy view over the elements of type `T`, in insertion order
    ///
    /// The view borrows the container, so the borrow checker rejects any
    /// mutation while it is alive. It is `Clone`, so it can be restarted.
    pub fn common_elements<T: Any>(&self) -> CommonElements<'_, T> {
        CommonElements {
            items: self.items.iter(),
            _marker: PhantomData,
        }
    }

    /// A lazy view over mutable references to the elements of type `T`
    pub fn common_elements_mut<T: Any>(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.items
            .iter_mut()
            .filter_map(|item| item.as_any_mut().downcast_mut::<T>())
    }

    /// Like [`common_elements`](Self::common_elements), but each element is
    /// paired with its position in the underlying storage
    ///
    /// ```
    /// # use sovran_hetero::AnyContainer;
    /// let mut container = AnyContainer::new();
    /// container.push_back(1i32);
    /// container.push_back("skip");
    /// container.push_back(2i32);
    ///
    /// let position = container
    ///     .common_entries::<i32>()
    ///     .find(|(_, value)| **value == 2)
    ///     .map(|(position, _)| position)
    ///     .unwrap();
    /// container.erase_at(position);
    ///
    /// assert_eq!(container.common_elements::<i32>().collect::<Vec<_>>(), vec![&1]);
    /// assert_eq!(container.len(), 2);
    /// ```
    pub fn common_entries<T: Any>(&self) -> impl Iterator<Item = (TypedPosition<T>, &T)> + Clone + '_ {
        self.items.iter().enumerate().filter_map(|(index, item)| {
            item.as_any()
                .downcast_ref::<T>()
                .map(|value| (TypedPosition::new(index), value))
        })
    }

    /// Number of elements of type `T`
    pub fn count<T: Any>(&self) -> usize {
        self.items.iter().filter(|item| item.is::<T>()).count()
    }

    /// Returns true if at least one element is of type `T`
    pub fn contains<T: Any>(&self) -> bool {
        self.items.iter().any(|item| item.is::<T>())
    }

    /// Visits, in order, every element whose type the visitor declares
    pub fn visit<V: Visitor>(&self, visitor: &mut V) {
        for item in &self.items {
            visitor::visit_ref(visitor, item.as_any());
        }
    }

    /// Like [`visit`](Self::visit), handing out mutable references
    pub fn visit_mut<V: Visitor>(&mut self, visitor: &mut V) {
        for item in &mut self.items {
            visitor::visit_mut(visitor, item.as_any_mut());
        }
    }

    /// Consumes the container, handing each matched element to the visitor
    /// by value. Unmatched elements are dropped.
    pub fn into_visit<V: Visitor>(self, visitor: &mut V) {
        for item in self.items {
            visitor::visit_boxed(visitor, item.into_any());
        }
    }

    /// The element at `index`, if any
    pub fn get(&self, index: usize) -> Option<&AnyValue> {
        self.items.get(index)
    }

    /// Iterates over all elements in order
    pub fn iter(&self) -> slice::Iter<'_, AnyValue> {
        self.items.iter()
    }

    /// Returns the number of elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the container holds no elements
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes all elements
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a AnyContainer {
    type Item = &'a AnyValue;
    type IntoIter = slice::Iter<'a, AnyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Extend<AnyValue> for AnyContainer {
    fn extend<I: IntoIterator<Item = AnyValue>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl FromIterator<AnyValue> for AnyContainer {
    fn from_iter<I: IntoIterator<Item = AnyValue>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// Elements of one type in an [`AnyContainer`], see
/// [`AnyContainer::common_elements`].
pub struct CommonElements<'a, T> {
    items: slice::Iter<'a, AnyValue>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for CommonElements<'_, T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T: Any> Iterator for CommonElements<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.items
            .by_ref()
            .find_map(|item| item.as_any().downcast_ref::<T>())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.items.size_hint().1)
    }
}

impl<'a, T: Any> DoubleEndedIterator for CommonElements<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.items
            .by_ref()
            .rev()
            .find_map(|item| item.as_any().downcast_ref::<T>())
    }
}

impl<T: Any> FusedIterator for CommonElements<'_, T> {}
