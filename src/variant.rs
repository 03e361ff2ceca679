use crate::error::ContainerError;
use crate::position::{BasePosition, TypedPosition};
use crate::visitor::{self, Visitor};
use std::any::{type_name, Any, TypeId};
use std::slice;
use tracing::trace;

/// A closed set of element types, represented as an enum.
///
/// Implemented by [`variant_set!`](crate::variant_set); writing it by hand is
/// possible but the macro keeps the [`Member`] impls consistent.
pub trait VariantSet: Sized + 'static {
    /// The type tag of the alternative currently held.
    fn held_type_id(&self) -> TypeId;

    fn held_type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Hands the held value to `visitor` by value if it declares its type.
    fn accept_owned<V: Visitor>(self, visitor: &mut V) -> bool;
}

/// `T` is one of the alternatives of the set.
pub trait Member<T>: VariantSet {
    fn wrap(value: T) -> Self;

    fn get(&self) -> Option<&T>;

    fn get_mut(&mut self) -> Option<&mut T>;

    fn into_member(self) -> Result<T, Self>;

    fn holds(&self) -> bool {
        self.get().is_some()
    }
}

/// Declares an enum usable as the element type of a [`VariantContainer`].
///
/// Each alternative is a single-field tuple variant. The alternative types
/// must be distinct; a repeated type fails to compile with conflicting
/// `Member` impls.
///
/// ```
/// use sovran_hetero::{variant_set, Member, VariantSet};
///
/// variant_set! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub enum Scalar {
///         Int(i32),
///         Float(f64),
///         Text(String),
///     }
/// }
///
/// let value = <Scalar as Member<f64>>::wrap(2.5);
/// assert_eq!(value, Scalar::Float(2.5));
/// assert!(<Scalar as Member<f64>>::holds(&value));
/// assert_eq!(value.held_type_name(), "f64");
/// ```
#[macro_export]
macro_rules! variant_set {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident($ty:ty)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $($variant($ty)),+
        }

        impl $crate::VariantSet for $name {
            fn held_type_id(&self) -> ::core::any::TypeId {
                match self {
                    $(Self::$variant(_) => ::core::any::TypeId::of::<$ty>()),+
                }
            }

            fn held_type_name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => ::core::any::type_name::<$ty>()),+
                }
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                match self {
                    $(Self::$variant(value) => value as &dyn ::core::any::Any),+
                }
            }

            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                match self {
                    $(Self::$variant(value) => value as &mut dyn ::core::any::Any),+
                }
            }

            fn accept_owned<V: $crate::Visitor>(self, visitor: &mut V) -> bool {
                match self {
                    $(Self::$variant(value) => {
                        $crate::__private::visit_slot(visitor, &mut ::core::option::Option::Some(value))
                    }),+
                }
            }
        }

        $(
            impl $crate::Member<$ty> for $name {
                fn wrap(value: $ty) -> Self {
                    Self::$variant(value)
                }

                #[allow(unreachable_patterns)]
                fn get(&self) -> ::core::option::Option<&$ty> {
                    match self {
                        Self::$variant(value) => ::core::option::Option::Some(value),
                        _ => ::core::option::Option::None,
                    }
                }

                #[allow(unreachable_patterns)]
                fn get_mut(&mut self) -> ::core::option::Option<&mut $ty> {
                    match self {
                        Self::$variant(value) => ::core::option::Option::Some(value),
                        _ => ::core::option::Option::None,
                    }
                }

                #[allow(unreachable_patterns)]
                fn into_member(self) -> ::core::result::Result<$ty, Self> {
                    match self {
                        Self::$variant(value) => ::core::result::Result::Ok(value),
                        other => ::core::result::Result::Err(other),
                    }
                }
            }
        )+
    };
}

/// A heterogeneous sequence over a closed set of types
///
/// Elements are stored unboxed as values of the set enum `S`, so each one
/// takes the size of the largest alternative. Pushing a type that is not an
/// alternative of `S` does not compile.
///
/// # Examples
///
/// ```
/// use sovran_hetero::{variant_set, VariantContainer};
///
/// variant_set! {
///     #[derive(Debug, Clone)]
///     enum Scalar {
///         Int(i32),
///         Text(String),
///     }
/// }
///
/// let mut container = VariantContainer::<Scalar>::new();
/// container.push_back(1i32);
/// container.emplace_back::<String, _>("one");
/// container.push_back(2i32);
///
/// assert_eq!(container.erase::<i32>(), 2);
/// assert_eq!(container.len(), 1);
/// ```
///
/// ```compile_fail
/// use sovran_hetero::{variant_set, VariantContainer};
///
/// variant_set! {
///     enum Scalar {
///         Int(i32),
///     }
/// }
///
/// let mut container = VariantContainer::<Scalar>::new();
/// container.push_back(4.5f64); // f64 is not an alternative
/// ```
#[derive(Clone, Debug)]
pub struct VariantContainer<S> {
    items: Vec<S>,
}

impl<S: VariantSet> VariantContainer<S> {
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

    /// Appends a value of one of the set's alternative types
    pub fn push_back<T>(&mut self, value: T)
    where
        S: Member<T>,
    {
        self.items.push(S::wrap(value));
    }

    /// Appends an already-built alternative
    pub fn push(&mut self, value: S) {
        self.items.push(value);
    }

    /// Builds a `T` from `args` and appends it
    pub fn emplace_back<T, A>(&mut self, args: A)
    where
        S: Member<T>,
        T: From<A>,
    {
        self.items.push(S::wrap(T::from(args)));
    }

    /// Removes every element holding a `T`, keeping the order of the rest
    ///
    /// # Returns
    ///
    /// The number of elements removed.
    pub fn erase<T>(&mut self) -> usize
    where
        S: Member<T>,
    {
        let before = self.items.len();
        self.items.retain(|item| !<S as Member<T>>::holds(item));
        let erased = before - self.items.len();
        trace!(type_name = type_name::<T>(), erased, "erased alternatives by type");
        erased
    }

    /// Removes the element at `position` and returns it
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    pub fn erase_at<P: BasePosition>(&mut self, position: P) -> S {
        self.items.remove(position.base().index())
    }

    /// Removes the element at `position` if it exists
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::OutOfBounds` if the position does not refer to
    /// a live element.
    pub fn try_erase_at<P: BasePosition>(&mut self, position: P) -> Result<S, ContainerError> {
        let index = position.base().index();
        if index >= self.items.len() {
            return Err(ContainerError::OutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// A lazy view over the elements holding a `T`, in insertion order
    pub fn common_elements<T>(&self) -> impl DoubleEndedIterator<Item = &T> + Clone + '_
    where
        S: Member<T>,
        T: 'static,
    {
        self.items.iter().filter_map(<S as Member<T>>::get)
    }

    /// Like [`common_elements`](Self::common_elements), with mutable access
    pub fn common_elements_mut<T>(&mut self) -> impl DoubleEndedIterator<Item = &mut T> + '_
    where
        S: Member<T>,
        T: 'static,
    {
        self.items.iter_mut().filter_map(<S as Member<T>>::get_mut)
    }

    /// The elements holding a `T`, each paired with its storage position
    pub fn common_entries<T>(&self) -> impl Iterator<Item = (TypedPosition<T>, &T)> + Clone + '_
    where
        S: Member<T>,
        T: 'static,
    {
        self.items.iter().enumerate().filter_map(|(index, item)| {
            <S as Member<T>>::get(item).map(|value| (TypedPosition::new(index), value))
        })
    }

    /// Number of elements holding a `T`
    pub fn count<T>(&self) -> usize
    where
        S: Member<T>,
    {
        self.items.iter().filter(|item| <S as Member<T>>::holds(*item)).count()
    }

    /// Visits, in order, every element whose type the visitor declares
    ///
    /// Alternatives the visitor does not declare are skipped.
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
    /// by value
    pub fn into_visit<V: Visitor>(self, visitor: &mut V) {
        for item in self.items {
            item.accept_owned(visitor);
        }
    }

    /// The element at storage index `index`, if any
    pub fn get(&self, index: usize) -> Option<&S> {
        self.items.get(index)
    }

    /// Iterates over all elements in insertion order
    pub fn iter(&self) -> slice::Iter<'_, S> {
        self.items.iter()
    }

    /// All elements as a slice, in insertion order
    pub fn as_slice(&self) -> &[S] {
        &self.items
    }

    /// Total number of elements, of every type
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the container holds no elements
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes all elements. Calling it again is a no-op.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<S: VariantSet> Default for VariantContainer<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, S> IntoIterator for &'a VariantContainer<S> {
    type Item = &'a S;
    type IntoIter = slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<S> IntoIterator for VariantContainer<S> {
    type Item = S;
    type IntoIter = std::vec::IntoIter<S>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<S: VariantSet> Extend<S> for VariantContainer<S> {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<S: VariantSet> FromIterator<S> for VariantContainer<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
