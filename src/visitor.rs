//! Capability-bounded visitors.
//!
//! A visitor declares, once, the ordered list of types it handles:
//!
//! ```
//! use sovran_hetero::{Visit, Visitor};
//! use std::fmt::Display;
//!
//! #[derive(Default)]
//! struct Printer {
//!     lines: Vec<String>,
//! }
//!
//! impl Visitor for Printer {
//!     type Types = (i32, f64, String);
//! }
//!
//! impl<T: Display> Visit<T> for Printer {
//!     fn visit(&mut self, value: &T) {
//!         self.lines.push(value.to_string());
//!     }
//! }
//! ```
//!
//! The compiler checks that `Printer: Visit<T>` for every `T` in `Types`, so a
//! visitor can never claim a type it cannot handle. Containers only accept
//! values implementing [`Visitor`]; anything else is a compile error.

use std::any::{type_name, Any, TypeId};
use std::ops::ControlFlow;

/// Handles one element type.
///
/// Only [`visit`](Visit::visit) is required. The mutable and owning forms
/// default to it, so a read-only visitor works with every visiting
/// convention of every container.
pub trait Visit<T> {
    fn visit(&mut self, value: &T);

    fn visit_mut(&mut self, value: &mut T) {
        self.visit(value)
    }

    fn visit_owned(&mut self, value: T) {
        self.visit(&value)
    }
}

/// A value that declares which element types it can visit.
pub trait Visitor: Sized {
    /// The capability list, in visiting priority order.
    type Types: TypeList<Self>;
}

/// A callback invoked once per type of a [`TypeList`].
pub trait TypeFn<V> {
    fn apply<T: 'static>(&mut self, visitor: &mut V) -> ControlFlow<()>
    where
        V: Visit<T>;
}

/// A compile-time list of types, all of which `V` can visit.
///
/// Implemented for tuples of up to twelve `'static` types.
pub trait TypeList<V>: 'static {
    const LEN: usize;

    /// Calls `f` for each type in declared order until it breaks.
    fn for_each_type<Fun: TypeFn<V>>(f: &mut Fun, visitor: &mut V) -> ControlFlow<()>;

    fn contains(id: TypeId) -> bool;

    fn type_names() -> Vec<&'static str>;
}

impl<V> TypeList<V> for () {
    const LEN: usize = 0;

    fn for_each_type<Fun: TypeFn<V>>(_f: &mut Fun, _visitor: &mut V) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn contains(_id: TypeId) -> bool {
        false
    }

    fn type_names() -> Vec<&'static str> {
        Vec::new()
    }
}

macro_rules! impl_type_list {
    ($len:expr; $($ty:ident),+) => {
        impl<V, $($ty: 'static),+> TypeList<V> for ($($ty,)+)
        where
            $(V: Visit<$ty>,)+
        {
            const LEN: usize = $len;

            fn for_each_type<Fun: TypeFn<V>>(f: &mut Fun, visitor: &mut V) -> ControlFlow<()> {
                $(
                    if f.apply::<$ty>(visitor).is_break() {
                        return ControlFlow::Break(());
                    }
                )+
                ControlFlow::Continue(())
            }

            fn contains(id: TypeId) -> bool {
                false $(|| TypeId::of::<$ty>() == id)+
            }

            fn type_names() -> Vec<&'static str> {
                vec![$(type_name::<$ty>()),+]
            }
        }
    };
}

impl_type_list!(1; A);
impl_type_list!(2; A, B);
impl_type_list!(3; A, B, C);
impl_type_list!(4; A, B, C, D);
impl_type_list!(5; A, B, C, D, E);
impl_type_list!(6; A, B, C, D, E, F);
impl_type_list!(7; A, B, C, D, E, F, G);
impl_type_list!(8; A, B, C, D, E, F, G, H);
impl_type_list!(9; A, B, C, D, E, F, G, H, I);
impl_type_list!(10; A, B, C, D, E, F, G, H, I, J);
impl_type_list!(11; A, B, C, D, E, F, G, H, I, J, K);
impl_type_list!(12; A, B, C, D, E, F, G, H, I, J, K, L);

struct ByRef<'a> {
    value: &'a dyn Any,
}

impl<V> TypeFn<V> for ByRef<'_> {
    fn apply<T: 'static>(&mut self, visitor: &mut V) -> ControlFlow<()>
    where
        V: Visit<T>,
    {
        match self.value.downcast_ref::<T>() {
            Some(value) => {
                visitor.visit(value);
                ControlFlow::Break(())
            }
            None => ControlFlow::Continue(()),
        }
    }
}

struct ByMut<'a> {
    value: &'a mut dyn Any,
}

impl<V> TypeFn<V> for ByMut<'_> {
    fn apply<T: 'static>(&mut self, visitor: &mut V) -> ControlFlow<()>
    where
        V: Visit<T>,
    {
        match self.value.downcast_mut::<T>() {
            Some(value) => {
                visitor.visit_mut(value);
                ControlFlow::Break(())
            }
            None => ControlFlow::Continue(()),
        }
    }
}

struct ByBox {
    value: Option<Box<dyn Any>>,
}

impl<V> TypeFn<V> for ByBox {
    fn apply<T: 'static>(&mut self, visitor: &mut V) -> ControlFlow<()>
    where
        V: Visit<T>,
    {
        let Some(boxed) = self.value.take() else {
            return ControlFlow::Break(());
        };
        match boxed.downcast::<T>() {
            Ok(value) => {
                visitor.visit_owned(*value);
                ControlFlow::Break(())
            }
            Err(boxed) => {
                self.value = Some(boxed);
                ControlFlow::Continue(())
            }
        }
    }
}

/// `slot` points at an `Option<X>` holding the value to hand over.
struct BySlot<'a> {
    slot: &'a mut dyn Any,
}

impl<V> TypeFn<V> for BySlot<'_> {
    fn apply<T: 'static>(&mut self, visitor: &mut V) -> ControlFlow<()>
    where
        V: Visit<T>,
    {
        match self.slot.downcast_mut::<Option<T>>() {
            Some(slot) => {
                if let Some(value) = slot.take() {
                    visitor.visit_owned(value);
                }
                ControlFlow::Break(())
            }
            None => ControlFlow::Continue(()),
        }
    }
}

/// Visits `value` if its type is one of the visitor's declared types.
pub(crate) fn visit_ref<V: Visitor>(visitor: &mut V, value: &dyn Any) -> bool {
    V::Types::for_each_type(&mut ByRef { value }, visitor).is_break()
}

pub(crate) fn visit_mut<V: Visitor>(visitor: &mut V, value: &mut dyn Any) -> bool {
    V::Types::for_each_type(&mut ByMut { value }, visitor).is_break()
}

pub(crate) fn visit_boxed<V: Visitor>(visitor: &mut V, value: Box<dyn Any>) -> bool {
    let mut by_box = ByBox { value: Some(value) };
    V::Types::for_each_type(&mut by_box, visitor).is_break()
}

/// Moves the value out of `slot` (an `&mut Option<X>`) into the visitor if
/// `X` is one of its declared types. Used by `variant_set!` expansions.
#[doc(hidden)]
pub fn visit_slot<V: Visitor>(visitor: &mut V, slot: &mut dyn Any) -> bool {
    V::Types::for_each_type(&mut BySlot { slot }, visitor).is_break()
}
