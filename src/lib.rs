//! # sovran-hetero
//!
//! Heterogeneous containers with typed views and capability-bounded visitors.
//!
//! `sovran-hetero` stores values of several different types in one logical
//! collection while keeping retrieval type-safe. Three storage strategies are
//! provided, and all of them share the same operations: insert, remove by
//! type, remove by position, iterate a type-filtered view and visit every
//! element through a [`Visitor`].
//!
//! ## Key Features
//!
//! - **Open set**: [`AnyContainer`] accepts any cloneable type without naming
//!   it in advance; each element carries a runtime type tag
//! - **Closed set**: [`VariantContainer`] only accepts the alternatives of an
//!   enum declared with [`variant_set!`]; anything else fails to compile
//! - **Grouped by type**: [`BucketContainer`] keeps one owned bucket per type,
//!   so typed views are plain slices
//! - **Capability-bounded visitors**: a visitor declares the types it handles
//!   once; elements of other types are skipped
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use sovran_hetero::{AnyContainer, Visit, Visitor};
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
//!
//! let mut container = AnyContainer::new();
//! container.push_back(42i32);
//! container.push_back(4.5f64);
//! container.emplace_back::<String, _>("Hello world");
//!
//! // Only the integers
//! let ints: Vec<&i32> = container.common_elements::<i32>().collect();
//! assert_eq!(ints, vec![&42]);
//!
//! // Everything the printer knows about, in insertion order
//! let mut printer = Printer::default();
//! container.visit(&mut printer);
//! assert_eq!(printer.lines, vec!["42", "4.5", "Hello world"]);
//! ```
//!
//! ### Closed Sets
//!
//! ```rust
//! use sovran_hetero::{variant_set, VariantContainer, Visit, Visitor};
//!
//! variant_set! {
//!     #[derive(Debug, Clone)]
//!     pub enum Shape {
//!         Circle(f64),
//!         Square(u32),
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Area(f64);
//!
//! impl Visitor for Area {
//!     type Types = (f64, u32);
//! }
//!
//! impl Visit<f64> for Area {
//!     fn visit(&mut self, radius: &f64) {
//!         self.0 += 3.0 * radius * radius;
//!     }
//! }
//!
//! impl Visit<u32> for Area {
//!     fn visit(&mut self, side: &u32) {
//!         self.0 += f64::from(side * side);
//!     }
//! }
//!
//! let mut shapes = VariantContainer::<Shape>::new();
//! shapes.push_back(1.0f64);
//! shapes.push_back(2u32);
//!
//! let mut area = Area::default();
//! shapes.visit(&mut area);
//! assert_eq!(area.0, 7.0);
//! ```
//!
//! ### Embedding a Container
//!
//! Containers are ordinary values: cloning or dropping the struct that holds
//! one clones or drops its elements too.
//!
//! ```rust
//! use sovran_hetero::BucketContainer;
//!
//! #[derive(Clone, Default)]
//! struct Widget {
//!     extras: BucketContainer,
//! }
//!
//! let mut original = Widget::default();
//! original.extras.push_back(1i32);
//! original.extras.push_back(String::from("label"));
//!
//! let mut copy = original.clone();
//! copy.extras.erase::<i32>();
//!
//! assert_eq!(original.extras.count::<i32>(), 1);
//! assert_eq!(copy.extras.count::<i32>(), 0);
//! assert_eq!(copy.extras.len(), 1);
//! ```
//!
//! ### Error Handling
//!
//! The containers check type tags before casting, so their own operations
//! never fail on types. Forcing a cast on an erased value does:
//!
//! ```rust
//! use sovran_hetero::{AnyContainer, ContainerError};
//!
//! let mut container = AnyContainer::new();
//! container.push_back(String::from("text"));
//!
//! let first = container.get(0).unwrap();
//! match first.downcast_ref::<i32>() {
//!     Ok(value) => println!("Value: {}", value),
//!     Err(ContainerError::TypeMismatch { expected, found }) => {
//!         println!("wanted {}, stored {}", expected, found)
//!     }
//!     Err(e) => println!("Other error: {}", e),
//! }
//!
//! assert!(matches!(
//!     container.try_erase_at(5usize),
//!     Err(ContainerError::OutOfBounds { index: 5, len: 1 })
//! ));
//! ```
//!
//! ## Logging
//!
//! Bookkeeping that is otherwise invisible (bucket registration, erase by
//! type, clearing and copying buckets) emits `tracing` events at the `trace`
//! level. No subscriber is installed by the library.

mod any_container;
mod any_value;
mod bucket;
mod error;
mod position;
mod variant;
mod visitor;

pub use any_container::{AnyContainer, CommonElements};
pub use any_value::AnyValue;
pub use bucket::BucketContainer;
pub use error::ContainerError;
pub use position::{BasePosition, BucketPosition, Position, TypedPosition};
pub use variant::{Member, VariantContainer, VariantSet};
pub use visitor::{TypeFn, TypeList, Visit, Visitor};

#[doc(hidden)]
pub mod __private {
    pub use crate::visitor::visit_slot;
}
