use sovran_hetero::{BucketContainer, Visit, Visitor};
use std::fmt::Display;
use tracing_subscriber::EnvFilter;

struct Printer;

impl Visitor for Printer {
    type Types = (i32, f64, String);
}

impl<T: Display> Visit<T> for Printer {
    fn visit(&mut self, value: &T) {
        println!("  {}", value);
    }
}

/// Reusable part: owns a bag of additional data and knows how to report it.
#[derive(Clone, Default)]
struct Base {
    additional_data: BucketContainer,
}

impl Base {
    fn foo(&self) {
        self.additional_data.visit(&mut Printer);
    }
}

/// Builds on `Base` and fills the additional data up front.
#[derive(Clone)]
struct Derived {
    base: Base,
}

impl Derived {
    fn new() -> Self {
        let mut base = Base::default();
        base.additional_data.push_back(42i32);
        base.additional_data.emplace_back::<String, _>("Hello world");
        Self { base }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let derived = Derived::new();
    println!("derived:");
    derived.base.foo();

    // The copy owns its own buckets
    let mut copy = derived.clone();
    copy.base.additional_data.erase::<i32>();
    copy.base.additional_data.push_back(1.5f64);

    println!("copy after edits:");
    copy.base.foo();
    println!("derived is unchanged:");
    derived.base.foo();

    copy.base.additional_data.clear();
    println!("copy after clear holds {} values", copy.base.additional_data.len());
}
