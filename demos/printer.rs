use sovran_hetero::{AnyContainer, BucketContainer, Visit, Visitor};
use std::fmt::Display;
use tracing_subscriber::EnvFilter;

// Prints every integer, float and string it is handed
struct Printer;

impl Visitor for Printer {
    type Types = (i32, f64, String);
}

impl<T: Display> Visit<T> for Printer {
    fn visit(&mut self, value: &T) {
        println!("{}", value);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Open set: insertion order is kept across types
    let mut container = AnyContainer::new();
    container.push_back(42i32);
    container.push_back(4.5f64);
    container.emplace_back::<String, _>("Hello world");
    container.push_back('?'); // Printer doesn't declare char, so it is skipped

    println!("AnyContainer:");
    container.visit(&mut Printer);

    println!("Integers only: {:?}", container.common_elements::<i32>().collect::<Vec<_>>());

    // Buckets: the printer's declared order wins over insertion order
    let mut buckets = BucketContainer::new();
    buckets.emplace_back::<String, _>("Hello world");
    buckets.push_back(4.5f64);
    buckets.push_back(42i32);

    println!("BucketContainer:");
    buckets.visit(&mut Printer);

    // Destructive visit hands the values over
    println!("Draining:");
    container.into_visit(&mut Printer);
}
