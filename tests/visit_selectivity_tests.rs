// The same visitor run against every container flavour
use sovran_hetero::{variant_set, AnyContainer, BucketContainer, VariantContainer, Visit, Visitor};

variant_set! {
    #[derive(Debug, Clone)]
    enum Mixed {
        Int(i32),
        Wide(i64),
        Text(String),
        Char(char),
    }
}

#[derive(Default)]
struct Counter {
    ints: usize,
    texts: usize,
}

// Declares i32 and String only
impl Visitor for Counter {
    type Types = (i32, String);
}

impl Visit<i32> for Counter {
    fn visit(&mut self, _: &i32) {
        self.ints += 1;
    }
}

impl Visit<String> for Counter {
    fn visit(&mut self, _: &String) {
        self.texts += 1;
    }
}

struct Nothing;

#[derive(Default)]
struct Twice {
    seen: usize,
}

// Same type listed twice
impl Visitor for Twice {
    type Types = (i32, i32);
}

impl Visit<i32> for Twice {
    fn visit(&mut self, _: &i32) {
        self.seen += 1;
    }
}

impl Visitor for Nothing {
    type Types = ();
}

#[test]
fn test_any_container_selectivity() {
    let mut container = AnyContainer::new();
    container.push_back(1i32);
    container.push_back(1i64);
    container.push_back(String::from("a"));
    container.push_back('c');
    container.push_back(2i32);

    let mut counter = Counter::default();
    container.visit(&mut counter);
    assert_eq!((counter.ints, counter.texts), (2, 1));

    let mut counter = Counter::default();
    container.visit_mut(&mut counter);
    assert_eq!((counter.ints, counter.texts), (2, 1));

    let mut counter = Counter::default();
    container.into_visit(&mut counter);
    assert_eq!((counter.ints, counter.texts), (2, 1));
}

#[test]
fn test_variant_container_selectivity() {
    let mut container = VariantContainer::<Mixed>::new();
    container.push_back(1i32);
    container.push_back(1i64);
    container.push_back(String::from("a"));
    container.push_back('c');
    container.push_back(2i32);

    let mut counter = Counter::default();
    container.visit(&mut counter);
    assert_eq!((counter.ints, counter.texts), (2, 1));

    let mut counter = Counter::default();
    container.visit_mut(&mut counter);
    assert_eq!((counter.ints, counter.texts), (2, 1));

    let mut counter = Counter::default();
    container.into_visit(&mut counter);
    assert_eq!((counter.ints, counter.texts), (2, 1));
}

#[test]
fn test_bucket_container_selectivity() {
    let mut container = BucketContainer::new();
    container.push_back(1i32);
    container.push_back(1i64);
    container.push_back(String::from("a"));
    container.push_back('c');
    container.push_back(2i32);

    let mut counter = Counter::default();
    container.visit(&mut counter);
    assert_eq!((counter.ints, counter.texts), (2, 1));

    let mut counter = Counter::default();
    container.visit_mut(&mut counter);
    assert_eq!((counter.ints, counter.texts), (2, 1));

    let mut counter = Counter::default();
    container.into_visit(&mut counter);
    assert_eq!((counter.ints, counter.texts), (2, 1));
}

#[test]
fn test_empty_capability_list_visits_nothing() {
    let mut any = AnyContainer::new();
    any.push_back(1i32);
    any.visit(&mut Nothing);

    let mut buckets = BucketContainer::new();
    buckets.push_back(1i32);
    buckets.visit(&mut Nothing);
    assert_eq!(buckets.len(), 1);
}

#[test]
fn test_repeated_declaration_visits_once() {
    let mut any = AnyContainer::new();
    any.push_back(1i32);
    let mut variant = VariantContainer::<Mixed>::new();
    variant.push_back(1i32);
    let mut buckets = BucketContainer::new();
    buckets.push_back(1i32);

    let mut twice = Twice::default();
    any.visit(&mut twice);
    assert_eq!(twice.seen, 1);

    let mut twice = Twice::default();
    variant.visit(&mut twice);
    assert_eq!(twice.seen, 1);

    let mut twice = Twice::default();
    buckets.visit(&mut twice);
    assert_eq!(twice.seen, 1);

    let mut twice = Twice::default();
    buckets.visit_mut(&mut twice);
    assert_eq!(twice.seen, 1);

    let mut twice = Twice::default();
    buckets.into_visit(&mut twice);
    assert_eq!(twice.seen, 1);
}
