use sovran_hetero::{BucketContainer, BucketPosition, ContainerError, Visit, Visitor};
use std::fmt::Display;
use std::rc::Rc;

#[derive(Default)]
struct Printer {
    lines: Vec<String>,
}

impl Visitor for Printer {
    type Types = (i32, f64, String);
}

impl<T: Display> Visit<T> for Printer {
    fn visit(&mut self, value: &T) {
        self.lines.push(value.to_string());
    }
}

#[derive(Default)]
struct Strings(Vec<String>);

impl Visitor for Strings {
    type Types = (String,);
}

impl Visit<String> for Strings {
    fn visit(&mut self, value: &String) {
        self.0.push(value.clone());
    }
}

#[test]
fn test_erase_then_visit_remaining_type() {
    let mut container = BucketContainer::new();
    container.push_back(42i32);
    container.emplace_back::<String, _>("Hello world");

    assert_eq!(container.erase::<i32>(), 1);

    let mut strings = Strings::default();
    container.visit(&mut strings);
    assert_eq!(strings.0, vec!["Hello world"]);
    assert_eq!(container.len(), 1);
}

#[test]
fn test_visit_follows_declared_type_order() {
    let mut container = BucketContainer::new();
    container.emplace_back::<String, _>("first");
    container.push_back(2.5f64);
    container.push_back(1i32);
    container.emplace_back::<String, _>("last");
    container.push_back(2i32);

    let mut printer = Printer::default();
    container.visit(&mut printer);
    assert_eq!(printer.lines, vec!["1", "2", "2.5", "first", "last"]);
}

#[test]
fn test_copy_independence() {
    let mut a = BucketContainer::new();
    a.push_back(1i32);
    a.push_back(2i32);
    a.emplace_back::<String, _>("shared");

    let mut b = a.clone();
    assert_eq!(b.erase::<i32>(), 2);

    // A keeps its integers
    assert_eq!(a.common_elements::<i32>().copied().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(a.len(), 3);
    assert_eq!(b.len(), 1);

    // And the other way around
    a.common_elements_mut::<String>().for_each(|s| s.push_str(" by a"));
    assert_eq!(b.bucket::<String>(), Some(&["shared".to_string()][..]));
    assert_eq!(a.bucket::<String>(), Some(&["shared by a".to_string()][..]));
}

#[test]
fn test_assignment_replaces_contents() {
    let mut source = BucketContainer::new();
    source.push_back(9u8);

    let mut target = BucketContainer::new();
    target.push_back(1i32);
    target.push_back(2i32);

    target.clone_from(&source);
    assert_eq!(target.len(), 1);
    assert_eq!(target.count::<i32>(), 0);
    assert_eq!(target.count::<u8>(), 1);

    // Source is still its own
    source.push_back(10u8);
    assert_eq!(target.count::<u8>(), 1);
}

#[test]
fn test_clear_twice() {
    let mut container = BucketContainer::new();
    container.push_back(1i32);
    container.push_back('c');

    container.clear();
    assert_eq!(container.len(), 0);
    assert_eq!(container.type_count(), 0);

    container.clear();
    assert_eq!(container.len(), 0);
    assert!(container.is_empty());
}

#[test]
fn test_erase_at_uses_bucket_positions() -> Result<(), ContainerError> {
    let mut container = BucketContainer::new();
    container.push_back(String::from("a"));
    container.push_back(10i32);
    container.push_back(String::from("b"));
    container.push_back(20i32);

    let (position, _) = container
        .common_entries::<i32>()
        .find(|(_, value)| **value == 20)
        .unwrap();
    assert_eq!(position, BucketPosition::new(1));

    assert_eq!(container.erase_at(position), 20);
    assert_eq!(container.len(), 3);

    let (position, _) = container.common_entries::<String>().next().unwrap();
    assert_eq!(container.try_erase_at(position)?, "a");
    assert_eq!(container.common_elements::<String>().collect::<Vec<_>>(), vec!["b"]);
    Ok(())
}

#[test]
fn test_unused_type_views_are_empty() {
    let container = BucketContainer::new();
    assert_eq!(container.common_elements::<i32>().count(), 0);
    assert_eq!(container.bucket::<i32>(), None);
    assert!(!container.contains::<i32>());
    assert_eq!(container.count::<i32>(), 0);
}

#[test]
fn test_reregistration_after_erase() {
    let mut container = BucketContainer::new();
    container.push_back(1i32);
    container.push_back(1.0f64);
    container.erase::<i32>();
    container.push_back(2i32);

    assert_eq!(container.type_names(), vec!["f64", "i32"]);
    assert_eq!(container.len(), 2);
}

#[test]
fn test_reserve_registers_bucket() {
    let mut container = BucketContainer::new();
    container.reserve::<u64>(16);
    assert_eq!(container.type_count(), 1);
    assert!(container.is_empty());
    assert_eq!(container.bucket::<u64>(), Some(&[][..]));
}

#[test]
fn test_moving_container_keeps_buckets() {
    let mut container = BucketContainer::new();
    container.push_back(5i32);

    let mut boxed = Box::new(container);
    boxed.push_back(6i32);
    let containers = vec![*boxed];

    assert_eq!(
        containers[0].common_elements::<i32>().copied().collect::<Vec<_>>(),
        vec![5, 6]
    );
}

#[test]
fn test_into_visit_consumes_declared_buckets() {
    let mut container = BucketContainer::new();
    container.emplace_back::<String, _>("x");
    container.push_back(3i32);

    let mut strings = Strings::default();
    container.into_visit(&mut strings);
    assert_eq!(strings.0, vec!["x"]);
}

#[test]
fn test_drop_releases_only_own_buckets() {
    let shared = Rc::new(5u32);

    let mut container = BucketContainer::new();
    container.push_back(Rc::clone(&shared));
    let copy = container.clone();
    assert_eq!(Rc::strong_count(&shared), 3);

    drop(container);
    assert_eq!(Rc::strong_count(&shared), 2);
    assert_eq!(copy.count::<Rc<u32>>(), 1);

    drop(copy);
    assert_eq!(Rc::strong_count(&shared), 1);
}
