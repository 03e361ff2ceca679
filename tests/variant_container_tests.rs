use sovran_hetero::{
    variant_set, ContainerError, Member, TypedPosition, VariantContainer, VariantSet, Visit,
    Visitor,
};
use std::any::TypeId;
use std::fmt::Display;

variant_set! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum Scalar {
        Int(i32),
        Float(f64),
        Text(String),
        Flag(bool),
    }
}

#[derive(Default)]
struct Printer {
    lines: Vec<String>,
}

// Deliberately leaves out `bool`
impl Visitor for Printer {
    type Types = (i32, f64, String);
}

impl<T: Display> Visit<T> for Printer {
    fn visit(&mut self, value: &T) {
        self.lines.push(value.to_string());
    }
}

#[derive(Default)]
struct Taker {
    texts: Vec<String>,
}

impl Visitor for Taker {
    type Types = (String,);
}

impl Visit<String> for Taker {
    fn visit(&mut self, value: &String) {
        self.texts.push(format!("borrowed {}", value));
    }

    fn visit_mut(&mut self, value: &mut String) {
        *value = value.to_uppercase();
    }

    fn visit_owned(&mut self, value: String) {
        self.texts.push(value);
    }
}

fn sample() -> VariantContainer<Scalar> {
    let mut container = VariantContainer::<Scalar>::new();
    container.push_back(42i32);
    container.push_back(4.5f64);
    container.emplace_back::<String, _>("Hello world");
    container.push_back(true);
    container
}

#[test]
fn test_hello_world_scenario() {
    let container = sample();

    assert_eq!(container.common_elements::<i32>().collect::<Vec<_>>(), vec![&42]);

    let mut printer = Printer::default();
    container.visit(&mut printer);
    assert_eq!(printer.lines, vec!["42", "4.5", "Hello world"]);
}

#[test]
fn test_insertion_order_and_isolation() {
    let mut container = VariantContainer::<Scalar>::with_capacity(8);
    container.push_back(1i32);
    container.push_back(false);
    container.push_back(2i32);
    container.push(Scalar::Int(3));

    assert_eq!(
        container.common_elements::<i32>().copied().collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(container.common_elements::<f64>().count(), 0);
    assert_eq!(container.count::<bool>(), 1);
}

#[test]
fn test_erase_by_type() {
    let mut container = sample();
    container.push_back(7i32);

    assert_eq!(container.erase::<i32>(), 2);
    assert_eq!(container.common_elements::<i32>().count(), 0);
    assert_eq!(
        container.as_slice(),
        &[
            Scalar::Float(4.5),
            Scalar::Text("Hello world".to_string()),
            Scalar::Flag(true)
        ]
    );
}

#[test]
fn test_erase_at_through_filtered_view() -> Result<(), ContainerError> {
    let mut container = sample();

    let (position, text) = container.common_entries::<String>().next().unwrap();
    assert_eq!(text, "Hello world");
    assert_eq!(position, TypedPosition::new(2));

    let removed = container.erase_at(position);
    assert_eq!(
        <Scalar as Member<String>>::into_member(removed),
        Ok("Hello world".to_string())
    );

    let removed = container.try_erase_at(0usize)?;
    assert_eq!(removed, Scalar::Int(42));

    assert_eq!(
        container.try_erase_at(10usize),
        Err(ContainerError::OutOfBounds { index: 10, len: 2 })
    );
    Ok(())
}

#[test]
fn test_member_access() {
    let mut value = <Scalar as Member<i32>>::wrap(5);
    assert!(<Scalar as Member<i32>>::holds(&value));
    assert!(!<Scalar as Member<bool>>::holds(&value));

    if let Some(inner) = <Scalar as Member<i32>>::get_mut(&mut value) {
        *inner += 1;
    }
    assert_eq!(<Scalar as Member<i32>>::get(&value), Some(&6));
    assert_eq!(value.held_type_id(), TypeId::of::<i32>());
    assert_eq!(value.held_type_name(), "i32");

    let value = <Scalar as Member<f64>>::into_member(value).unwrap_err();
    assert_eq!(value, Scalar::Int(6));
}

#[test]
fn test_visit_conventions() {
    let mut container = sample();
    container.emplace_back::<String, _>("again");

    container.visit_mut(&mut Taker::default());
    let mut taker = Taker::default();
    container.visit(&mut taker);
    assert_eq!(taker.texts, vec!["borrowed HELLO WORLD", "borrowed AGAIN"]);

    let mut taker = Taker::default();
    container.into_visit(&mut taker);
    assert_eq!(taker.texts, vec!["HELLO WORLD", "AGAIN"]);
}

#[test]
fn test_clear_is_idempotent() {
    let mut container = sample();
    container.clear();
    assert_eq!(container.len(), 0);
    container.clear();
    assert_eq!(container.len(), 0);
    assert!(container.is_empty());
}

#[test]
fn test_clone_is_independent() {
    let original = sample();
    let mut copy = original.clone();
    copy.erase::<bool>();

    assert_eq!(original.len(), 4);
    assert_eq!(copy.len(), 3);
    assert_eq!(original.get(3), Some(&Scalar::Flag(true)));
}

#[test]
fn test_iteration_and_collect() {
    let container: VariantContainer<Scalar> =
        vec![Scalar::Flag(true), Scalar::Int(1)].into_iter().collect();

    let names: Vec<&str> = container.iter().map(VariantSet::held_type_name).collect();
    assert_eq!(names, vec!["bool", "i32"]);

    let owned: Vec<Scalar> = container.into_iter().collect();
    assert_eq!(owned.len(), 2);
}
