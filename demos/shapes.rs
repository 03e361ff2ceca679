use sovran_hetero::{variant_set, VariantContainer, Visit, Visitor};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct Circle {
    radius: f64,
}

#[derive(Debug, Clone)]
struct Rect {
    width: f64,
    height: f64,
}

variant_set! {
    #[derive(Debug, Clone)]
    enum Shape {
        Circle(Circle),
        Rect(Rect),
        Label(String),
    }
}

#[derive(Default)]
struct TotalArea(f64);

impl Visitor for TotalArea {
    type Types = (Circle, Rect);
}

impl Visit<Circle> for TotalArea {
    fn visit(&mut self, circle: &Circle) {
        self.0 += std::f64::consts::PI * circle.radius * circle.radius;
    }
}

impl Visit<Rect> for TotalArea {
    fn visit(&mut self, rect: &Rect) {
        self.0 += rect.width * rect.height;
    }
}

struct Grow(f64);

impl Visitor for Grow {
    type Types = (Circle, Rect);
}

impl Visit<Circle> for Grow {
    fn visit(&mut self, _: &Circle) {}

    fn visit_mut(&mut self, circle: &mut Circle) {
        circle.radius *= self.0;
    }
}

impl Visit<Rect> for Grow {
    fn visit(&mut self, _: &Rect) {}

    fn visit_mut(&mut self, rect: &mut Rect) {
        rect.width *= self.0;
        rect.height *= self.0;
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut shapes = VariantContainer::<Shape>::new();
    shapes.push_back(Circle { radius: 1.0 });
    shapes.push_back(Rect {
        width: 2.0,
        height: 3.0,
    });
    shapes.emplace_back::<String, _>("not a shape");
    shapes.push_back(Circle { radius: 0.5 });

    let mut area = TotalArea::default();
    shapes.visit(&mut area);
    println!("total area: {:.3}", area.0);

    shapes.visit_mut(&mut Grow(2.0));
    let mut area = TotalArea::default();
    shapes.visit(&mut area);
    println!("total area after growing: {:.3}", area.0);

    println!("circles: {:?}", shapes.common_elements::<Circle>().collect::<Vec<_>>());
    let removed = shapes.erase::<String>();
    println!("removed {} labels, {} shapes left", removed, shapes.len());
}
