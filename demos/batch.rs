extern crate tabulated_spline;

use tabulated_spline::{InterpolatedFunction, LoadOptions, OrderingPolicy};

fn main() {
    env_logger::init();

    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/spectrum.dat");
    let options = LoadOptions::default().with_ordering(OrderingPolicy::Sort);
    let function = InterpolatedFunction::from_file_with(path, &options).unwrap();

    let x_min = -0.5;
    let x_max = 2.5;
    let number_of_steps = 60;
    let step = (x_max - x_min) / number_of_steps as f64;

    let mut x_vector = Vec::new();

    for i in 0..=number_of_steps {
        x_vector.push(x_min + step * i as f64);
    }

    let result = function.batch_evaluate(&x_vector);

    println!("x;y");
    for i in 0..=number_of_steps {
        println!("{:.2};{:.2}", x_vector[i], result[i]);
    }
}
