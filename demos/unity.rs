extern crate tabulated_spline;

use tabulated_spline::InterpolatedFunction;

fn main() {
    env_logger::init();

    let x_min = 300.0;
    let x_max = 900.0;
    let mut function = InterpolatedFunction::unity(x_min, x_max);

    println!("x;y");
    for x in [0.0, x_min, 600.0, x_max, 1.0e4] {
        println!("{:.2};{:.2}", x, function.cached_evaluate(x));
    }
}
