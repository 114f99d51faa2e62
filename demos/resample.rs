extern crate tabulated_spline;

use std::{
    env,
    error::Error,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use tabulated_spline::abort;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let file_name = env::args()
        .nth(1)
        .unwrap_or_else(|| "Xpol_src_ls_flux-wl.dat".to_string());

    let function = abort::from_file_or_exit(&file_name);

    let out_name = match Path::new(&file_name).file_name() {
        Some(name) => format!("reint-{}", name.to_string_lossy()),
        None => format!("reint-{}", file_name),
    };
    let mut out = BufWriter::new(File::create(&out_name)?);
    for (x, y) in function.resample(300) {
        writeln!(out, "{} {}", x, y)?;
    }
    out.flush()?;

    println!("wrote {}", out_name);
    Ok(())
}
