use clap::*;

use std::fs::File;
use std::io::{stderr, Write};
use std::process::exit;

use vectoxy::extract_and_normalize;

fn main() {
    env_logger::init();

    let matches = App::new("Vectoxy command-line interface")
        .version("0.1")
        .about("Converts SVG documents into flat coordinate sequences")
        .arg(
            Arg::with_name("INPUT")
                .help("Sets the input SVG file to use")
                .value_name("FILE")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("SAMPLES")
                .short("s")
                .long("samples")
                .help("Sets the number of points approximating each curved segment (5 by default)")
                .value_name("SAMPLES")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("X_OUTPUT")
                .short("x")
                .long("x-output")
                .help("Sets the output file for the x coordinates (coordinates_x.txt by default)")
                .value_name("FILE")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("Y_OUTPUT")
                .short("y")
                .long("y-output")
                .help("Sets the output file for the y coordinates (coordinates_y.txt by default)")
                .value_name("FILE")
                .takes_value(true),
        )
        .get_matches();

    let input_file = matches.value_of("INPUT").unwrap();
    let svg_text = match std::fs::read_to_string(input_file) {
        Ok(text) => text,
        Err(err) => {
            let _ = writeln!(&mut stderr(), "Cannot open file {}: {}", input_file, err);
            exit(1);
        }
    };

    let samples = match matches.value_of("SAMPLES").map(str::parse::<u32>) {
        None => 5,
        Some(Ok(samples)) => samples,
        Some(Err(_)) => {
            let _ = writeln!(&mut stderr(), "Invalid sample count");
            exit(1);
        }
    };

    let coordinates = match extract_and_normalize(&svg_text, samples) {
        Ok(coordinates) => coordinates,
        Err(err) => {
            let _ = writeln!(&mut stderr(), "{}", err);
            exit(1);
        }
    };

    let x_output = matches.value_of("X_OUTPUT").unwrap_or("coordinates_x.txt");
    let y_output = matches.value_of("Y_OUTPUT").unwrap_or("coordinates_y.txt");

    let written = write_axis(x_output, &coordinates.xs).and_then(|_| write_axis(y_output, &coordinates.ys));
    if let Err(err) = written {
        let _ = writeln!(&mut stderr(), "Cannot write output: {}", err);
        exit(1);
    }
}

// One number per line, preserving array order.
fn write_axis(file_name: &str, values: &[f64]) -> std::io::Result<()> {
    let mut file = File::create(file_name)?;
    for value in values {
        writeln!(file, "{}", value)?;
    }
    Ok(())
}
