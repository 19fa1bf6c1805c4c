use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use env_logger;
use image::{ImageReader, Rgb};
use imageproc::drawing;
use log::info;

use spot_detect::denoise::reduce_noise;
use spot_detect::detect::find_spots;
use spot_detect::edges::extract_edges;
use spot_detect::luma::convert_to_luma;

/// Counts ring-shaped spot markings (e.g. on an animal's coat) in a
/// photograph. Can also stop after any intermediate pipeline stage and save
/// that stage's image instead.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about=None)]
struct Args {
    /// Path of the image file to process.
    #[arg(short, long)]
    input: String,

    /// Directory where output file(s) are written.
    #[arg(short, long)]
    output: String,

    /// Pipeline stage to run through.
    #[arg(short, long, value_enum, default_value_t = Mode::Spots)]
    mode: Mode,

    /// Edge extraction threshold, in intensity units. Must be in [0, 255].
    #[arg(short, long, default_value_t = 10.0)]
    epsilon: f64,

    /// Smallest spot radius to search for.
    #[arg(short, long, default_value_t = 4)]
    lower: u32,

    /// Largest spot radius to search for. Only radii 4-11 have tuned
    /// templates; others match nothing.
    #[arg(short, long, default_value_t = 11)]
    upper: u32,

    /// Also write a copy of the input with detected spots circled.
    #[arg(short, long, default_value_t = false)]
    annotate: std::primitive::bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Luma conversion only.
    Greyscale,
    /// Luma conversion plus noise reduction.
    Denoise,
    /// Everything up to the binary edge map.
    Edges,
    /// The full pipeline; prints the spot count.
    Spots,
}

// Output file suffixes follow the pipeline stage names.
fn suffix_for_mode(mode: Mode) -> &'static str {
    match mode {
        Mode::Greyscale => "_GS",
        Mode::Denoise => "_NR",
        Mode::Edges => "_ED",
        Mode::Spots => "_SD",
    }
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    assert!(args.epsilon >= 0.0 && args.epsilon <= 255.0,
            "Epsilon {} must be in [0, 255]", args.epsilon);
    assert!(args.lower <= args.upper,
            "Lower radius limit {} exceeds upper limit {}",
            args.lower, args.upper);

    let input_path = PathBuf::from(&args.input);
    let img = ImageReader::open(&input_path).unwrap_or_else(|e| {
        panic!("Cannot open input file '{}': {:?}", args.input, e);
    }).decode().unwrap_or_else(|e| {
        panic!("Cannot decode input file '{}': {:?}", args.input, e);
    });
    let mut image = img.to_rgb8();
    let original = image.clone();
    let (width, height) = image.dimensions();
    info!("Processing {} ({}x{})", args.input, width, height);

    let stem = input_path.file_stem().unwrap().to_str().unwrap();
    let mut output_path = PathBuf::from(&args.output);
    output_path.push(format!("{}{}.png", stem, suffix_for_mode(args.mode)));

    let pipeline_start = Instant::now();
    convert_to_luma(&mut image);
    let result = match args.mode {
        Mode::Greyscale => image,
        Mode::Denoise => reduce_noise(&image),
        Mode::Edges => extract_edges(&reduce_noise(&image), args.epsilon),
        Mode::Spots => {
            let mut edges = extract_edges(&reduce_noise(&image), args.epsilon);
            let (spots, detections) =
                find_spots(&mut edges, args.lower, args.upper);
            info!("Found {} spots with epsilon {} and radii {}-{} in {:?}",
                  detections.len(), args.epsilon, args.lower, args.upper,
                  pipeline_start.elapsed());
            println!("{}", detections.len());
            if args.annotate {
                // Scribble circles into the input showing where the spots
                // were found.
                let mut annotated = original;
                for spot in &detections {
                    drawing::draw_hollow_circle_mut(
                        &mut annotated,
                        (spot.centre_x as i32, spot.centre_y as i32),
                        spot.radius as i32,
                        Rgb::<u8>([255, 0, 0]));
                }
                let mut annotated_path = PathBuf::from(&args.output);
                annotated_path.push(format!("{}_annotated.png", stem));
                annotated.save(&annotated_path).unwrap_or_else(|e| {
                    panic!("Cannot save output file {:?}: {:?}",
                           annotated_path, e);
                });
                info!("Wrote {:?}", annotated_path);
            }
            spots
        },
    };
    result.save(&output_path).unwrap_or_else(|e| {
        panic!("Cannot save output file {:?}: {:?}", output_path, e);
    });
    info!("Wrote {:?}", output_path);
}
