/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::path::Path;

use clap::parser::ValueSource;
use clap::ArgMatches;
use log::{debug, info};
use pix_core::colorspace::ColorSpace;
use pix_image::codecs::ImageFormat;
use pix_image::errors::ImgErrors;
use pix_image::image::Image;
use pix_image::traits::OperationsTrait;
use pix_procs::bgr2rgb::Bgr2Rgb;
use pix_procs::flip::Flip;
use pix_procs::grayscale::Grayscale;
use pix_procs::histogram_equalize::HistogramEqualize;
use pix_procs::roll::Roll;
use pix_procs::rotate::Rotate;

use crate::cmd_args::FlipArg;
use crate::cmd_parsers;

/// Read the input, run the requested operations in command line
/// order and write the result in the format the output extension
/// names
pub(crate) fn process_file(args: &ArgMatches) -> Result<(), ImgErrors> {
    let in_file = args.get_one::<String>("in").unwrap();
    let out_file = args.get_one::<String>("out").unwrap();

    let options = cmd_parsers::decoder_options(args);

    info!("Reading {in_file}");
    let mut image = Image::open_with_options(in_file, options)?;

    for (_, operation) in collect_operations(args)? {
        debug!("Running {}", operation.name());
        operation.execute(&mut image)?;
    }

    let extension = Path::new(out_file).extension().ok_or_else(|| {
        ImgErrors::GenericString(format!("could not determine format from path {out_file:?}"))
    })?;
    let format = ImageFormat::encoder_for_extension(extension).ok_or_else(|| {
        ImgErrors::GenericString(format!("no encoder for file extension {extension:?}"))
    })?;

    match_sink_format(&mut image, format)?;

    let file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(out_file)?;
    let mut sink = BufWriter::new(file);

    let written = image.encode_with_options(format, cmd_parsers::encoder_options(args), &mut sink)?;

    info!("Wrote {written} bytes to {out_file}");

    Ok(())
}

/// Gather the operations present on the command line, keyed by the
/// position they were passed in so they run in that order
fn collect_operations(
    args: &ArgMatches
) -> Result<Vec<(usize, Box<dyn OperationsTrait>)>, ImgErrors> {
    let mut operations: Vec<(usize, Box<dyn OperationsTrait>)> = Vec::new();

    if let (Some(indices), Some(values)) =
        (args.indices_of("flip"), args.get_many::<FlipArg>("flip"))
    {
        for (index, direction) in indices.zip(values) {
            operations.push((index, Box::new(Flip::new((*direction).into()))));
        }
    }
    if let (Some(indices), Some(values)) =
        (args.indices_of("rotate"), args.get_many::<i64>("rotate"))
    {
        for (index, degrees) in indices.zip(values) {
            if degrees % 90 != 0 {
                return Err(ImgErrors::GenericString(format!(
                    "rotation must be a multiple of 90 degrees, found {degrees}"
                )));
            }
            operations.push((index, Box::new(Rotate::new((degrees / 90) as i32))));
        }
    }
    if let (Some(indices), Some(values)) = (args.indices_of("roll"), args.get_many::<i64>("roll")) {
        let indices: Vec<usize> = indices.collect();
        let values: Vec<i64> = values.copied().collect();

        for (index, shift) in indices.chunks(2).zip(values.chunks(2)) {
            operations.push((index[0], Box::new(Roll::new(shift[0], shift[1]))));
        }
    }
    if args.value_source("bgr2rgb") == Some(ValueSource::CommandLine) {
        let index = args.index_of("bgr2rgb").unwrap();
        operations.push((index, Box::new(Bgr2Rgb::new())));
    }
    if args.value_source("grayscale") == Some(ValueSource::CommandLine) {
        let index = args.index_of("grayscale").unwrap();
        operations.push((index, Box::new(Grayscale::new())));
    }
    if args.value_source("equalize") == Some(ValueSource::CommandLine) {
        let index = args.index_of("equalize").unwrap();
        operations.push((index, Box::new(HistogramEqualize::new())));
    }

    operations.sort_by_key(|(index, _)| *index);

    Ok(operations)
}

/// Convert the image to a pixel layout the sink format can encode
fn match_sink_format(image: &mut Image, format: ImageFormat) -> Result<(), ImgErrors> {
    // the bmp encoder writes three channel pixels only
    if format == ImageFormat::BMP && image.colorspace().has_alpha() {
        debug!("Stripping alpha channel for a bmp sink");
        strip_alpha(image)?;
    }
    // the png encoder takes red first pixels only, while bmp sources
    // decode blue first
    if format == ImageFormat::PNG
        && matches!(image.colorspace(), ColorSpace::BGR | ColorSpace::BGRA)
    {
        debug!("Reordering channels to red first for a png sink");
        Bgr2Rgb::new().execute(image)?;
    }
    Ok(())
}

/// Drop the alpha channel of an image in place
fn strip_alpha(image: &mut Image) -> Result<(), ImgErrors> {
    let colorspace = image.colorspace();

    let Some(alpha_position) = colorspace.alpha_position() else {
        return Ok(());
    };
    let components = colorspace.num_components();
    let (width, height) = image.dimensions();

    let mut out = Vec::with_capacity(width * height * (components - 1));

    for pixel in image.data().chunks_exact(components) {
        for (position, value) in pixel.iter().enumerate() {
            if position != alpha_position {
                out.push(*value);
            }
        }
    }
    let out_colorspace = match colorspace {
        ColorSpace::RGBA => ColorSpace::RGB,
        ColorSpace::BGRA => ColorSpace::BGR,
        ColorSpace::LumaA => ColorSpace::Luma,
        other => other
    };

    image.set_data(out, width, height, out_colorspace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd_args::create_cmd_args;

    #[test]
    fn operations_run_in_command_line_order() {
        let matches = create_cmd_args()
            .try_get_matches_from([
                "pix", "-i", "a.bmp", "-o", "b.png", "--grayscale", "--flip", "vertical",
                "--rotate", "180",
            ])
            .unwrap();

        let operations = collect_operations(&matches).unwrap();
        let names: Vec<&str> = operations.iter().map(|(_, op)| op.name()).collect();

        assert_eq!(names, vec!["grayscale", "flip", "rotate"]);
    }

    #[test]
    fn rotation_must_be_a_right_angle() {
        let matches = create_cmd_args()
            .try_get_matches_from(["pix", "-i", "a.bmp", "-o", "b.png", "--rotate", "45"])
            .unwrap();

        assert!(collect_operations(&matches).is_err());
    }

    #[test]
    fn bmp_sources_can_feed_a_png_sink() {
        use pix_core::bytestream::MemCursor;
        use pix_core::options::DecoderOptions;

        let pixels = vec![10, 20, 30, 40, 50, 60];
        let image = Image::from_u8(&pixels, 2, 1, ColorSpace::BGR).unwrap();
        let bmp = image.write_to_vec(ImageFormat::BMP).unwrap();

        let mut decoded = Image::read(MemCursor::new(&bmp), DecoderOptions::default()).unwrap();
        assert_eq!(decoded.colorspace(), ColorSpace::BGR);

        match_sink_format(&mut decoded, ImageFormat::PNG).unwrap();
        assert_eq!(decoded.colorspace(), ColorSpace::RGB);

        let png = decoded.write_to_vec(ImageFormat::PNG).unwrap();
        let reread = Image::read(MemCursor::new(&png), DecoderOptions::default()).unwrap();
        assert_eq!(reread.colorspace(), ColorSpace::RGB);
        assert_eq!(reread.data(), &[30, 20, 10, 60, 50, 40]);
    }

    #[test]
    fn strip_alpha_drops_the_alpha_channel() {
        let pixels = vec![1, 2, 3, 255, 4, 5, 6, 128];
        let mut image = Image::from_u8(&pixels, 2, 1, ColorSpace::RGBA).unwrap();

        strip_alpha(&mut image).unwrap();

        assert_eq!(image.data(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(image.colorspace(), ColorSpace::RGB);
    }
}
