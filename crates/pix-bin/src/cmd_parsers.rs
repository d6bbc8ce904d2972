/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use clap::ArgMatches;
use log::{info, Level};
use pix_core::options::{DecoderOptions, EncoderOptions};

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level = match options.get_count("verbose") {
        0 => Level::Warn,
        1 => Level::Info,
        _ => Level::Trace
    };

    simple_logger::init_with_level(log_level).unwrap();

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}

pub fn decoder_options(options: &ArgMatches) -> DecoderOptions {
    let max_width = *options.get_one::<usize>("max-width").unwrap();
    let max_height = *options.get_one::<usize>("max-height").unwrap();
    let strict_mode = *options.get_one::<bool>("strict").unwrap();
    let confirm_crc = !*options.get_one::<bool>("no-crc").unwrap();

    DecoderOptions::default()
        .set_max_width(max_width)
        .set_max_height(max_height)
        .set_strict_mode(strict_mode)
        .png_set_confirm_crc(confirm_crc)
}

pub fn encoder_options(options: &ArgMatches) -> EncoderOptions {
    let quality = *options.get_one::<u8>("quality").unwrap();

    EncoderOptions::default().set_quality(quality)
}
