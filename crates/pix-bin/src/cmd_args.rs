/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use clap::builder::PossibleValue;
use clap::{value_parser, Arg, ArgAction, Command, ValueEnum};

use pix_procs::flip::FlipDirection;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum FlipArg {
    Horizontal,
    Vertical
}

impl ValueEnum for FlipArg {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Horizontal, Self::Vertical]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::Horizontal => PossibleValue::new("horizontal"),
            Self::Vertical => PossibleValue::new("vertical")
        })
    }
}

impl From<FlipArg> for FlipDirection {
    fn from(arg: FlipArg) -> Self {
        match arg {
            FlipArg::Horizontal => FlipDirection::Horizontal,
            FlipArg::Vertical => FlipDirection::Vertical
        }
    }
}

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("pix")
        .about("Read, transform and write images")
        .arg(Arg::new("in")
            .short('i')
            .long("input")
            .help("Input file to read data from")
            .required(true))
        .arg(Arg::new("out")
            .short('o')
            .long("output")
            .help("Output file to write the data to")
            .required(true))
        .arg(Arg::new("verbose")
            .short('v')
            .action(ArgAction::Count)
            .help_heading("LOGGING")
            .help("Be verbose, repeat for more detail"))
        .arg(Arg::new("max-width")
            .long("max-width")
            .help_heading("DECODING")
            .value_parser(value_parser!(usize))
            .default_value("16384")
            .help("Maximum width the decoders accept"))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help_heading("DECODING")
            .value_parser(value_parser!(usize))
            .default_value("16384")
            .help("Maximum height the decoders accept"))
        .arg(Arg::new("strict")
            .long("strict")
            .help_heading("DECODING")
            .action(ArgAction::SetTrue)
            .help("Use strict mode when decoding"))
        .arg(Arg::new("no-crc")
            .long("no-crc")
            .help_heading("DECODING")
            .action(ArgAction::SetTrue)
            .help("Skip png CRC verification"))
        .arg(Arg::new("quality")
            .long("quality")
            .help_heading("ENCODING")
            .value_parser(value_parser!(u8))
            .default_value("80")
            .help("Encoding quality for lossy formats"))
        .arg(Arg::new("flip")
            .long("flip")
            .help_heading("OPERATIONS")
            .value_parser(value_parser!(FlipArg))
            .action(ArgAction::Append)
            .help("Flip the image horizontally or vertically"))
        .arg(Arg::new("rotate")
            .long("rotate")
            .help_heading("OPERATIONS")
            .value_parser(value_parser!(i64))
            .allow_negative_numbers(true)
            .action(ArgAction::Append)
            .help("Rotate the image clockwise, degrees must be a multiple of 90"))
        .arg(Arg::new("roll")
            .long("roll")
            .help_heading("OPERATIONS")
            .value_parser(value_parser!(i64))
            .allow_negative_numbers(true)
            .num_args(2)
            .value_names(["ROWS", "COLUMNS"])
            .action(ArgAction::Append)
            .help("Shift the image down and right with wrap around"))
        .arg(Arg::new("bgr2rgb")
            .long("bgr2rgb")
            .help_heading("OPERATIONS")
            .action(ArgAction::SetTrue)
            .help("Swap the first and third channel of every pixel"))
        .arg(Arg::new("grayscale")
            .long("grayscale")
            .help_heading("OPERATIONS")
            .action(ArgAction::SetTrue)
            .help("Convert the image to grayscale"))
        .arg(Arg::new("equalize")
            .long("equalize")
            .help_heading("OPERATIONS")
            .action(ArgAction::SetTrue)
            .help("Equalize the histogram of every channel"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_parse() {
        let cmd = create_cmd_args();

        let matches = cmd
            .try_get_matches_from([
                "pix", "-i", "in.bmp", "-o", "out.png", "--flip", "vertical", "--rotate", "90",
                "--roll", "3", "-2", "-vv",
            ])
            .unwrap();

        assert_eq!(matches.get_one::<String>("in").unwrap(), "in.bmp");
        assert_eq!(matches.get_count("verbose"), 2);
        assert_eq!(*matches.get_one::<FlipArg>("flip").unwrap(), FlipArg::Vertical);
        assert_eq!(*matches.get_one::<i64>("rotate").unwrap(), 90);

        let roll: Vec<i64> = matches.get_many::<i64>("roll").unwrap().copied().collect();
        assert_eq!(roll, vec![3, -2]);
    }

    #[test]
    fn input_and_output_are_required() {
        let cmd = create_cmd_args();

        assert!(cmd.try_get_matches_from(["pix", "-i", "in.bmp"]).is_err());
    }
}
