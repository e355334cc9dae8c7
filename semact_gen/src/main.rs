use std::path::PathBuf;

use blarg::prelude::*;
use blarg::{CommandLineParser, Optional, Parameter, Scalar, Switch};
use chrono::NaiveDate;
use semact_gen::{Generator, GeneratorConfig, Mode, Variant, DEFAULT_BOUND};

fn main() {
    let mut bound: usize = DEFAULT_BOUND;
    let mut variant = Variant::Capturing;
    let mut template: Option<PathBuf> = None;
    let mut splice: bool = false;
    let mut date: Option<NaiveDate> = None;
    let mut destination = PathBuf::default();

    let parser = CommandLineParser::new("semact-gen")
        .about("Generate one semantic action binder per arity, and write them to DESTINATION between '//--{' and '//--}' sentinels.")
        .add(
            Parameter::option(Scalar::new(&mut bound), "bound", Some('n'))
                .help("Emit binders for callbacks taking 1 through BOUND arguments."),
        )
        .add(
            Parameter::option(Scalar::new(&mut variant), "variant", None)
                .choice(Variant::Plain, "Record the callback's return value.")
                .choice(
                    Variant::Capturing,
                    "Record a semantic error's payload in place of the callback's value.",
                ),
        )
        .add(
            Parameter::option(Optional::new(&mut template), "template", Some('t'))
                .help("Read the binder template from this file instead of the builtin template."),
        )
        .add(
            Parameter::option(Switch::new(&mut splice, true), "splice", Some('s'))
                .help("Replace the existing region of DESTINATION, keeping the rest of the file."),
        )
        .add(
            Parameter::option(Optional::new(&mut date), "date", None)
                .help("Stamp the output with this YYYY-MM-DD date instead of today."),
        )
        .add(
            Parameter::argument(Scalar::new(&mut destination), "destination")
                .help("The file to write."),
        )
        .build();
    parser.parse();

    let mut config = GeneratorConfig::new(destination)
        .bound(bound)
        .variant(variant)
        .mode(if splice { Mode::Splice } else { Mode::Overwrite });
    if let Some(path) = template {
        config = config.template(path);
    }
    if let Some(date) = date {
        config = config.date(date);
    }

    match Generator::new(config).run() {
        Ok(report) => println!("{report}"),
        Err(error) => {
            eprintln!("Generation error: {error}");
            std::process::exit(1);
        }
    }
}
