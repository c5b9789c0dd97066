use optbind::{CommandLineParser, OptionDefinition, Parsed};

fn main() {
    let mut mode = String::default();
    let mut ratio: f64 = 0.0;
    let mut port: u16 = 0;

    let parser = CommandLineParser::new("selector")
        .add(
            OptionDefinition::selector(&mut mode, Some('m'), Some("mode"), vec!["fast", "safe"])
                .help("How to run")
                .default("safe"),
        )
        .add(
            OptionDefinition::float(&mut ratio, Some('r'), Some("ratio"))
                .help("Fraction of the work to do")
                .default(1.0)
                .validate(|values| match values.first().map(|value| value.parse::<f64>()) {
                    Some(Ok(ratio)) if !(0.0..=1.0).contains(&ratio) => {
                        Err(format!("ratio {ratio} must be within [0, 1]."))
                    }
                    _ => Ok(()),
                }),
        )
        .add(
            OptionDefinition::custom(Parsed::new(&mut port), Some('p'), Some("port"))
                .help("Port to listen on")
                .required(),
        )
        .build();

    parser.parse();
    println!("mode={mode} ratio={ratio} port={port}");
}
