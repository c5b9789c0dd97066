use optbind::{CommandLineParser, OptionDefinition};

fn main() {
    let mut verbosity: i64 = 0;
    let mut dry_run = false;
    let mut numbers: Vec<i64> = Vec::default();

    let parser = CommandLineParser::new("counter")
        .about("Sums the numbers, talking more with each -v.")
        .add(OptionDefinition::counter(&mut verbosity, Some('v'), Some("verbose")).help("Verbosity"))
        .add(OptionDefinition::flag(&mut dry_run, Some('d'), Some("dry-run")).help("Print without summing"))
        .add(
            OptionDefinition::int_list(&mut numbers, Some('n'), None)
                .help("A number to sum")
                .required(),
        )
        .build();

    parser.parse();

    if verbosity > 1 {
        println!("Numbers: {numbers:?}");
    }

    if dry_run {
        println!("Would sum {} numbers.", numbers.len());
    } else {
        let sum: i64 = numbers.iter().sum();
        println!("Sum: {sum}");
    }
}
