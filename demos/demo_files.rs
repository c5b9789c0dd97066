use std::io::Read;

use optbind::{CommandLineParser, FileHandle, OpenSpec, OptionDefinition};

fn main() {
    let mut inputs: Vec<FileHandle> = Vec::default();
    let mut output: Option<FileHandle> = None;

    let parser = CommandLineParser::new("files")
        .about("Counts the bytes of each input, optionally noting the total in an output file.")
        .add(
            OptionDefinition::file_list(&mut inputs, Some('i'), Some("input"), OpenSpec::default())
                .help("A file to count")
                .default(vec!["Cargo.toml"]),
        )
        .add(
            OptionDefinition::file(
                &mut output,
                Some('o'),
                Some("output"),
                OpenSpec::default().read(false).write(true).create(true).truncate(true),
            )
            .help("Where to write the total"),
        )
        .build();

    parser.parse();
    let mut total = 0;

    for mut input in inputs {
        let mut buffer = Vec::default();
        match input.file_mut().read_to_end(&mut buffer) {
            Ok(count) => {
                println!("{}: {count}", input.path().display());
                total += count;
            }
            Err(error) => eprintln!("{}: {error}", input.path().display()),
        }
    }

    println!("Total: {total}");

    if let Some(mut output) = output {
        use std::io::Write;

        if let Err(error) = writeln!(output.file_mut(), "{total}") {
            eprintln!("{}: {error}", output.path().display());
        }
    }
}
