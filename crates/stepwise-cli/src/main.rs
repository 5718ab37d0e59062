use anyhow::bail;
use clap::Parser;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use stepwise_cli::{Command, PathOrStdin};

fn main() -> anyhow::Result<()> {
    let args = stepwise_cli::Args::parse();
    match args.command {
        Command::SmallStep { path, trace } => run(&path, Strategy::SmallStep { trace }),
        Command::BigStep { path } => run(&path, Strategy::BigStep),
    }
}

enum Strategy {
    SmallStep { trace: bool },
    BigStep,
}

fn run(path: &PathOrStdin, strategy: Strategy) -> anyhow::Result<()> {
    let text = path.read()?;
    if u32::try_from(text.len()).is_err() {
        bail!("{}: input too big", path.name());
    }

    let mut files = SimpleFiles::new();
    let file_id = files.add(path.name(), text.clone());
    let bump = bumpalo::Bump::new();

    let mut trace_output = String::new();
    let result = match strategy {
        Strategy::SmallStep { trace: false } => {
            stepwise_cli::interpret_small_step(&bump, file_id, &text)
        }
        Strategy::SmallStep { trace: true } => {
            stepwise_cli::interpret_small_step_trace(&bump, file_id, &text, &mut trace_output)
        }
        Strategy::BigStep => stepwise_cli::interpret_big_step(&bump, file_id, &text),
    };
    print!("{trace_output}");

    match result {
        Ok(value) => {
            println!("{value}");
            Ok(())
        }
        Err(diagnostic) => {
            let writer = StandardStream::stderr(ColorChoice::Auto);
            let config = term::Config::default();
            term::emit(&mut writer.lock(), &config, &files, &diagnostic)?;
            bail!("aborting due to 1 previous error");
        }
    }
}
