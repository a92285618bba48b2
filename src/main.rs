// Copyright 2025 Rauli Laine
//
// This file is part of laskin.
//
// laskin is free software: you can redistribute it and/or modify it under the
// terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// laskin is distributed in the hope that it will be useful, but WITHOUT ANY
// WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// laskin. If not, see <https://www.gnu.org/licenses/>.

use std::io::{IsTerminal, Read, Write};
use std::process::ExitCode;

use rustyline as rl;
use rustyline::error::ReadlineError;

use laskin::{parser, Context};

/// Autocompletion helper.
struct Completer {
    words: Vec<String>,
}

impl rl::Helper for Completer {}
impl rl::highlight::Highlighter for Completer {}
impl rl::validate::Validator for Completer {}
impl rl::hint::Hinter for Completer {
    type Hint = String;
}

impl rl::completion::Completer for Completer {
    type Candidate = String;

    /// Autocompletes dictionary words.
    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rl::Context<'_>,
    ) -> rl::Result<(usize, Vec<String>)> {
        // Find the index of the start of the token under the cursor.
        let start = line[0..pos].rfind(char::is_whitespace).map_or(0, |p| p + 1);

        if start == pos {
            return Ok((0, vec![]));
        }

        // Find all words that start with the token under the cursor.
        let mut candidates: Vec<String> = vec![];
        let prefix = &line[start..pos];

        for word in &self.words {
            if word.starts_with(prefix) {
                candidates.push(word.clone());
            }
        }

        Ok((start, candidates))
    }
}

struct Arguments {
    programfile: Option<String>,
    inline_scripts: Vec<String>,
}

fn main() -> ExitCode {
    let mut context = Context::new();
    let arguments = match parse_args() {
        Ok(arguments) => arguments,
        Err(code) => return code,
    };

    if !arguments.inline_scripts.is_empty() {
        for source in &arguments.inline_scripts {
            if let Err(error) = context.execute(source, 1, &mut std::io::stdout()) {
                eprintln!("{error}");

                return ExitCode::FAILURE;
            }
        }

        ExitCode::SUCCESS
    } else if let Some(programfile) = &arguments.programfile {
        match std::fs::read(programfile) {
            Ok(source) => run_source(&mut context, &source),
            Err(_) => {
                eprintln!("laskin: Unable to open file `{programfile}' for reading.");

                ExitCode::FAILURE
            }
        }
    } else if std::io::stdin().is_terminal() {
        run_repl(&mut context)
    } else {
        let mut source = Vec::new();

        if std::io::stdin().read_to_end(&mut source).is_err() {
            eprintln!("laskin: Unable to read standard input.");

            return ExitCode::FAILURE;
        }

        run_source(&mut context, &source)
    }
}

/// Decodes and executes an entire program against the given context.
fn run_source(context: &mut Context, source: &[u8]) -> ExitCode {
    let source = match std::str::from_utf8(source) {
        Ok(source) => source,
        Err(_) => {
            eprintln!("laskin: Unable to decode program with UTF-8 character encoding.");

            return ExitCode::FAILURE;
        }
    };

    if let Err(error) = context.execute(source, 1, &mut std::io::stdout()) {
        eprintln!("{error}");

        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Runs the read-eval-print loop. Lines accumulate into a buffer until the
/// brackets opened on them balance again; then the buffer is executed.
fn run_repl(context: &mut Context) -> ExitCode {
    let config = match rl::config::Config::builder().max_history_size(1000) {
        Ok(builder) => builder
            .auto_add_history(true)
            .edit_mode(rl::config::EditMode::Emacs)
            .completion_type(rl::config::CompletionType::List)
            .build(),
        Err(_) => rl::config::Config::default(),
    };
    let mut rl: rl::Editor<Completer, rl::history::DefaultHistory> =
        match rl::Editor::with_config(config) {
            Ok(editor) => editor,
            Err(_) => {
                eprintln!("laskin: Unable to initialize the terminal.");

                return ExitCode::FAILURE;
            }
        };

    // Load readline history.
    let history_path = home::home_dir().map(|mut path| {
        path.push(".laskin_history");
        path
    });

    if let Some(path) = &history_path {
        let _ = rl.load_history(path);
    }

    // Set up autocomplete.
    let mut completer = Completer {
        words: context.words(),
    };

    completer.words.sort();
    rl.set_helper(Some(completer));

    let mut line_counter = 1;
    let mut buffer_start_line = 1;
    let mut source = String::new();
    let mut open_delimiters: Vec<char> = Vec::new();

    loop {
        let prompt = format!(
            "laskin:{:03}:{}{} ",
            line_counter,
            context.depth(),
            if open_delimiters.is_empty() { '>' } else { '*' }
        );

        // Read
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => return ExitCode::SUCCESS,
            Err(_) => return ExitCode::FAILURE,
        };

        // Blank lines neither accumulate nor advance the line counter.
        if line.trim().is_empty() {
            continue;
        }

        if let Some(path) = &history_path {
            let _ = rl.append_history(path);
        }

        if source.is_empty() {
            buffer_start_line = line_counter;
        }
        source.push_str(&line);
        source.push('\n');
        line_counter += 1;

        parser::scan_open_delimiters(&line, &mut open_delimiters);
        if !open_delimiters.is_empty() {
            continue;
        }

        // Evaluate
        if let Err(error) = context.execute(&source, buffer_start_line, &mut std::io::stdout()) {
            println!("{error}");
        }
        source.clear();
    }
}

fn parse_args() -> Result<Arguments, ExitCode> {
    let argv: Vec<String> = std::env::args().collect();
    let mut arguments = Arguments {
        programfile: None,
        inline_scripts: Vec::new(),
    };
    let mut offset = 1;

    while offset < argv.len() {
        let arg = argv[offset].clone();

        offset += 1;
        if arg.is_empty() {
            continue;
        } else if !arg.starts_with('-') {
            arguments.programfile = Some(arg);
            break;
        } else if arg == "-" {
            break;
        } else if arg.starts_with("--") {
            if arg == "--help" {
                print_usage(&mut std::io::stdout());

                return Err(ExitCode::SUCCESS);
            } else if arg == "--version" {
                eprintln!("Laskin {}", env!("CARGO_PKG_VERSION"));

                return Err(ExitCode::SUCCESS);
            }
            eprintln!("Unrecognized switch: {arg}");
            print_usage(&mut std::io::stderr());

            return Err(ExitCode::FAILURE);
        } else {
            for switch in arg.chars().skip(1) {
                match switch {
                    'e' => {
                        if offset < argv.len() {
                            arguments.inline_scripts.push(argv[offset].clone());
                            offset += 1;
                        } else {
                            eprintln!("Argument expected for the -e option.");
                            print_usage(&mut std::io::stderr());

                            return Err(ExitCode::FAILURE);
                        }
                    }
                    'h' => {
                        print_usage(&mut std::io::stdout());

                        return Err(ExitCode::SUCCESS);
                    }
                    _ => {
                        eprintln!("Unrecognized switch: `{switch}'");

                        return Err(ExitCode::FAILURE);
                    }
                }
            }
        }
    }

    if offset < argv.len() {
        eprintln!("Too many arguments given.");
        print_usage(&mut std::io::stderr());

        return Err(ExitCode::FAILURE);
    }

    Ok(arguments)
}

fn print_usage(output: &mut dyn Write) {
    let _ = writeln!(output);
    let _ = writeln!(output, "Usage: laskin [switches] [programfile]");
    let _ = writeln!(
        output,
        "  -e program        One line of program. (Omit programfile.)"
    );
    let _ = writeln!(output, "  --version         Print the version.");
    let _ = writeln!(output, "  --help            Display this message.");
    let _ = writeln!(output);
}
