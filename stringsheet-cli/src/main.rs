use std::fs;
use std::process::ExitCode;
use std::str::FromStr;

use clap::{Parser as ClapParser, Subcommand};

use stringsheet::traits::Parser;
use stringsheet::{
    Error, Platform, Project, ResourceTree, Translator, TranslatorConfig, apply_translations,
    merge_source_files, pending_translations, translate,
};
use stringsheet_cli::{SourceSpec, read_source_file};

#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Import platform source files into a spreadsheet.
    Import {
        /// Platform of the source files (android, ios, flutter)
        #[arg(short, long)]
        platform: String,
        /// Base file as LANG=FILE[:DIR]; its keys define the project rows
        #[arg(short, long)]
        base: String,
        /// Additional language files as LANG=FILE[:DIR]
        #[arg(short, long)]
        other: Vec<String>,
        /// The spreadsheet (CSV) file to write
        #[arg(short = 'O', long)]
        output: String,
    },

    /// Export a spreadsheet to a zip of platform resource trees.
    Export {
        /// The spreadsheet (CSV) file to read
        #[arg(short, long)]
        input: String,
        /// The zip archive to write
        #[arg(short, long)]
        output: String,
    },

    /// Re-encode a spreadsheet (normalizes layout and cell padding).
    Sheet {
        /// The spreadsheet (CSV) file to read
        #[arg(short, long)]
        input: String,
        /// The spreadsheet (CSV) file to write
        #[arg(short, long)]
        output: String,
    },

    /// Print the keys and values of a spreadsheet.
    View {
        /// The spreadsheet (CSV) file to read
        #[arg(short, long)]
        input: String,
        /// Optional language code to filter values by
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Fill missing translations of one language column via a translation API.
    Fill {
        /// The spreadsheet (CSV) file to read
        #[arg(short, long)]
        input: String,
        /// Target language code (must be a project column)
        #[arg(short, long)]
        target: String,
        /// Output file; defaults to rewriting the input
        #[arg(short, long)]
        output: Option<String>,
        /// API credential; falls back to STRINGSHEET_API_KEY
        #[arg(long)]
        api_key: Option<String>,
        /// Model name
        #[arg(long, default_value = translate::DEFAULT_MODEL)]
        model: String,
        /// Chat-completions endpoint
        #[arg(long, default_value = translate::DEFAULT_ENDPOINT)]
        endpoint: String,
    },

    /// Write the built-in example project as a spreadsheet.
    Example {
        /// The spreadsheet (CSV) file to write
        #[arg(short, long)]
        output: String,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args.commands) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), Error> {
    match command {
        Commands::Import {
            platform,
            base,
            other,
            output,
        } => {
            let platform = Platform::from_str(&platform)?;
            let base = read_source_file(platform, &SourceSpec::parse(&base)?)?;
            let others = other
                .iter()
                .map(|arg| read_source_file(platform, &SourceSpec::parse(arg)?))
                .collect::<Result<Vec<_>, _>>()?;

            let project = merge_source_files(platform, base, others)?;
            project.write_to(&output)?;
            println!(
                "Imported {} keys across {} languages into {}",
                project.rows.len(),
                project.columns.len(),
                output
            );
            Ok(())
        }
        Commands::Export { input, output } => {
            let project = Project::read_from(&input)?;
            let tree = ResourceTree::from_project(&project);
            fs::write(&output, tree.to_zip_bytes()?)?;
            println!("Wrote {} resource files to {}", tree.files.len(), output);
            Ok(())
        }
        Commands::Sheet { input, output } => {
            let project = Project::read_from(&input)?;
            project.write_to(&output)?;
            Ok(())
        }
        Commands::View { input, lang } => {
            let project = Project::read_from(&input)?;
            print_view(&project, lang.as_deref());
            Ok(())
        }
        Commands::Fill {
            input,
            target,
            output,
            api_key,
            model,
            endpoint,
        } => {
            let project = Project::read_from(&input)?;
            if project.column(&target).is_none() {
                return Err(Error::validation_error(format!(
                    "language `{target}` is not a column of {input}"
                )));
            }

            let api_key = api_key
                .or_else(|| std::env::var("STRINGSHEET_API_KEY").ok())
                .unwrap_or_default();
            let translator = Translator::new(TranslatorConfig {
                api_key,
                model,
                endpoint,
            })?;

            let pending = pending_translations(&project, &target);
            if pending.is_empty() {
                println!("No missing translations for {target}");
                return Ok(());
            }

            let translations = translator.translate_batch(&target, &pending)?;
            let filled = apply_translations(&project, &target, &translations);
            filled.write_to(output.as_deref().unwrap_or(&input))?;
            println!(
                "Filled {} of {} missing translations for {}",
                translations.len(),
                pending.len(),
                target
            );
            Ok(())
        }
        Commands::Example { output } => {
            Project::example().write_to(&output)?;
            println!("Wrote example project to {output}");
            Ok(())
        }
    }
}

fn print_view(project: &Project, lang: Option<&str>) {
    let codes: Vec<&str> = match lang {
        Some(lang) => vec![lang],
        None => project.language_codes(),
    };
    println!("{}", codes.join("\t"));
    for row in &project.rows {
        let values: Vec<&str> = codes
            .iter()
            .map(|code| row.value(code).unwrap_or(""))
            .collect();
        println!("{}\t{}", row.key, values.join("\t"));
    }
}
