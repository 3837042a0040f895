use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use lyra::diagnostics::{render_error, render_eval_error};
use lyra::parser::ast::{ClassMember, Program, Stmt};
use lyra::runtime::{ConstEvaluator, RuntimeConfig};

#[derive(Parser)]
#[command(name = "lyrac", version, about = "The Lyra front end")]
struct Cli {
    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a source file and print its declarations
    Parse {
        /// Source file path
        file: PathBuf,
        /// Print the full syntax tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse a source file and evaluate its constants
    Check {
        /// Source file path
        file: PathBuf,
        /// Runtime configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Evaluate a constant expression
    Eval {
        /// Expression source, e.g. "1 + 2 * 3"
        expr: String,
        /// Runtime configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "lyra=warn,lyrac=warn",
        1 => "lyra=debug,lyrac=debug",
        _ => "lyra=trace,lyrac=trace",
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    let ok = match cli.command {
        Commands::Parse { file, json } => run_parse(&file, json),
        Commands::Check { file, config } => run_check(&file, config.as_deref()),
        Commands::Eval { expr, config } => run_eval(&expr, config.as_deref()),
    };

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn read_source(file: &Path) -> Option<String> {
    match std::fs::read_to_string(file) {
        Ok(source) => Some(source),
        Err(e) => {
            eprintln!("error: could not read '{}': {e}", file.display());
            None
        }
    }
}

fn load_config(path: Option<&Path>) -> Option<RuntimeConfig> {
    match path.map(RuntimeConfig::load).transpose() {
        Ok(config) => Some(config.unwrap_or_default()),
        Err(err) => {
            render_error("", "", &err);
            None
        }
    }
}

fn parse_file(file: &Path) -> Option<(String, Program)> {
    let source = read_source(file)?;
    match lyra::parse(&source) {
        Ok(program) => Some((source, program)),
        Err(err) => {
            render_error(&source, &file.display().to_string(), &err);
            None
        }
    }
}

fn run_parse(file: &Path, json: bool) -> bool {
    let Some((_, program)) = parse_file(file) else {
        return false;
    };

    if json {
        match serde_json::to_string_pretty(&program) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("error: failed to serialize syntax tree: {e}");
                return false;
            }
        }
    } else {
        print!("{}", outline(&program));
    }
    true
}

fn run_check(file: &Path, config: Option<&Path>) -> bool {
    let Some(config) = load_config(config) else {
        return false;
    };
    let Some((source, program)) = parse_file(file) else {
        return false;
    };

    let mut evaluator = ConstEvaluator::new(&config);
    if let Err(err) = evaluator.define_program(&program) {
        render_eval_error(&source, &file.display().to_string(), &err);
        return false;
    }

    println!(
        "{}: {} classes, {} functions, {} constants",
        file.display(),
        program.classes().count(),
        program.functions().count(),
        evaluator.len()
    );
    true
}

fn run_eval(expr: &str, config: Option<&Path>) -> bool {
    let Some(config) = load_config(config) else {
        return false;
    };
    let parsed = match lyra::parse_expression(expr) {
        Ok(parsed) => parsed,
        Err(err) => {
            render_error(expr, "<expr>", &err);
            return false;
        }
    };
    match ConstEvaluator::new(&config).eval(&parsed) {
        Ok(value) => {
            println!("{}", value.export());
            true
        }
        Err(err) => {
            render_eval_error(expr, "<expr>", &err);
            false
        }
    }
}

/// One line per declaration, members indented beneath their class.
fn outline(program: &Program) -> String {
    let mut out = String::new();
    for stmt in &program.stmts {
        match &stmt.node {
            Stmt::Namespace(ns) => out.push_str(&format!("namespace {}\n", ns.name.node)),
            Stmt::Constant(c) => out.push_str(&format!("const {}\n", c.name.node)),
            Stmt::Function(f) => out.push_str(&format!("function {}/{}\n", f.name.node, f.params.len())),
            Stmt::Class(class) => {
                let mut header = String::new();
                if class.is_abstract {
                    header.push_str("abstract ");
                }
                if class.is_final {
                    header.push_str("final ");
                }
                out.push_str(&format!("{header}class {}\n", class.qualified_name()));
                for member in &class.members {
                    match &member.node {
                        ClassMember::Constant(c) => {
                            out.push_str(&format!("  {} const {}\n", c.visibility, c.name.node));
                        }
                        ClassMember::Method(m) => {
                            let mut flags = m.visibility.to_string();
                            for (set, word) in [(m.is_abstract, "abstract"), (m.is_final, "final"), (m.is_static, "static")] {
                                if set {
                                    flags.push(' ');
                                    flags.push_str(word);
                                }
                            }
                            out.push_str(&format!("  {flags} function {}\n", m.function.name.node));
                        }
                    }
                }
            }
            Stmt::Return(_) | Stmt::Expr(_) => {}
        }
    }
    out
}
