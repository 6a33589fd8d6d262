//! sqlstmt CLI
//!
//! Parses a MySQL or PostgreSQL script and prints its statement AST.

mod error;
mod output;

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use sqlstmt_core::{ParseOptions, SqlParser};
use sqlstmt_mysql::MySqlParser;
use sqlstmt_pgsql::PgParser;

use crate::error::CliError;

/// Print the statement AST of a SQL script.
#[derive(Parser)]
#[command(name = "sqlstmt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQL dialect of the input.
    #[arg(short, long, env = "SQLSTMT_DIALECT", value_enum, default_value_t = DialectArg::Mysql)]
    dialect: DialectArg,

    /// Line number of the first input line.
    #[arg(short, long, env = "SQLSTMT_BASELINE", default_value_t = 1)]
    baseline: usize,

    /// Maximum nesting of expressions and subqueries.
    #[arg(long, env = "SQLSTMT_MAX_DEPTH")]
    max_depth: Option<usize>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Indent JSON output.
    #[arg(long)]
    pretty: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// SQL file to parse (stdin if not specified).
    input: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum DialectArg {
    Mysql,
    #[value(alias = "postgresql", alias = "pg")]
    Postgres,
}

impl DialectArg {
    fn parser(self) -> Box<dyn SqlParser> {
        match self {
            Self::Mysql => Box::new(MySqlParser::new()),
            Self::Postgres => Box::new(PgParser::new()),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Summary,
}

impl Cli {
    fn options(&self) -> ParseOptions {
        let options = ParseOptions::new().with_baseline_line(self.baseline);
        match self.max_depth {
            Some(depth) => options.with_max_depth(depth),
            None => options,
        }
    }

    fn origin(&self) -> String {
        self.input
            .as_ref()
            .map_or_else(|| "<stdin>".to_string(), |path| path.display().to_string())
    }

    fn read_input(&self) -> Result<String, CliError> {
        let read = match &self.input {
            Some(path) => std::fs::read_to_string(path),
            None => {
                let mut sql = String::new();
                std::io::stdin().read_to_string(&mut sql).map(|_| sql)
            }
        };
        read.map_err(|source| CliError::Read {
            origin: self.origin(),
            source,
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install the log subscriber")?;

    let sql = cli.read_input()?;
    debug!(origin = %cli.origin(), bytes = sql.len(), "read input");

    let parser = cli.dialect.parser();
    let dialect = parser.dialect();
    let statements = match parser.parse_with(&sql, &cli.options()) {
        Ok(statements) => statements,
        Err(source) => {
            if matches!(cli.format, Format::Json) {
                let report = output::json_error(dialect, &source, cli.pretty)
                    .context("failed to serialize the parse error")?;
                println!("{report}");
            }
            return Err(CliError::Parse {
                origin: cli.origin(),
                source,
            }
            .into());
        }
    };
    info!(%dialect, statements = statements.len(), "parsed {}", cli.origin());

    let rendered = match cli.format {
        Format::Json => output::json(dialect, &statements, cli.pretty)
            .context("failed to serialize statements")?,
        Format::Summary => output::summary(&statements),
    };
    if !rendered.is_empty() {
        println!("{rendered}");
    }

    Ok(())
}
