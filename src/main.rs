//! `railgraph`: a conformance CLI that replays a recorded commit stream
//! through the graph engine, the way the original project's `test-graph`
//! tool exercises its engine.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use railgraph::commit::{parse_title, CommitRecord};
use railgraph::graph::{Canvas, Engine, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    V1,
    V2,
}

impl From<StrategyArg> for Strategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::V1 => Strategy::V1,
            StrategyArg::V2 => Strategy::V2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Utf8,
    Ascii,
    Chtype,
}

/// Replay a `commit <id> <parents>...` / four-space-indented title stream
/// and print the rendered graph row for each commit.
#[derive(Parser, Debug)]
#[command(name = "railgraph", version, about)]
struct Args {
    /// Render using plain ASCII glyphs instead of UTF-8 box-drawing.
    #[arg(long)]
    ascii: bool,

    /// Render using the line-drawing encoding (nearest UTF-8 rendering of
    /// what would otherwise be raw curses code units).
    #[arg(long)]
    chtype: bool,

    /// Rendering strategy to exercise.
    #[arg(long, value_enum, default_value_t = StrategyArg::V2)]
    strategy: StrategyArg,

    /// Raise the log level to debug, overriding RUST_LOG.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    );
    if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    let encoding = match (args.ascii, args.chtype) {
        (true, true) => anyhow::bail!("--ascii and --chtype are mutually exclusive"),
        (true, false) => Encoding::Ascii,
        (false, true) => Encoding::Chtype,
        (false, false) => Encoding::Utf8,
    };

    log::debug!("constructing engine with strategy {:?}", args.strategy);
    let mut engine = Engine::new(args.strategy.into());
    let mut pending: Option<Canvas> = None;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read a line from standard input")?;

        if let Some(rest) = line.strip_prefix("commit ") {
            let record = CommitRecord::parse(rest)
                .with_context(|| format!("malformed commit header: {line:?}"))?;
            log::debug!("add_commit id={} boundary={}", record.id, record.is_boundary);

            let mut canvas = Canvas::default();
            engine
                .add_commit(&mut canvas, &record.id, &record.parents, record.is_boundary)
                .context("add_commit failed")?;
            engine
                .render_parents(&mut canvas)
                .context("render_parents failed")?;
            pending = Some(canvas);
            continue;
        }

        if let Some(title) = parse_title(&line) {
            if let Some(canvas) = pending.take() {
                writeln!(out, "{} {}", render_row(&canvas, encoding), title)
                    .context("failed to write to standard output")?;
            }
        }
    }

    Ok(())
}

/// Render a canvas's symbols into one line, dropping the leading column's
/// connector cell the way `test-graph`'s `chars + !!first` does.
fn render_row(canvas: &Canvas, encoding: Encoding) -> String {
    let mut row = String::new();
    canvas.foreach_symbol(|symbol, is_first| {
        let cell: String = match encoding {
            Encoding::Utf8 => symbol.to_utf8().to_string(),
            Encoding::Ascii => symbol.to_ascii().to_string(),
            Encoding::Chtype => {
                let glyphs = symbol.to_line_drawing();
                [glyphs[0].as_char(), glyphs[1].as_char()].iter().collect()
            }
        };

        if is_first {
            row.extend(cell.chars().skip(1));
        } else {
            row.push_str(&cell);
        }
    });
    row
}
