//! The `dissect play` command.
//!
//! A line-oriented display surface: every line read from stdin is one user
//! action, forwarded to the round engine. All quiz rules live in the engine.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use dissect_core::config::{load_config_from, DissectConfig};
use dissect_core::error::QuizError;
use dissect_core::picker::RandomPicker;
use dissect_core::report::SessionReport;
use dissect_core::statistics::compute_session_stats;
use dissect_core::{ContentStore, RoundEngine, SessionState};
use dissect_report::{write_csv_export, CsvDownload};

const HINT: &str = "Hint: Think about the main purpose of the excerpt.";

/// Settings for one interactive session, after config and flags are merged.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub seed: Option<u64>,
    pub output_dir: PathBuf,
    pub export_filename: String,
    pub formats: Vec<ExportFormat>,
    pub show_hints: bool,
    pub offer_bonus: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl PlayOptions {
    fn resolve(
        config: DissectConfig,
        seed: Option<u64>,
        output: Option<PathBuf>,
        format: &str,
        no_bonus: bool,
    ) -> Result<Self> {
        Ok(Self {
            seed: seed.or(config.seed),
            output_dir: output.unwrap_or(config.output_dir),
            export_filename: config.export_filename,
            formats: parse_formats(format)?,
            show_hints: config.show_hints,
            offer_bonus: config.offer_bonus && !no_bonus,
        })
    }
}

fn parse_formats(format: &str) -> Result<Vec<ExportFormat>> {
    if format == "all" {
        return Ok(vec![ExportFormat::Csv, ExportFormat::Json]);
    }
    format
        .split(',')
        .map(|f| match f.trim() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(anyhow::anyhow!(
                "unknown export format: '{other}' (expected csv, json, or all)"
            )),
        })
        .collect()
}

pub fn execute(
    seed: Option<u64>,
    output: Option<PathBuf>,
    format: String,
    no_bonus: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let options = PlayOptions::resolve(config, seed, output, &format, no_bonus)?;

    let store = Arc::new(ContentStore::builtin());
    let picker = RandomPicker::from_seed_option(options.seed);
    let mut engine = RoundEngine::new(store, Box::new(picker));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let session = run_session(&mut engine, &options, stdin.lock(), stdout.lock())?;

    tracing::info!(
        session = %session.id(),
        picker = engine.picker_name(),
        rounds = session.rounds_completed(),
        score = session.score(),
        "session finished"
    );
    Ok(())
}

/// What a line of input asks for.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Quit,
    Skip,
    Choose(String),
    Empty,
}

fn parse_action(line: &str, options: &[&str], allow_skip: bool) -> Action {
    let trimmed = line.trim();
    match trimmed {
        "" => Action::Empty,
        "q" | "quit" => Action::Quit,
        "s" | "skip" if allow_skip => Action::Skip,
        _ => match trimmed.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => {
                Action::Choose(options[n - 1].to_string())
            }
            // Anything else goes to the engine verbatim and is scored as given.
            _ => Action::Choose(line.to_string()),
        },
    }
}

/// Read one line without its terminator; `None` on end of input.
///
/// Lines that are not valid UTF-8 come back as `Err(line_bytes)` so the
/// caller can re-prompt instead of ending the session.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<Result<String, Vec<u8>>>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    while matches!(buf.last(), Some(b'\n' | b'\r')) {
        buf.pop();
    }
    Ok(Some(String::from_utf8(buf).map_err(|e| e.into_bytes())))
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> Result<Option<String>> {
    loop {
        write!(out, "{text} > ")?;
        out.flush()?;
        let line = read_line(input)?;
        writeln!(out)?;
        match line {
            None => return Ok(None),
            Some(Ok(line)) => return Ok(Some(line)),
            Some(Err(bytes)) => {
                tracing::debug!(len = bytes.len(), "discarding non-UTF-8 input line");
                writeln!(out, "  ! input is not valid UTF-8")?;
            }
        }
    }
}

/// Print a recoverable quiz error and carry on; propagate anything fatal.
fn surface<W: Write>(out: &mut W, err: QuizError) -> Result<()> {
    if err.is_recoverable() {
        writeln!(out, "  ! {err}")?;
        Ok(())
    } else {
        Err(err.into())
    }
}

/// Drive a session from `input` until the user quits or input ends.
pub fn run_session<R: BufRead, W: Write>(
    engine: &mut RoundEngine,
    options: &PlayOptions,
    mut input: R,
    mut out: W,
) -> Result<SessionState> {
    let mut session = engine.new_session()?;
    let names: Vec<String> = engine
        .store()
        .section_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();

    writeln!(out, "Facebook & Loneliness: Research Dissection Game")?;
    writeln!(
        out,
        "Match each excerpt to its section of the article, then try the bonus question."
    )?;

    'rounds: loop {
        let section = engine.current_section(&session)?;
        writeln!(out)?;
        writeln!(out, "Round {}: Read this excerpt", session.round_number())?;
        writeln!(out, "  {}", section.excerpt_text)?;
        writeln!(out)?;
        writeln!(out, "Which section is this from?")?;
        for (i, name) in names.iter().enumerate() {
            writeln!(out, "  {}) {name}", i + 1)?;
        }

        // Primary guess
        let guess = loop {
            let text = format!("[1-{}, q to quit]", names.len());
            let Some(line) = prompt(&mut input, &mut out, &text)? else {
                break 'rounds;
            };
            match parse_action(&line, &name_refs, false) {
                Action::Quit => break 'rounds,
                Action::Choose(guess) => break guess,
                Action::Empty | Action::Skip => continue,
            }
        };

        let outcome = match engine.submit_primary_guess(&mut session, &guess) {
            Ok(outcome) => outcome,
            Err(err) => {
                surface(&mut out, err)?;
                continue;
            }
        };
        if outcome.correct {
            writeln!(out, "Correct! This is the {} section.", outcome.correct_section)?;
        } else {
            writeln!(
                out,
                "Nope, this is actually from the {} section.",
                outcome.correct_section
            )?;
            if options.show_hints {
                writeln!(out, "{HINT}")?;
            }
        }
        writeln!(out, "Explanation: {}", outcome.explanation)?;

        // Bonus question
        let mut quit_after_round = false;
        if options.offer_bonus {
            let section = engine.current_section(&session)?;
            let bonus_options: Vec<&str> =
                section.bonus_options.iter().map(String::as_str).collect();
            writeln!(out)?;
            writeln!(out, "Bonus question: {}", section.bonus_question)?;
            for (i, option) in bonus_options.iter().enumerate() {
                writeln!(out, "  {}) {option}", i + 1)?;
            }

            loop {
                let text = format!("[1-{}, s to skip, q to quit]", bonus_options.len());
                let action = match prompt(&mut input, &mut out, &text)? {
                    Some(line) => parse_action(&line, &bonus_options, true),
                    None => Action::Quit,
                };
                match action {
                    Action::Empty => continue,
                    Action::Quit => {
                        engine.skip_bonus(&mut session)?;
                        quit_after_round = true;
                    }
                    Action::Skip => {
                        engine.skip_bonus(&mut session)?;
                        writeln!(out, "Bonus skipped.")?;
                    }
                    Action::Choose(answer) => {
                        let bonus = engine.submit_bonus_answer(&mut session, &answer)?;
                        if bonus.correct {
                            writeln!(out, "Correct! You earned an extra point.")?;
                        } else {
                            writeln!(
                                out,
                                "Not quite. The correct answer is: {}",
                                bonus.correct_answer
                            )?;
                        }
                        writeln!(out, "Bonus explanation: {}", bonus.explanation)?;
                    }
                }
                break;
            }
        } else {
            engine.skip_bonus(&mut session)?;
        }

        writeln!(out)?;
        writeln!(
            out,
            "Score: {} | Rounds played: {}",
            session.score(),
            session.round_index()
        )?;
        if quit_after_round {
            break 'rounds;
        }

        // Between rounds
        loop {
            let menu = "[n] next round, [e] export, [q] quit";
            let Some(line) = prompt(&mut input, &mut out, menu)? else {
                break 'rounds;
            };
            match line.trim() {
                "n" | "next" => match engine.advance_round(&mut session) {
                    Ok(_) => continue 'rounds,
                    Err(err) => surface(&mut out, err)?,
                },
                "e" | "export" => match export_session(&session, options) {
                    Ok(paths) => {
                        for path in paths {
                            writeln!(out, "Results saved to: {}", path.display())?;
                        }
                    }
                    Err(err) => match err.downcast::<QuizError>() {
                        Ok(quiz_err) => surface(&mut out, quiz_err)?,
                        Err(other) => return Err(other),
                    },
                },
                "q" | "quit" => break 'rounds,
                "" => {}
                other => writeln!(out, "  ! unknown action: {other}")?,
            }
        }
    }

    print_summary(&session, &mut out)?;
    Ok(session)
}

/// Write the session in every configured format.
fn export_session(session: &SessionState, options: &PlayOptions) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for format in &options.formats {
        match format {
            ExportFormat::Csv => {
                let download = CsvDownload::from_history(session.history())?
                    .with_filename(options.export_filename.as_str());
                paths.push(write_csv_export(&download, &options.output_dir)?);
            }
            ExportFormat::Json => {
                if session.history().is_empty() {
                    return Err(QuizError::EmptyHistory.into());
                }
                let report = SessionReport::from_session(session, options.seed);
                let path = json_path(&options.output_dir, session);
                report.save_json(&path)?;
                paths.push(path);
            }
        }
    }
    Ok(paths)
}

fn json_path(dir: &Path, session: &SessionState) -> PathBuf {
    let timestamp = session.started_at().format("%Y-%m-%dT%H%M%S");
    dir.join(format!("session-{timestamp}.json"))
}

fn print_summary<W: Write>(session: &SessionState, out: &mut W) -> Result<()> {
    use comfy_table::{Cell, Table};

    writeln!(out)?;
    if session.history().is_empty() {
        writeln!(out, "No rounds completed. Thanks for playing!")?;
        return Ok(());
    }

    let stats = compute_session_stats(session.history());
    let mut table = Table::new();
    table.set_header(vec!["Section", "Rounds", "Named", "Bonus"]);
    for (name, s) in &stats.per_section {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(s.rounds),
            Cell::new(s.primary_correct),
            Cell::new(s.bonus_correct),
        ]);
    }

    writeln!(out, "{table}")?;
    writeln!(
        out,
        "Total score: {} over {} round(s) ({:.1}% sections named, {:.1}% bonus correct)",
        session.score(),
        stats.rounds,
        stats.primary_accuracy * 100.0,
        stats.bonus_accuracy * 100.0
    )?;
    Ok(())
}
