//! Terminal front ends: the interactive loop and single-shot questions

pub mod render;

use crate::agent::ResearchAgent;
use anyhow::{anyhow, Result};
use std::future::Future;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

/// One line of interactive input, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Quit,
    Help,
    Skip,
    Query(String),
}

/// Classify a line typed at the prompt. Commands are case-insensitive.
pub fn parse_command(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ReplCommand::Skip;
    }

    match trimmed.to_lowercase().as_str() {
        "quit" | "exit" | "q" => ReplCommand::Quit,
        "help" => ReplCommand::Help,
        _ => ReplCommand::Query(trimmed.to_string()),
    }
}

/// Per-query choices made on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    pub num_results: usize,
    pub filter_results: bool,
}

impl QueryOptions {
    pub fn for_agent(agent: &ResearchAgent, num_results: Option<usize>, no_filter: bool) -> Self {
        Self {
            num_results: agent.result_count(num_results),
            filter_results: agent.options().filter_results && !no_filter,
        }
    }
}

/// Answer one question and print the report
pub async fn ask(agent: &ResearchAgent, query: &str, options: QueryOptions) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        return Err(anyhow!("Please enter a search query"));
    }

    let mut stdout = std::io::stdout();
    match agent
        .search_and_summarize(query, options.num_results, options.filter_results)
        .await
    {
        Ok(report) => {
            write!(stdout, "{}", render::report(&report))?;
            Ok(())
        }
        Err(e) => {
            write!(stdout, "{}", render::failure(&e))?;
            Err(e.into())
        }
    }
}

/// Run the interactive loop on stdin until `quit`, end of input or Ctrl+C
pub async fn run_interactive(agent: &ResearchAgent, options: QueryOptions) -> Result<()> {
    let input = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_loop(agent, options, input, &mut stdout, interrupted()).await
}

/// Resolves on the first Ctrl+C. Never resolves if the handler cannot be
/// installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Drive the prompt until `quit`, end of input or `interrupt` resolves.
/// The interrupt is watched while waiting for input and while a query runs.
async fn run_loop<R, W, I>(
    agent: &ResearchAgent,
    options: QueryOptions,
    input: R,
    out: &mut W,
    interrupt: I,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    I: Future<Output = ()>,
{
    tokio::pin!(interrupt);
    write!(out, "{}", render::banner(agent.search_provider(), agent.model()))?;

    let mut lines = input.lines();
    loop {
        write!(out, "\nYour query: ")?;
        out.flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = &mut interrupt => None,
        };
        let Some(line) = line else {
            writeln!(out, "\nGoodbye!")?;
            break;
        };

        match parse_command(&line) {
            ReplCommand::Skip => continue,
            ReplCommand::Quit => {
                writeln!(out, "\nGoodbye!")?;
                break;
            }
            ReplCommand::Help => write!(out, "{}", render::help(agent.options().top_n))?,
            ReplCommand::Query(query) => {
                writeln!(out, "\nSearching for: '{}'", query)?;
                out.flush()?;

                let outcome = tokio::select! {
                    outcome = agent.search_and_summarize(
                        &query,
                        options.num_results,
                        options.filter_results,
                    ) => outcome,
                    _ = &mut interrupt => {
                        writeln!(out, "\nGoodbye!")?;
                        break;
                    }
                };

                match outcome {
                    Ok(report) => write!(out, "{}", render::report(&report))?,
                    Err(e) => {
                        debug!("Query '{}' failed: {}", query, e);
                        write!(out, "{}", render::failure(&e))?;
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::testing::{agent, FixedSearch, RecordingChat};
    use crate::agent::ResearchOptions;
    use crate::assistant::Assistant;
    use crate::results::RawResults;
    use crate::search::WebSearch;
    use async_trait::async_trait;
    use std::future::pending;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Notify;

    /// Signals `started` on each call, then never answers
    struct StalledSearch {
        started: Arc<Notify>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl WebSearch for StalledSearch {
        fn name(&self) -> &str {
            "stalled"
        }

        async fn search(&self, _query: &str, _num_results: usize) -> RawResults {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.started.notify_one();
            pending().await
        }
    }

    fn options() -> QueryOptions {
        QueryOptions {
            num_results: 10,
            filter_results: true,
        }
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("   "), ReplCommand::Skip);
        assert_eq!(parse_command("QUIT"), ReplCommand::Quit);
        assert_eq!(parse_command(" exit "), ReplCommand::Quit);
        assert_eq!(parse_command("q"), ReplCommand::Quit);
        assert_eq!(parse_command("Help"), ReplCommand::Help);
        assert_eq!(
            parse_command("  what is quic? "),
            ReplCommand::Query("what is quic?".to_string())
        );
    }

    #[test]
    fn test_query_options() {
        let agent = agent(FixedSearch::with_results(0), RecordingChat::new("", ""));

        let opts = QueryOptions::for_agent(&agent, None, false);
        assert_eq!(opts.num_results, 10);
        assert!(opts.filter_results);

        let opts = QueryOptions::for_agent(&agent, Some(100), true);
        assert_eq!(opts.num_results, 20);
        assert!(!opts.filter_results);
    }

    #[tokio::test]
    async fn test_loop_runs_queries_until_quit() {
        let search = FixedSearch::with_results(3);
        let agent = agent(search.clone(), RecordingChat::new("1", "A short answer."));
        let input: &[u8] = b"\nhelp\nrust async\nquit\nnever reached\n";
        let mut out = Vec::new();

        run_loop(&agent, options(), input, &mut out, pending())
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("HELP"));
        assert!(text.contains("first 5 results are used"));
        assert!(text.contains("Searching for: 'rust async'"));
        assert!(text.contains("A short answer."));
        assert!(text.ends_with("Goodbye!\n"));
        assert_eq!(search.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_loop_survives_search_failure() {
        let search = FixedSearch::with_raw(RawResults::failure("HTTP error: 503"));
        let agent = agent(search.clone(), RecordingChat::new("1", "s"));
        let input: &[u8] = b"first\nsecond\n";
        let mut out = Vec::new();

        run_loop(&agent, options(), input, &mut out, pending())
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("[1] Search Error").count(), 2);
        assert_eq!(search.calls.load(Ordering::SeqCst), 2);
        assert!(text.ends_with("Goodbye!\n"));
    }

    #[tokio::test]
    async fn test_interrupt_during_query_ends_loop() {
        let started = Arc::new(Notify::new());
        let search = Arc::new(StalledSearch {
            started: started.clone(),
            calls: AtomicUsize::new(0),
        });
        let agent = ResearchAgent::new(
            search.clone(),
            Assistant::new(RecordingChat::new("1", "s"), "test-model"),
            ResearchOptions::default(),
        );
        let input: &[u8] = b"first\nsecond\nthird\n";
        let mut out = Vec::new();

        let interrupt = async move { started.notified().await };
        run_loop(&agent, options(), input, &mut out, interrupt)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(search.calls.load(Ordering::SeqCst), 1);
        assert!(text.contains("Searching for: 'first'"));
        assert!(!text.contains("Searching for: 'second'"));
        assert!(text.ends_with("Goodbye!\n"));
    }
}
