//! Plain-text rendering for the terminal

use crate::agent::{AgentError, ResearchReport};
use crate::results::{SearchOutcome, SearchResult};
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

fn heavy_rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn light_rule() -> String {
    "-".repeat(RULE_WIDTH)
}

pub fn banner(provider: &str, model: &str) -> String {
    format!(
        "{rule}\nWEB SEARCH AGENT - Interactive Mode\n{rule}\n\
         Search: {provider} | Model: {model}\n\n\
         Type your search queries below.\n\
         Commands: 'quit' or 'exit' to stop, 'help' for options\n",
        rule = heavy_rule(),
        provider = provider,
        model = model,
    )
}

pub fn help(top_n: usize) -> String {
    format!(
        "\n{rule}\nHELP\n{rule}\n\
         How to use:\n\
         1. Type your search query and press Enter\n\
         2. The agent searches the web and writes a summary\n\
         3. Long result lists are narrowed to the {top_n} most relevant sources first\n\
         4. With --no-filter, the first {top_n} results are used as sources\n\n\
         Commands:\n\
         - 'quit', 'exit' or 'q' - Exit the program\n\
         - 'help' - Show this help message\n\n\
         Tips:\n\
         - Be specific in your queries for better results\n\
         - Ask questions naturally, like talking to a person\n",
        rule = heavy_rule(),
        top_n = top_n,
    )
}

fn write_sources(out: &mut String, sources: &[SearchResult]) {
    for (i, source) in sources.iter().enumerate() {
        let _ = write!(out, "\n[{}] {}\n", i + 1, source.title);
        if source.is_error_sentinel() {
            let _ = writeln!(out, "    {}", source.snippet);
        } else {
            let _ = writeln!(out, "    {}", source.link);
        }
    }
}

/// Summary block followed by the numbered sources it was written from
pub fn report(report: &ResearchReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}\nSEARCH RESULTS\n{}", heavy_rule(), heavy_rule());
    let _ = writeln!(out, "\nAI Summary:\n{}\n{}", light_rule(), report.summary);
    let _ = writeln!(out, "\n\nSource Links:\n{}", light_rule());
    write_sources(&mut out, &report.results);
    let _ = writeln!(out, "\n{}", heavy_rule());
    out
}

/// A failed query. Search failures show the error record as the only source.
pub fn failure(err: &AgentError) -> String {
    match err {
        AgentError::SearchFailed(reason) => {
            let sentinel = SearchOutcome::Failed {
                reason: reason.clone(),
            }
            .into_display_results();

            let mut out = String::new();
            let _ = writeln!(out, "\n{}\nSEARCH RESULTS\n{}", heavy_rule(), heavy_rule());
            let _ = writeln!(out, "\nNo results available due to search error.");
            let _ = writeln!(out, "\n\nSource Links:\n{}", light_rule());
            write_sources(&mut out, &sentinel);
            let _ = writeln!(out, "\n{}", heavy_rule());
            out
        }
        AgentError::NoResults => "\nNo search results found. Try rephrasing your query.\n".to_string(),
    }
}
