//! Prompt templates for summarizing and ranking search results

use crate::results::SearchResult;

pub const SUMMARY_SYSTEM_PROMPT: &str = "You are an expert research assistant who excels at \
analyzing and summarizing information from multiple sources.";

/// Enumerate results as `[i] title / snippet / URL: link`, numbered from 1
pub fn format_results_for_prompt(results: &[SearchResult]) -> String {
    let mut lines = Vec::with_capacity(results.len() * 4);

    for (i, result) in results.iter().enumerate() {
        lines.push(format!("[{}] {}", i + 1, result.title));
        lines.push(format!("    {}", result.snippet));
        lines.push(format!("    URL: {}", result.link));
        lines.push(String::new());
    }

    lines.join("\n")
}

pub fn summary_prompt(query: &str, results_text: &str) -> String {
    format!(
        r#"You are a helpful research assistant. A user has searched for: "{}"

Here are the search results:

{}

Please provide a comprehensive, well-organized summary that:
1. Directly answers the user's query based on the search results
2. Highlights the most relevant and important information
3. Synthesizes information from multiple sources
4. Includes specific facts, data, or insights when available
5. Mentions any contradictions or different perspectives if present
6. Cites which sources provided key information (by number)

Keep the response clear, concise, and informative."#,
        query, results_text
    )
}

pub fn relevance_prompt(query: &str, results_text: &str, top_n: usize) -> String {
    format!(
        r#"Given the user query: "{}"

And these search results:
{}

Please identify the {} most relevant result numbers (just the numbers) that best answer the query.
Respond with only the numbers separated by commas, like: 1,3,5,7,9"#,
        query, results_text, top_n
    )
}
