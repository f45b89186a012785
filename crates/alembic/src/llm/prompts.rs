//! Prompt templates for insight generation.

use crate::summary::DatasetSummary;

/// System prompt shared by all providers.
pub fn system_prompt() -> &'static str {
    "You are a concise data analyst."
}

/// Build the insight prompt for a dataset summary.
///
/// Deterministic: the same summary always produces the same prompt, so
/// reports are reproducible for identical inputs.
pub fn insight_prompt(summary: &DatasetSummary) -> String {
    // Pretty-printed JSON keeps the prompt compact and stable
    let summary_json = summary
        .to_json_pretty()
        .unwrap_or_else(|_| "{}".to_string());

    format!(
        "You are a senior data analyst. Use only the dataset summary provided. \
         Provide:\n\
         1) Executive summary (2-3 sentences)\n\
         2) Top 5 insights (bulleted)\n\
         3) Anomalies or data quality concerns\n\
         4) Suggested KPIs to track\n\n\
         Dataset summary:\n\
         {}\n\n\
         Respond in plain text with clear sections.",
        summary_json
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Cell, DataTable};
    use crate::summary::summarize;

    #[test]
    fn test_insight_prompt_embeds_summary() {
        let table = DataTable::new(
            vec!["amount".to_string()],
            vec![vec![Cell::Number(10.0)], vec![Cell::Number(20.0)]],
        );
        let summary = summarize(&table);
        let prompt = insight_prompt(&summary);

        assert!(prompt.contains("\"row_count\": 2"));
        assert!(prompt.contains("amount"));
        assert!(prompt.contains("Executive summary"));
    }

    #[test]
    fn test_insight_prompt_is_deterministic() {
        let table = DataTable::new(
            vec!["x".to_string()],
            vec![vec![Cell::Number(1.0)]],
        );
        let summary = summarize(&table);

        assert_eq!(insight_prompt(&summary), insight_prompt(&summary));
    }
}
