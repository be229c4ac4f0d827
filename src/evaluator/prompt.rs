//! Fixed rubric prompt sent to every backend

const EVAL_PROMPT: &str = r#"
You are an expert content editor specializing in digital content optimization.
Evaluate the blog post provided below thoroughly across these key parameters. You are only evaluating the text content - do not expect or assess any visual elements such as images, charts, or layout styling. For each parameter, assign a score from 0.0 (unacceptable) to 5.0 (exceptional). Provide short justification **supported by specific examples or direct references from the text where possible**.

**Evaluation Parameters:**

1.  **Tone of Voice:** Assess consistency, appropriateness, emotional resonance, and authenticity.
2.  **Style:** Evaluate writing quality, clarity, vocabulary, sentence variety, and engagement.
3.  **Structure & Readability:** Analyze headline, organization, transitions, subheadings, conclusion, formatting for clarity, and overall readability.
4.  **Format:** Examine text formatting consistency.
5.  **Flow:** Evaluate logical sequence, transitions, pacing, and reader engagement from start to finish.

**Scoring Guide:**
* 0.0 - 1.0: Unacceptable / Major flaws hindering purpose.
* 1.1 - 2.0: Poor / Needs significant revision.
* 2.1 - 3.0: Fair / Several areas need improvement.
* 3.1 - 4.0: Good / Generally effective, minor tweaks possible.
* 4.1 - 4.9: Very Good / High quality, meets objectives well.
* 5.0: Exceptional / Outstanding, near-perfect execution.

**Respond strictly in the following JSON format:**
```json
{
  "Tone of Voice": {"score": <float_score_0.0_to_5.0>, "reason": "<short_justification_with_specific_examples>"},
  "Style": {"score": <float_score_0.0_to_5.0>, "reason": "<short_justification_with_specific_examples>"},
  "Structure & Readability": {"score": <float_score_0.0_to_5.0>, "reason": "<short_justification_with_specific_examples>"},
  "Format": {"score": <float_score_0.0_to_5.0>, "reason": "<short_justification_with_specific_examples>"},
  "Flow": {"score": <float_score_0.0_to_5.0>, "reason": "<short_justification_with_specific_examples>"}
}
```

**IMPORTANT INSTRUCTION FOR PROCESSING INPUT:**
The text provided below might contain extra content from a web page (like navigation links, headers, footers, ads, related posts, or comments). **Identify and focus *only* on the main blog post article content (headline, author info if present, body paragraphs, subheadings).** Ignore all other extraneous text. Your evaluation scores and reasons must be based *solely* on this core article content.

**Blog post to evaluate:**
"#;

/// Instruction prompt followed by the article text
pub fn build_prompt(article_text: &str) -> String {
    let mut prompt = String::with_capacity(EVAL_PROMPT.len() + article_text.len());
    prompt.push_str(EVAL_PROMPT);
    prompt.push_str(article_text);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dimension;

    #[test]
    fn test_prompt_names_every_dimension() {
        let prompt = build_prompt("");
        for d in Dimension::ALL {
            assert!(prompt.contains(&format!("\"{}\"", d.key())), "missing {}", d);
        }
    }

    #[test]
    fn test_prompt_has_six_scoring_bands() {
        let prompt = build_prompt("");
        for band in [
            "Unacceptable",
            "Poor",
            "Fair",
            "Good /",
            "Very Good",
            "Exceptional /",
        ] {
            assert!(prompt.contains(band), "missing band {}", band);
        }
    }

    #[test]
    fn test_article_is_appended_last() {
        let prompt = build_prompt("The article body.");
        assert!(prompt.ends_with("**Blog post to evaluate:**\nThe article body."));
        assert!(prompt.contains("Ignore all other extraneous text"));
    }
}
