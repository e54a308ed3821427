use serde_json::{json, Value};

/// Instruction sent with the article URL. The model is expected to browse or search for it.
pub fn build_analysis_prompt(url: &str, language: &str) -> String {
    let mut result = String::with_capacity(url.len() + language.len() * 2 + 700);
    result.push_str("Analyze the following news article URL: ");
    result.push_str(url);
    result.push_str("\n\n");
    result.push_str("1. Use Google Search to find the content of this article if you cannot access it directly.\n");
    result.push_str("2. If the specific URL is inaccessible (e.g., 404 or paywall), search for the news story based on keywords found in the URL.\n");
    result.push_str("3. Extract a detailed chronological timeline of events described in the story.\n");
    result.push_str("4. Assign a sentiment score to each event, from -10 (very negative/tragic) to 10 (very positive/celebratory).\n");
    result.push_str("5. **CRITICAL**: Return the data strictly in JSON format matching the schema.\n");
    result.push_str("6. **CRITICAL**: All text content (headline, summary, event titles, descriptions, tags) MUST be in ");
    result.push_str(language);
    result.push_str(".\n");
    result
}

pub fn build_image_prompt(headline: &str, summary: &str) -> String {
    format!(
        "Create a high-quality, editorial-style digital illustration for a news article with the headline: \"{}\". \
         Summary: \"{}\". The style should be professional, compelling, and suitable for a top-tier news magazine. \
         Do not include any text in the image.",
        headline, summary
    )
}

/// Response schema in the Gemini schema dialect. Field names match `NewsAnalysis`.
pub fn timeline_schema(language: &str) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "headline": {
                "type": "STRING",
                "description": format!("The main headline of the news article in {language}."),
            },
            "summary": {
                "type": "STRING",
                "description": format!("A brief executive summary of the news story (max 2 sentences) in {language}."),
            },
            "events": {
                "type": "ARRAY",
                "description": "A chronological list of events extracted from the article.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "date": {
                            "type": "STRING",
                            "description": "The date of the event (YYYY-MM-DD or relative like 'Monday'). Try to normalize to YYYY-MM-DD if possible.",
                        },
                        "time": {
                            "type": "STRING",
                            "description": "The time of the event if specified (e.g., '14:30' or 'Afternoon'). Optional.",
                        },
                        "title": {
                            "type": "STRING",
                            "description": format!("A short, punchy title for the specific event in {language}."),
                        },
                        "description": {
                            "type": "STRING",
                            "description": format!("A detailed description of what happened in {language}."),
                        },
                        "sentimentScore": {
                            "type": "NUMBER",
                            "description": "A sentiment score for this specific event ranging from -10 (very negative/tragic) to 10 (very positive/celebratory).",
                        },
                        "tags": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" },
                            "description": format!("Relevant tags for this event in {language}."),
                        },
                    },
                    "required": ["date", "title", "description", "sentimentScore", "tags"],
                },
            },
        },
        "required": ["headline", "summary", "events"],
    })
}
