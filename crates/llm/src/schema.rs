//! Response schemas for structured Gemini requests
//!
//! Gemini accepts an OpenAPI-style subset with upper-case type names.

use serde_json::{json, Value};

pub fn marketing_copy_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "adHeadline": { "type": "STRING" },
            "adBody": { "type": "STRING" },
            "socialMediaPost": { "type": "STRING" }
        },
        "required": ["adHeadline", "adBody", "socialMediaPost"],
        "propertyOrdering": ["adHeadline", "adBody", "socialMediaPost"]
    })
}

pub fn content_analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "tone": { "type": "STRING" },
            "clarityScore": {
                "type": "INTEGER",
                "description": "Clarity from 1 (unclear) to 10 (very clear)"
            },
            "suggestions": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "minItems": 2,
                "maxItems": 3
            }
        },
        "required": ["tone", "clarityScore", "suggestions"],
        "propertyOrdering": ["tone", "clarityScore", "suggestions"]
    })
}
