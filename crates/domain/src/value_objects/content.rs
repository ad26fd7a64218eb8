//! Generated content values
//!
//! Both types are ephemeral: they live in a detail-view session and are never
//! persisted. Constructors enforce the invariants so that a value which exists
//! is always displayable.

use crate::errors::ContentError;
use serde::{Deserialize, Serialize};

pub const MIN_SUGGESTIONS: usize = 2;
pub const MAX_SUGGESTIONS: usize = 3;
pub const MIN_CLARITY_SCORE: u8 = 1;
pub const MAX_CLARITY_SCORE: u8 = 10;

/// Ad copy generated for a single product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingCopy {
    pub ad_headline: String,
    pub ad_body: String,
    pub social_media_post: String,
}

impl MarketingCopy {
    pub fn new(
        ad_headline: impl Into<String>,
        ad_body: impl Into<String>,
        social_media_post: impl Into<String>,
    ) -> Result<Self, ContentError> {
        Ok(Self {
            ad_headline: non_blank("adHeadline", ad_headline.into())?,
            ad_body: non_blank("adBody", ad_body.into())?,
            social_media_post: non_blank("socialMediaPost", social_media_post.into())?,
        })
    }
}

/// Critique of a product description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    pub tone: String,
    pub clarity_score: u8,
    pub suggestions: Vec<String>,
}

impl ContentAnalysis {
    /// `clarity_score` is rounded to the nearest integer before the range check.
    pub fn new(
        tone: impl Into<String>,
        clarity_score: f64,
        suggestions: Vec<String>,
    ) -> Result<Self, ContentError> {
        let tone = non_blank("tone", tone.into())?;

        let rounded = clarity_score.round();
        if !rounded.is_finite()
            || rounded < f64::from(MIN_CLARITY_SCORE)
            || rounded > f64::from(MAX_CLARITY_SCORE)
        {
            return Err(ContentError::ClarityScoreOutOfRange(clarity_score));
        }

        let suggestions: Vec<String> = suggestions
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if !(MIN_SUGGESTIONS..=MAX_SUGGESTIONS).contains(&suggestions.len()) {
            return Err(ContentError::SuggestionCount(suggestions.len()));
        }

        Ok(Self {
            tone,
            clarity_score: rounded as u8,
            suggestions,
        })
    }
}

fn non_blank(field: &'static str, value: String) -> Result<String, ContentError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ContentError::BlankField(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestions(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Suggestion {i}")).collect()
    }

    #[test]
    fn test_marketing_copy_trims_fields() {
        let copy = MarketingCopy::new("  Ship faster ", "Body", "Post #rust").expect("valid copy");
        assert_eq!(copy.ad_headline, "Ship faster");
    }

    #[test]
    fn test_marketing_copy_rejects_blank_field() {
        let err = MarketingCopy::new("Headline", "   ", "Post").unwrap_err();
        assert_eq!(err, ContentError::BlankField("adBody"));
    }

    #[test]
    fn test_analysis_accepts_bounds() {
        assert_eq!(
            ContentAnalysis::new("Calm", 1.0, suggestions(2)).expect("low bound").clarity_score,
            1
        );
        assert_eq!(
            ContentAnalysis::new("Calm", 10.0, suggestions(3)).expect("high bound").clarity_score,
            10
        );
    }

    #[test]
    fn test_analysis_rounds_fractional_score() {
        let analysis = ContentAnalysis::new("Friendly", 7.6, suggestions(2)).expect("valid");
        assert_eq!(analysis.clarity_score, 8);
    }

    #[test]
    fn test_analysis_rejects_out_of_range_score() {
        assert!(matches!(
            ContentAnalysis::new("Calm", 0.0, suggestions(2)),
            Err(ContentError::ClarityScoreOutOfRange(_))
        ));
        assert!(matches!(
            ContentAnalysis::new("Calm", 11.0, suggestions(2)),
            Err(ContentError::ClarityScoreOutOfRange(_))
        ));
        assert!(matches!(
            ContentAnalysis::new("Calm", f64::NAN, suggestions(2)),
            Err(ContentError::ClarityScoreOutOfRange(_))
        ));
    }

    #[test]
    fn test_analysis_suggestion_count() {
        assert_eq!(
            ContentAnalysis::new("Calm", 5.0, suggestions(1)),
            Err(ContentError::SuggestionCount(1))
        );
        assert_eq!(
            ContentAnalysis::new("Calm", 5.0, suggestions(4)),
            Err(ContentError::SuggestionCount(4))
        );

        // Blank entries do not count
        let with_blank = vec!["Add numbers".to_string(), "  ".to_string()];
        assert_eq!(
            ContentAnalysis::new("Calm", 5.0, with_blank),
            Err(ContentError::SuggestionCount(1))
        );
    }

    #[test]
    fn test_serialized_field_names() {
        let copy = MarketingCopy::new("H", "B", "S").expect("valid");
        let json = serde_json::to_value(&copy).expect("serialize");
        assert!(json.get("adHeadline").is_some());
        assert!(json.get("socialMediaPost").is_some());
    }
}
