//! Bias assessment produced by the prompt model.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use quell_protocols::capability::PromptMessage;
use quell_protocols::{CapabilityError, SessionOutput};

/// Lowest and highest emotion score.
pub const EMOTION_SCORE_RANGE: (i32, i32) = (-10, 10);

const SCORING_PROMPT: &str = "You rate news text for emotional bias. Answer with JSON only. \
    emotionScore is an integer from -10 (strongly negative) to 10 (strongly positive), \
    0 meaning neutral. hypeWords lists the most sensational words from the text.";

/// Emotion score and the most sensational words of one text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiasAssessment {
    pub emotion_score: i32,
    #[serde(default)]
    pub hype_words: Vec<String>,
}

impl BiasAssessment {
    /// JSON schema used as the prompt response constraint.
    pub fn response_schema(max_hype_words: usize) -> Value {
        json!({
            "type": "object",
            "properties": {
                "emotionScore": {
                    "type": "integer",
                    "minimum": EMOTION_SCORE_RANGE.0,
                    "maximum": EMOTION_SCORE_RANGE.1
                },
                "hypeWords": {
                    "type": "array",
                    "items": { "type": "string" },
                    "maxItems": max_hype_words
                }
            },
            "required": ["emotionScore", "hypeWords"],
            "additionalProperties": false
        })
    }

    /// Messages asking the prompt model to score `text`.
    pub fn prompt(text: &str, max_hype_words: usize) -> Vec<PromptMessage> {
        vec![
            PromptMessage::system(format!(
                "{SCORING_PROMPT} Return at most {max_hype_words} hypeWords."
            )),
            PromptMessage::user(text),
        ]
    }

    /// Read an assessment from prompt output and bring it into range.
    ///
    /// Text output may wrap the JSON object in prose or a code fence.
    pub fn parse(output: SessionOutput, max_hype_words: usize) -> Result<Self, CapabilityError> {
        let assessment: Self = match output {
            SessionOutput::Structured(value) => serde_json::from_value(value)
                .map_err(|e| CapabilityError::UnexpectedOutput(e.to_string()))?,
            SessionOutput::Text(text) => {
                let object = json_object(&text).ok_or_else(|| {
                    CapabilityError::UnexpectedOutput(format!("no JSON object in: {text}"))
                })?;
                serde_json::from_str(object)
                    .map_err(|e| CapabilityError::UnexpectedOutput(e.to_string()))?
            }
        };
        Ok(assessment.normalized(max_hype_words))
    }

    fn normalized(mut self, max_hype_words: usize) -> Self {
        self.emotion_score = self
            .emotion_score
            .clamp(EMOTION_SCORE_RANGE.0, EMOTION_SCORE_RANGE.1);
        self.hype_words = self
            .hype_words
            .into_iter()
            .map(|word| word.trim().to_string())
            .filter(|word| !word.is_empty())
            .take(max_hype_words)
            .collect();
        self
    }
}

fn json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_structured() {
        let output = SessionOutput::Structured(json!({
            "emotionScore": 8,
            "hypeWords": ["massive", "skyrocket", "unprecedented"]
        }));
        let assessment = BiasAssessment::parse(output, 3).unwrap();
        assert_eq!(assessment.emotion_score, 8);
        assert_eq!(assessment.hype_words, vec!["massive", "skyrocket", "unprecedented"]);
    }

    #[test]
    fn test_parse_fenced_text_and_normalize() {
        let output = SessionOutput::Text(
            "```json\n{\"emotionScore\": -42, \"hypeWords\": [\" doom \", \"\", \"chaos\", \"ruin\", \"panic\"]}\n```"
                .to_string(),
        );
        let assessment = BiasAssessment::parse(output, 3).unwrap();
        assert_eq!(assessment.emotion_score, -10);
        assert_eq!(assessment.hype_words, vec!["doom", "chaos", "ruin"]);
    }

    #[test]
    fn test_parse_rejects_prose() {
        let output = SessionOutput::Text("The text seems fairly neutral.".to_string());
        assert!(BiasAssessment::parse(output, 3).is_err());
    }

    #[test]
    fn test_schema_limits_hype_words() {
        let schema = BiasAssessment::response_schema(3);
        assert_eq!(schema["properties"]["hypeWords"]["maxItems"], 3);
        assert_eq!(schema["properties"]["emotionScore"]["minimum"], -10);
    }
}
