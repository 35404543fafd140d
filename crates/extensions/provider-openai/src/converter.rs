//! Session config and request conversion for the chat API.

use quell_protocols::capability::{
    PromptRole, RewriteLength, RewriteTone, SummaryLength, SummaryType, TextFormat,
};
use quell_protocols::{SessionConfig, SessionInput, SessionRequest};

use crate::api::ApiMessage;

/// Build the system instruction that turns a chat model into `config`'s capability.
pub fn system_instruction(config: &SessionConfig) -> Option<String> {
    match config {
        SessionConfig::Prompt(options) => options.system_prompt.clone(),
        SessionConfig::Rewrite(options) => {
            let mut text = String::from(
                "You rewrite the text you are given. Reply with the rewritten text only.",
            );
            push_clause(&mut text, tone_clause(options.tone));
            push_clause(&mut text, rewrite_length_clause(options.length));
            push_clause(&mut text, format_clause(options.format));
            if let Some(context) = &options.shared_context {
                push_clause(&mut text, Some(context.as_str()));
            }
            Some(text)
        }
        SessionConfig::Proofread(options) => {
            let mut text = String::from(
                "Correct spelling, grammar and punctuation in the text you are given \
                 without changing its meaning or tone. Reply with the corrected text only.",
            );
            if !options.expected_input_languages.is_empty() {
                push_clause(
                    &mut text,
                    Some(
                        format!(
                            "The text is written in: {}.",
                            options.expected_input_languages.join(", ")
                        )
                        .as_str(),
                    ),
                );
            }
            Some(text)
        }
        SessionConfig::Summarize(options) => {
            let mut text = String::from("Summarize the text you are given.");
            push_clause(&mut text, Some(summary_clause(options.summary_type, options.length)));
            push_clause(&mut text, format_clause(options.format));
            if let Some(context) = &options.shared_context {
                push_clause(&mut text, Some(context.as_str()));
            }
            Some(text)
        }
    }
}

/// Convert one invocation into chat messages.
pub fn convert_request(config: &SessionConfig, request: &SessionRequest) -> Vec<ApiMessage> {
    let mut messages = Vec::new();
    if let Some(instruction) = system_instruction(config) {
        messages.push(ApiMessage::new("system", instruction));
    }
    if let Some(context) = &request.context {
        messages.push(ApiMessage::new("system", context.as_str()));
    }

    match &request.input {
        SessionInput::Text(text) => messages.push(ApiMessage::new("user", text.as_str())),
        SessionInput::Messages(prompt) => {
            messages.extend(prompt.iter().map(|message| {
                let role = match message.role {
                    PromptRole::System => "system",
                    PromptRole::User => "user",
                    PromptRole::Assistant => "assistant",
                };
                ApiMessage::new(role, message.content.as_str())
            }));
        }
    }
    messages
}

fn push_clause(text: &mut String, clause: Option<&str>) {
    if let Some(clause) = clause {
        text.push(' ');
        text.push_str(clause);
    }
}

fn tone_clause(tone: RewriteTone) -> Option<&'static str> {
    match tone {
        RewriteTone::AsIs => None,
        RewriteTone::MoreFormal => Some("Use a more formal tone."),
        RewriteTone::MoreCasual => Some("Use a more casual tone."),
    }
}

fn rewrite_length_clause(length: RewriteLength) -> Option<&'static str> {
    match length {
        RewriteLength::AsIs => Some("Keep roughly the same length."),
        RewriteLength::Shorter => Some("Make it shorter."),
        RewriteLength::Longer => Some("Make it longer."),
    }
}

fn format_clause(format: TextFormat) -> Option<&'static str> {
    match format {
        TextFormat::AsIs => None,
        TextFormat::PlainText => Some("Use plain text without markdown."),
        TextFormat::Markdown => Some("Use markdown."),
    }
}

fn summary_clause(summary_type: SummaryType, length: SummaryLength) -> &'static str {
    match (summary_type, length) {
        (SummaryType::KeyPoints, SummaryLength::Short) => {
            "List the 3 most important points, one per line, each starting with \"- \"."
        }
        (SummaryType::KeyPoints, SummaryLength::Medium) => {
            "List the 5 most important points, one per line, each starting with \"- \"."
        }
        (SummaryType::KeyPoints, SummaryLength::Long) => {
            "List the 7 most important points, one per line, each starting with \"- \"."
        }
        (SummaryType::Tldr, SummaryLength::Short) => "Write a one-sentence summary.",
        (SummaryType::Tldr, _) => "Write a short paragraph summary.",
        (SummaryType::Teaser, _) => "Write an engaging teaser that invites reading the full text.",
        (SummaryType::Headline, _) => "Write a single headline.",
    }
}
