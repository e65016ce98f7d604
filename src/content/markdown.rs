//! Plain-text views of a markdown body (excerpts, word counts)
//!
//! The body itself is handed to the renderer untouched; these helpers only
//! read it. Code blocks are opaque and never contribute text.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Summaries derived from a markdown body
pub struct MarkdownSummary {
    separator: String,
}

impl MarkdownSummary {
    pub fn new(separator: &str) -> Self {
        Self {
            separator: separator.to_string(),
        }
    }

    /// Text before the excerpt separator, or the first paragraph
    pub fn excerpt(&self, markdown: &str) -> String {
        match split_excerpt(markdown, &self.separator) {
            (Some(excerpt), _) => plain_text(excerpt),
            (None, body) => first_paragraph(body),
        }
    }

    pub fn word_count(&self, markdown: &str) -> usize {
        count_words(&plain_text(markdown))
    }
}

impl Default for MarkdownSummary {
    fn default() -> Self {
        Self::new("<!-- more -->")
    }
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Split content by the excerpt separator
pub fn split_excerpt<'a>(content: &'a str, separator: &str) -> (Option<&'a str>, &'a str) {
    if separator.is_empty() {
        return (None, content);
    }
    match content.find(separator) {
        Some(pos) => (Some(content[..pos].trim()), content),
        None => (None, content),
    }
}

/// Text content with markup, code blocks and raw HTML removed
pub fn plain_text(markdown: &str) -> String {
    let mut text = String::new();
    let mut in_code_block = false;

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                push_break(&mut text);
            }
            Event::Text(t) | Event::Code(t) if !in_code_block => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => {
                push_break(&mut text)
            }
            _ => {}
        }
    }

    text.trim().to_string()
}

/// Plain text of the first paragraph
fn first_paragraph(markdown: &str) -> String {
    let mut text = String::new();
    let mut in_paragraph = false;

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(Tag::Paragraph) => in_paragraph = true,
            Event::End(TagEnd::Paragraph) if in_paragraph => break,
            Event::Text(t) | Event::Code(t) if in_paragraph => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak if in_paragraph => text.push(' '),
            _ => {}
        }
    }

    text.trim().to_string()
}

fn push_break(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

/// Count words; each CJK ideograph counts as one word
fn count_words(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;

    for c in text.chars() {
        if ('\u{4E00}'..='\u{9FFF}').contains(&c) {
            count += 1;
            in_word = false;
        } else if c.is_alphanumeric() {
            if !in_word {
                in_word = true;
                count += 1;
            }
        } else {
            in_word = false;
        }
    }

    count
}
