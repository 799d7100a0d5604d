//! Prompt templates with named `{placeholder}` tokens.
//!
//! Rendering is a single left-to-right pass over the template text. Values are
//! copied into the output verbatim and never scanned again, so user input that
//! happens to contain braces cannot expand into another placeholder.
//!
//! `{{` and `}}` render as literal braces.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Template '{template}' references '{{{name}}}' but no value was supplied")]
    MissingValue { template: &'static str, name: String },

    #[error("Template '{template}' has an unclosed placeholder at byte {position}")]
    UnclosedPlaceholder {
        template: &'static str,
        position: usize,
    },

    #[error("Template '{template}' has an empty placeholder at byte {position}")]
    EmptyPlaceholder {
        template: &'static str,
        position: usize,
    },
}

/// Placeholder name → value for a single render.
#[derive(Debug, Default, Clone)]
pub struct RenderContext<'a> {
    values: HashMap<&'a str, &'a str>,
}

impl<'a> RenderContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. A later value for the same name wins.
    pub fn with(mut self, name: &'a str, value: &'a str) -> Self {
        self.values.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.values.get(name).copied()
    }
}

/// An immutable instruction template. Identity is its `name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub content: &'static str,
}

/// One lexical piece of a template.
enum Segment<'t> {
    Text(&'t str),
    Brace(char),
    Placeholder(&'t str),
}

impl PromptTemplate {
    pub const fn new(name: &'static str, content: &'static str) -> Self {
        Self { name, content }
    }

    /// Names of every placeholder the template references, in order of first use.
    pub fn placeholders(&self) -> Result<Vec<&'static str>, TemplateError> {
        let mut names: Vec<&'static str> = Vec::new();
        for segment in self.segments()? {
            if let Segment::Placeholder(name) = segment {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        Ok(names)
    }

    /// Substitutes every placeholder from `ctx`. Fails if any is missing.
    pub fn render(&self, ctx: &RenderContext<'_>) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.content.len());
        for segment in self.segments()? {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Brace(c) => out.push(c),
                Segment::Placeholder(name) => {
                    let value = ctx.get(name).ok_or_else(|| TemplateError::MissingValue {
                        template: self.name,
                        name: name.to_string(),
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }

    fn segments(&self) -> Result<Vec<Segment<'static>>, TemplateError> {
        let src: &'static str = self.content;
        let bytes = src.as_bytes();
        let mut segments = Vec::new();
        let mut text_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'{' if bytes.get(i + 1) == Some(&b'{') => {
                    segments.push(Segment::Text(&src[text_start..i]));
                    segments.push(Segment::Brace('{'));
                    i += 2;
                    text_start = i;
                }
                b'}' if bytes.get(i + 1) == Some(&b'}') => {
                    segments.push(Segment::Text(&src[text_start..i]));
                    segments.push(Segment::Brace('}'));
                    i += 2;
                    text_start = i;
                }
                b'{' => {
                    let close = src[i + 1..].find('}').map(|off| i + 1 + off).ok_or(
                        TemplateError::UnclosedPlaceholder {
                            template: self.name,
                            position: i,
                        },
                    )?;
                    let name = src[i + 1..close].trim();
                    if name.is_empty() {
                        return Err(TemplateError::EmptyPlaceholder {
                            template: self.name,
                            position: i,
                        });
                    }
                    segments.push(Segment::Text(&src[text_start..i]));
                    segments.push(Segment::Placeholder(name));
                    i = close + 1;
                    text_start = i;
                }
                _ => i += 1,
            }
        }
        segments.push(Segment::Text(&src[text_start..]));
        Ok(segments)
    }
}
