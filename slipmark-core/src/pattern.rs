//! Shortcut grammar
//!
//! Recognizes the markdown shortcuts typed while editing. The grammar is a
//! table of rules built once from [`AutoformatOptions`]; each inline rule has
//! a pattern anchored at the end of the probe, an optional guard that vetoes
//! the match when found anywhere in the probe, and the key that completes it.
//!
//! Inline rules are evaluated in precedence order and the first accepted
//! match wins:
//!
//! | shortcut          | pattern         | guard (rejects)    | trigger      |
//! |-------------------|-----------------|--------------------|--------------|
//! | `link`            | `[text](href)`  |                    | space, enter |
//! | `code`            | `` `text` ``    | 2+ backticks       | `` ` ``      |
//! | `italic`          | `*text*`        | 2+ asterisks       | `*`          |
//! | `underline`       | `_text_`        | 2+ underscores     | `_`          |
//! | `bold`            | `**text**`      | 3+ asterisks       | `*`          |
//! | `bold_underscore` | `__text__`      | 3+ underscores     | `_`          |
//! | `strike`          | `~~text~~`      | 3+ tildes          | `~`          |
//!
//! Block prefixes match the whole whitespace-stripped text left of the cursor:
//! `#` to `######`, `>`, `+`, and a leading run of two or more backticks.

use crate::error::GrammarError;
use crate::model::{BlockType, Delimiter, InlineType};
use regex::Regex;

/// Names accepted in [`AutoformatOptions::disabled`].
pub const SHORTCUT_NAMES: &[&str] = &[
    "heading",
    "block-quote",
    "list-item",
    "code-block",
    "link",
    "code",
    "italic",
    "underline",
    "bold",
    "bold_underscore",
    "strike",
];

const LINK_PATTERN: &str =
    r"\[([^\[\]]+)\]\(([A-Za-z0-9\-._~:/?#\[\]@!$&'()*+,;=]+)\)$";
const CODE_FENCE_PATTERN: &str = r"^`{2,}";

/// An inline shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shortcut {
    Link,
    Code,
    Italic(Delimiter),
    Bold(Delimiter),
    Strike,
}

impl Shortcut {
    pub fn name(self) -> &'static str {
        match self {
            Shortcut::Link => "link",
            Shortcut::Code => "code",
            Shortcut::Italic(Delimiter::Asterisk) => "italic",
            Shortcut::Italic(Delimiter::Underscore) => "underline",
            Shortcut::Bold(Delimiter::Asterisk) => "bold",
            Shortcut::Bold(Delimiter::Underscore) => "bold_underscore",
            Shortcut::Strike => "strike",
        }
    }

    /// The inline node this shortcut produces.
    pub fn inline_type(self) -> InlineType {
        match self {
            Shortcut::Link => InlineType::Link,
            Shortcut::Code => InlineType::Code,
            Shortcut::Italic(delimiter) => InlineType::Italic(delimiter),
            Shortcut::Bold(delimiter) => InlineType::Bold(delimiter),
            Shortcut::Strike => InlineType::Strike,
        }
    }

    /// The key that completes this shortcut.
    pub fn trigger(self) -> Trigger {
        match self {
            Shortcut::Link => Trigger::Boundary,
            Shortcut::Code => Trigger::Char('`'),
            Shortcut::Italic(delimiter) | Shortcut::Bold(delimiter) => {
                Trigger::Char(delimiter.as_char())
            }
            Shortcut::Strike => Trigger::Char('~'),
        }
    }
}

/// What completes an inline shortcut: a word boundary (space or enter) or a
/// typed character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Boundary,
    Char(char),
}

/// The pieces of a matched inline shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutMatch {
    /// The whole literal, delimiters included.
    pub matched: String,
    /// The text between the delimiters (the label, for links).
    pub text: String,
    pub href: Option<String>,
}

/// Which shortcuts the grammar recognizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoformatOptions {
    pub block_prefixes: bool,
    pub inline_delimiters: bool,
    /// Shortcut names (see [`SHORTCUT_NAMES`]) to leave unrecognized.
    pub disabled: Vec<String>,
}

impl Default for AutoformatOptions {
    fn default() -> Self {
        AutoformatOptions {
            block_prefixes: true,
            inline_delimiters: true,
            disabled: Vec::new(),
        }
    }
}

impl AutoformatOptions {
    fn enabled(&self, name: &str) -> bool {
        !self.disabled.iter().any(|d| d == name)
    }
}

#[derive(Debug, Clone)]
struct Rule {
    shortcut: Shortcut,
    pattern: Regex,
    guard: Option<Regex>,
}

impl Rule {
    fn new(shortcut: Shortcut, pattern: &str, guard: Option<&str>) -> Result<Self, GrammarError> {
        let compile = |source: &str| {
            Regex::new(source).map_err(|source| GrammarError::Pattern {
                shortcut: shortcut.name(),
                source,
            })
        };
        Ok(Rule {
            shortcut,
            pattern: compile(pattern)?,
            guard: guard.map(compile).transpose()?,
        })
    }

    fn accepts(&self, probe: &str) -> bool {
        self.pattern.is_match(probe) && !self.guard.as_ref().is_some_and(|g| g.is_match(probe))
    }
}

/// The compiled shortcut table.
#[derive(Debug, Clone)]
pub struct Grammar {
    inline: Vec<Rule>,
    block_prefixes: bool,
    disabled_blocks: Vec<String>,
    code_fence: Regex,
}

impl Grammar {
    pub fn new(options: &AutoformatOptions) -> Result<Self, GrammarError> {
        if let Some(unknown) = options
            .disabled
            .iter()
            .find(|name| !SHORTCUT_NAMES.contains(&name.as_str()))
        {
            return Err(GrammarError::UnknownShortcut(unknown.clone()));
        }

        let table: [(Shortcut, &str, Option<&str>); 7] = [
            (Shortcut::Link, LINK_PATTERN, None),
            (Shortcut::Code, r"`([^`]+)`$", Some(r"`{2,}")),
            (Shortcut::Italic(Delimiter::Asterisk), r"\*([^*]+)\*$", Some(r"\*{2,}")),
            (Shortcut::Italic(Delimiter::Underscore), r"_([^_]+)_$", Some(r"_{2,}")),
            (Shortcut::Bold(Delimiter::Asterisk), r"\*\*([^*]+)\*\*$", Some(r"\*{3,}")),
            (Shortcut::Bold(Delimiter::Underscore), r"__([^_]+)__$", Some(r"_{3,}")),
            (Shortcut::Strike, r"~~([^~]+)~~$", Some(r"~{3,}")),
        ];

        let mut inline = Vec::new();
        if options.inline_delimiters {
            for (shortcut, pattern, guard) in table {
                if options.enabled(shortcut.name()) {
                    inline.push(Rule::new(shortcut, pattern, guard)?);
                }
            }
        }

        let code_fence = Regex::new(CODE_FENCE_PATTERN).map_err(|source| GrammarError::Pattern {
            shortcut: "code-block",
            source,
        })?;

        Ok(Grammar {
            inline,
            block_prefixes: options.block_prefixes,
            disabled_blocks: options.disabled.clone(),
            code_fence,
        })
    }

    /// The first inline shortcut, in precedence order, that `chars` completes.
    pub fn get_type(&self, chars: &str) -> Option<Shortcut> {
        self.inline
            .iter()
            .find(|rule| rule.accepts(chars))
            .map(|rule| rule.shortcut)
    }

    /// Like [`Grammar::get_type`], restricted to shortcuts completed by
    /// `trigger`.
    pub fn classify(&self, probe: &str, trigger: Trigger) -> Option<Shortcut> {
        self.inline
            .iter()
            .filter(|rule| rule.shortcut.trigger() == trigger)
            .find(|rule| rule.accepts(probe))
            .map(|rule| rule.shortcut)
    }

    /// Extract the text (and href) of `shortcut` at the end of `chars`.
    pub fn get_data(&self, chars: &str, shortcut: Shortcut) -> Option<ShortcutMatch> {
        let rule = self.inline.iter().find(|rule| rule.shortcut == shortcut)?;
        let captures = rule.pattern.captures(chars)?;
        let matched = captures.get(0)?.as_str().to_string();
        let text = captures.get(1)?.as_str().to_string();
        let href = match shortcut {
            Shortcut::Link => Some(captures.get(2)?.as_str().to_string()),
            _ => None,
        };
        Some(ShortcutMatch {
            matched,
            text,
            href,
        })
    }

    /// The block type a prefix shortcut stands for. `chars` must already be
    /// stripped of whitespace.
    pub fn block_prefix_type(&self, chars: &str) -> Option<BlockType> {
        if !self.block_prefixes {
            return None;
        }
        let (name, ty) = if self.code_fence.is_match(chars) {
            ("code-block", BlockType::CodeBlock)
        } else {
            match chars {
                ">" => ("block-quote", BlockType::BlockQuote),
                "+" => ("list-item", BlockType::ListItem),
                _ if !chars.is_empty() && chars.chars().all(|c| c == '#') => {
                    let level = u8::try_from(chars.len()).ok()?;
                    ("heading", BlockType::heading(level)?)
                }
                _ => return None,
            }
        };
        (!self.disabled_blocks.iter().any(|d| d == name)).then_some(ty)
    }
}
