/// Markdown to block model.
///
/// `pulldown-cmark` events are folded into a flat list of [`Block`]s that
/// the viewer widget lays out one by one. Only the subset the viewer can
/// draw is kept: headings, paragraphs, list items, code, quotes, rules and
/// a handful of inline styles. Everything else degrades to plain text.
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

/// One run of inline text with uniform styling.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub text: String,
    pub strong: bool,
    pub emphasis: bool,
    pub strikethrough: bool,
    pub code: bool,
    /// Link target, if this span is link text.
    pub link: Option<String>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `level` is 1..=6.
    Heading { level: u8, spans: Vec<Span> },
    Paragraph(Vec<Span>),
    /// A list item's text. `depth` is 0 for top-level lists; `marker` is
    /// `•`, an ordinal like `3.`, a task box, or empty for a continuation
    /// paragraph of the same item.
    ListItem {
        depth: usize,
        marker: String,
        spans: Vec<Span>,
    },
    Code {
        language: Option<String>,
        text: String,
    },
    /// Paragraph text inside a block quote.
    Quote { depth: usize, spans: Vec<Span> },
    Rule,
}

/// Parse `source` into blocks.
pub fn parse(source: &str) -> Vec<Block> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut builder = BlockBuilder::default();
    for event in Parser::new_ext(source, options) {
        builder.push(event);
    }
    builder.finish()
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    spans: Vec<Span>,

    strong: u32,
    emphasis: u32,
    strikethrough: u32,
    link: Option<String>,

    heading: Option<u8>,
    quote_depth: usize,
    /// One entry per open list: the next ordinal, or `None` if unordered.
    lists: Vec<Option<u64>>,
    item_marker: Option<String>,
    /// Open code block: language and accumulated text.
    code: Option<(Option<String>, String)>,
}

impl BlockBuilder {
    fn push(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => match &mut self.code {
                Some((_, body)) => body.push_str(&text),
                None => self.push_text(&text, false),
            },
            Event::Code(text) => self.push_text(&text, true),
            Event::Html(text) | Event::InlineHtml(text) => self.push_text(&text, false),
            Event::SoftBreak => self.push_text(" ", false),
            Event::HardBreak => self.push_text("\n", false),
            Event::Rule => {
                self.flush();
                self.blocks.push(Block::Rule);
            }
            Event::TaskListMarker(checked) => {
                self.item_marker = Some(if checked { "☑" } else { "☐" }.to_string());
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush();
                self.heading = Some(level as u8);
            }
            Tag::BlockQuote(_) => {
                self.flush();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_string),
                    CodeBlockKind::Indented => None,
                };
                self.code = Some((language, String::new()));
            }
            Tag::List(first) => {
                self.flush();
                self.lists.push(first);
            }
            Tag::Item => {
                self.flush();
                let marker = match self.lists.last_mut() {
                    Some(Some(next)) => {
                        let marker = format!("{next}.");
                        *next += 1;
                        marker
                    }
                    _ => "•".to_string(),
                };
                self.item_marker = Some(marker);
            }
            Tag::Emphasis => self.emphasis += 1,
            Tag::Strong => self.strong += 1,
            Tag::Strikethrough => self.strikethrough += 1,
            Tag::Link { dest_url, .. } => self.link = Some(dest_url.to_string()),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph | TagEnd::Item => self.flush(),
            TagEnd::Heading(_) => {
                self.flush();
                self.heading = None;
            }
            TagEnd::BlockQuote(_) => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            TagEnd::CodeBlock => {
                if let Some((language, mut text)) = self.code.take() {
                    if text.ends_with('\n') {
                        text.pop();
                    }
                    self.blocks.push(Block::Code { language, text });
                }
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
            }
            TagEnd::Emphasis => self.emphasis = self.emphasis.saturating_sub(1),
            TagEnd::Strong => self.strong = self.strong.saturating_sub(1),
            TagEnd::Strikethrough => self.strikethrough = self.strikethrough.saturating_sub(1),
            TagEnd::Link => self.link = None,
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str, code: bool) {
        let span = Span {
            text: text.to_string(),
            strong: self.strong > 0,
            emphasis: self.emphasis > 0,
            strikethrough: self.strikethrough > 0,
            code,
            link: self.link.clone(),
        };
        // Merge with the previous span when the styling matches.
        if let Some(last) = self.spans.last_mut() {
            if same_style(last, &span) {
                last.text.push_str(&span.text);
                return;
            }
        }
        self.spans.push(span);
    }

    /// Close the current inline run as a block of the enclosing kind.
    fn flush(&mut self) {
        if self.spans.is_empty() {
            return;
        }
        let spans = std::mem::take(&mut self.spans);
        let block = if let Some(level) = self.heading {
            Block::Heading { level, spans }
        } else if !self.lists.is_empty() {
            Block::ListItem {
                depth: self.lists.len() - 1,
                marker: self.item_marker.take().unwrap_or_default(),
                spans,
            }
        } else if self.quote_depth > 0 {
            Block::Quote {
                depth: self.quote_depth,
                spans,
            }
        } else {
            Block::Paragraph(spans)
        };
        self.blocks.push(block);
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }
}

fn same_style(a: &Span, b: &Span) -> bool {
    a.strong == b.strong
        && a.emphasis == b.emphasis
        && a.strikethrough == b.strikethrough
        && a.code == b.code
        && a.link == b.link
}

/// Concatenated text of a block, for tests and accessibility output.
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}
