//! Event-driven markdown renderer.

use std::fmt::Write;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::html::{escape_html, rewrite_link};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Title extracted from first H1 heading (if title extraction was enabled).
    pub title: Option<String>,
}

/// Markdown to HTML renderer.
///
/// Handles block elements (headings, lists, definition lists, tables, code
/// blocks, blockquotes) and inline formatting. Footnotes and math are not
/// supported and are dropped.
pub struct MarkdownRenderer {
    output: String,
    gfm: bool,
    extract_title: bool,
    link_extension: Option<String>,
    title: Option<String>,
    /// Plain text of the H1 being captured as title.
    title_buffer: Option<String>,
    /// Language and collected source of the open code block.
    code_block: Option<(Option<String>, String)>,
    /// Source URL, title and collected alt text of the open image.
    image: Option<(String, String, String)>,
    table_alignments: Vec<Alignment>,
    table_cell: usize,
    in_table_head: bool,
}

impl MarkdownRenderer {
    /// Create a new renderer with GFM enabled by default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            gfm: true,
            extract_title: false,
            link_extension: None,
            title: None,
            title_buffer: None,
            code_block: None,
            image: None,
            table_alignments: Vec::new(),
            table_cell: 0,
            in_table_head: false,
        }
    }

    /// Enable title extraction from first H1 heading.
    ///
    /// The heading is still rendered.
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.extract_title = true;
        self
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Rewrite relative links to `.md` files to use the given extension.
    #[must_use]
    pub fn with_link_extension(mut self, extension: impl Into<String>) -> Self {
        self.link_extension = Some(extension.into());
        self
    }

    /// Get parser options based on GFM configuration.
    ///
    /// Definition lists are enabled regardless of GFM.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let mut options = Options::ENABLE_DEFINITION_LIST;
        if self.gfm {
            options |= Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM;
        }
        options
    }

    /// Render markdown text using the configured parser options.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        let parser = Parser::new_ext(markdown, self.parser_options());
        self.render(parser)
    }

    /// Render markdown events and return the result.
    pub fn render<'a, I>(&mut self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }

        RenderResult {
            html: std::mem::take(&mut self.output),
            title: self.title.take(),
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.output.push_str(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.output.push_str("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => {
                self.output.push_str(if checked {
                    r#"<input type="checkbox" disabled checked>"#
                } else {
                    r#"<input type="checkbox" disabled>"#
                });
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        // Alt text is plain: formatting inside an image is dropped
        if self.image.is_some() {
            return;
        }
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                if self.extract_title && self.title.is_none() && level == HeadingLevel::H1 {
                    self.title_buffer = Some(String::new());
                }
                let _ = write!(self.output, "<{level}>");
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
                self.code_block = Some((lang, String::new()));
            }
            Tag::List(Some(1)) => self.output.push_str("<ol>"),
            Tag::List(Some(start)) => {
                let _ = write!(self.output, r#"<ol start="{start}">"#);
            }
            Tag::List(None) => self.output.push_str("<ul>"),
            Tag::Item => self.output.push_str("<li>"),
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table_alignments = alignments;
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.in_table_head = true;
                self.table_cell = 0;
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table_cell = 0;
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let cell = if self.in_table_head { "th" } else { "td" };
                let style = match self.table_alignments.get(self.table_cell) {
                    Some(Alignment::Left) => r#" style="text-align: left""#,
                    Some(Alignment::Center) => r#" style="text-align: center""#,
                    Some(Alignment::Right) => r#" style="text-align: right""#,
                    Some(Alignment::None) | None => "",
                };
                let _ = write!(self.output, "<{cell}{style}>");
            }
            Tag::Emphasis => self.output.push_str("<em>"),
            Tag::Strong => self.output.push_str("<strong>"),
            Tag::Strikethrough => self.output.push_str("<s>"),
            Tag::Superscript => self.output.push_str("<sup>"),
            Tag::Subscript => self.output.push_str("<sub>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                let href = match &self.link_extension {
                    Some(extension) => rewrite_link(&dest_url, extension),
                    None => dest_url.to_string(),
                };
                let _ = write!(self.output, r#"<a href="{}""#, escape_html(&href));
                if !title.is_empty() {
                    let _ = write!(self.output, r#" title="{}""#, escape_html(&title));
                }
                self.output.push('>');
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image = Some((dest_url.to_string(), title.to_string(), String::new()));
            }
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        if self.image.is_some() && tag != TagEnd::Image {
            return;
        }
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(level) => {
                if let Some(title) = self.title_buffer.take() {
                    let title = title.trim();
                    if !title.is_empty() {
                        self.title = Some(title.to_owned());
                    }
                }
                let _ = write!(self.output, "</{level}>");
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>"),
            TagEnd::CodeBlock => {
                if let Some((lang, content)) = self.code_block.take() {
                    match lang {
                        Some(lang) => {
                            let _ = write!(
                                self.output,
                                r#"<pre><code class="language-{}">{}</code></pre>"#,
                                escape_html(&lang),
                                escape_html(&content)
                            );
                        }
                        None => {
                            let _ = write!(
                                self.output,
                                "<pre><code>{}</code></pre>",
                                escape_html(&content)
                            );
                        }
                    }
                }
            }
            TagEnd::List(ordered) => {
                self.output.push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => {
                self.table_alignments.clear();
                self.output.push_str("</tbody></table>");
            }
            TagEnd::TableHead => {
                self.in_table_head = false;
                self.output.push_str("</tr></thead><tbody>");
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output
                    .push_str(if self.in_table_head { "</th>" } else { "</td>" });
                self.table_cell += 1;
            }
            TagEnd::Emphasis => self.output.push_str("</em>"),
            TagEnd::Strong => self.output.push_str("</strong>"),
            TagEnd::Strikethrough => self.output.push_str("</s>"),
            TagEnd::Superscript => self.output.push_str("</sup>"),
            TagEnd::Subscript => self.output.push_str("</sub>"),
            TagEnd::Link => self.output.push_str("</a>"),
            TagEnd::Image => {
                if let Some((src, title, alt)) = self.image.take() {
                    let _ = write!(
                        self.output,
                        r#"<img src="{}" alt="{}""#,
                        escape_html(&src),
                        escape_html(&alt)
                    );
                    if !title.is_empty() {
                        let _ = write!(self.output, r#" title="{}""#, escape_html(&title));
                    }
                    self.output.push('>');
                }
            }
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some((_, content)) = &mut self.code_block {
            content.push_str(text);
            return;
        }
        if let Some((_, _, alt)) = &mut self.image {
            alt.push_str(text);
            return;
        }
        if let Some(title) = &mut self.title_buffer {
            title.push_str(text);
        }
        self.output.push_str(&escape_html(text));
    }

    fn inline_code(&mut self, code: &str) {
        if let Some((_, _, alt)) = &mut self.image {
            alt.push_str(code);
            return;
        }
        if let Some(title) = &mut self.title_buffer {
            title.push_str(code);
        }
        let _ = write!(self.output, "<code>{}</code>", escape_html(code));
    }

    fn soft_break(&mut self) {
        if let Some((_, _, alt)) = &mut self.image {
            alt.push(' ');
        } else {
            if let Some(title) = &mut self.title_buffer {
                title.push(' ');
            }
            self.output.push('\n');
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
