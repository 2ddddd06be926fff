use eds_viewer_engine::{
    BlockRow, Card, ContentNode, EdsConfig, EdsPage, HeroBlock, NodeKind, PageRenderer,
    SectionContainer, block_title, extract_plain_text, heading_text, parse_content_nodes,
    render_node, render_page,
};

/// A link the user can activate from the links panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub label: String,
    pub href: String,
}

/// Renders a page as plain text lines and collects its links in order.
#[derive(Debug, Default)]
pub struct TextRenderer {
    pub lines: Vec<String>,
    pub links: Vec<PageLink>,
    sections: usize,
}

impl TextRenderer {
    pub fn render(page: &EdsPage, config: &EdsConfig) -> Self {
        let mut renderer = Self::default();
        render_page(page, config, &mut renderer);
        while renderer.lines.last().is_some_and(|l| l.is_empty()) {
            renderer.lines.pop();
        }
        renderer
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn blank(&mut self) {
        if self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
    }

    fn add_link(&mut self, label: &str, href: &str) -> usize {
        self.links.push(PageLink {
            label: label.to_string(),
            href: href.to_string(),
        });
        self.links.len()
    }

    fn image_line(&mut self, alt: Option<&str>, url: Option<&str>) {
        if let Some(url) = url {
            match alt.filter(|a| !a.trim().is_empty()) {
                Some(alt) => self.push(format!("[image: {alt}] {url}")),
                None => self.push(format!("[image] {url}")),
            }
        }
    }

    /// Registers every link below `node`, however deeply nested, and returns
    /// the numbered markers for them.
    fn collect_inline_links(&mut self, node: &ContentNode) -> Vec<String> {
        let mut markers = Vec::new();
        for child in parse_content_nodes(node.content.as_ref()) {
            if child.is_link()
                && let Some(href) = child.href.as_deref()
            {
                let label = link_label(&child);
                let n = self.add_link(&label, href);
                markers.push(format!("[{n}]"));
            } else {
                markers.extend(self.collect_inline_links(&child));
            }
        }
        markers
    }
}

impl PageRenderer for TextRenderer {
    fn begin_section(&mut self, section: &SectionContainer) {
        if self.sections > 0 {
            self.blank();
            match section.style() {
                Some(style) => self.push(format!("──── {style} ────")),
                None => self.push("────"),
            }
        }
        self.sections += 1;
    }

    fn default_content(&mut self, node: &ContentNode, config: &EdsConfig) {
        match node.kind() {
            NodeKind::Heading => {
                if let Some(text) = heading_text(node) {
                    let hashes = "#".repeat(node.heading_level() as usize);
                    self.blank();
                    self.push(format!("{hashes} {text}"));
                }
            }
            NodeKind::Image => {
                let url = config.resolve_url(node.src.as_deref());
                self.image_line(node.alt.as_deref(), url.as_deref());
            }
            NodeKind::Link => {
                let label = link_label(node);
                match node.href.as_deref() {
                    Some(href) => {
                        let n = self.add_link(&label, href);
                        self.push(format!("{label} [{n}]"));
                    }
                    None => self.push(label),
                }
            }
            NodeKind::List => {
                let ordered = node.ordered.unwrap_or(false);
                for (i, item) in node.items.iter().flatten().enumerate() {
                    let text = item.text.as_deref().unwrap_or_default();
                    if ordered {
                        self.push(format!("{}. {text}", i + 1));
                    } else {
                        self.push(format!("• {text}"));
                    }
                }
            }
            _ => {
                let text = match &node.text {
                    Some(text) => text.clone(),
                    None => extract_plain_text(node.content.as_ref()),
                };
                let markers = self.collect_inline_links(node);
                let line = if markers.is_empty() {
                    text
                } else {
                    format!("{text} {}", markers.join(""))
                };
                if !line.trim().is_empty() {
                    self.push(line);
                }
                for image in parse_content_nodes(node.content.as_ref())
                    .iter()
                    .filter(|child| child.is_image())
                {
                    let url = config.resolve_url(image.src.as_deref());
                    self.image_line(image.alt.as_deref(), url.as_deref());
                }
            }
        }
    }

    fn hero(&mut self, hero: &HeroBlock) {
        self.blank();
        self.image_line(hero.image_alt.as_deref(), hero.image_url.as_deref());
        if let Some(title) = &hero.title {
            self.push(format!("== {title} =="));
        }
        if let Some(subtitle) = &hero.subtitle {
            self.push(subtitle.clone());
        }
        if let Some(cta) = &hero.cta {
            match cta.href.as_deref() {
                Some(href) => {
                    let n = self.add_link(&cta.label, href);
                    self.push(format!("[ {} ] [{n}]", cta.label));
                }
                None => self.push(format!("[ {} ]", cta.label)),
            }
        }
    }

    fn cards(&mut self, cards: &[Card]) {
        for card in cards {
            self.blank();
            self.image_line(card.image_alt.as_deref(), card.image_url.as_deref());
            if let Some(title) = &card.title {
                self.push(format!("* {title}"));
            }
            if let Some(body) = &card.body {
                for line in body.lines() {
                    self.push(format!("  {line}"));
                }
            }
            if let Some(link) = &card.link
                && let Some(href) = link.href.as_deref()
            {
                let n = self.add_link(&link.label, href);
                self.push(format!("  → {} [{n}]", link.label));
            }
        }
    }

    fn generic_block(&mut self, name: &str, rows: &[BlockRow], config: &EdsConfig) {
        self.blank();
        let title = block_title(name);
        if !title.is_empty() {
            self.push(format!("[{title}]"));
        }
        for row in rows {
            for column in &row.columns {
                for item in &column.items {
                    render_node(item, config, self);
                }
            }
            self.blank();
        }
    }

    fn end_group(&mut self) {
        self.blank();
    }
}

fn link_label(link: &ContentNode) -> String {
    match link.display_text() {
        Some(text) => text.to_string(),
        None => {
            let nested = extract_plain_text(link.content.as_ref());
            if nested.trim().is_empty() {
                link.href.clone().unwrap_or_default()
            } else {
                nested
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> EdsConfig {
        EdsConfig::new("https://example.com", "https://json.example.net/org/site").unwrap()
    }

    fn render(json: &str) -> TextRenderer {
        let page = EdsPage::from_json_str(json).unwrap();
        TextRenderer::render(&page, &config())
    }

    #[test]
    fn renders_default_content() {
        let out = render(
            r#"{"content": [{"section": [[
                {"type": "heading", "level": 2, "text": "Intro"},
                {"type": "paragraph", "content": ["Read ", {"type": "link", "href": "/docs", "text": "the docs"}, "."]},
                {"type": "list", "ordered": true, "items": [{"text": "One"}, {"text": "Two"}]},
                {"type": "image", "src": "/pic.png", "alt": "Pic"}
            ]]}]}"#,
        );

        assert_eq!(
            out.lines,
            vec![
                "## Intro",
                "Read the docs. [1]",
                "1. One",
                "2. Two",
                "[image: Pic] https://example.com/pic.png",
            ]
        );
        assert_eq!(
            out.links,
            vec![PageLink {
                label: "the docs".to_string(),
                href: "/docs".to_string(),
            }]
        );
    }

    #[test]
    fn renders_blocks_and_sections() {
        let out = render(
            r#"{"content": [
                {"section": [[{"type": "block", "name": "hero", "content": [[
                    [{"type": "image", "src": "/hero.png"}],
                    [{"type": "heading", "text": "Welcome"}, {"type": "link", "href": "https://other.org", "text": "Go"}]
                ]]}]]},
                {"metadata": {"style": "highlight"}, "section": [[
                    {"type": "block", "name": "cards", "content": [[[{"type": "paragraph", "text": "Card"}]]]},
                    {"type": "block", "name": "columns", "content": [[["Left"], ["Right"]]]}
                ]]}
            ]}"#,
        );

        assert_eq!(
            out.lines,
            vec![
                "[image] https://example.com/hero.png",
                "== Welcome ==",
                "[ Go ] [1]",
                "",
                "──── highlight ────",
                "",
                "* Card",
                "",
                "[Columns]",
                "Left",
                "Right",
            ]
        );
        assert_eq!(out.links.len(), 1);
        assert_eq!(out.links[0].href, "https://other.org");
    }

    #[test]
    fn link_label_falls_back_to_href() {
        let link = ContentNode {
            node_type: Some("link".to_string()),
            href: Some("/x".to_string()),
            ..ContentNode::default()
        };
        assert_eq!(link_label(&link), "/x");
    }
}
