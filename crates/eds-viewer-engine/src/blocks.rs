//! Block dispatch: turns parsed sections into calls on a [`PageRenderer`].
//!
//! Known blocks (`hero`, `cards`) are reduced to small view models so that
//! renderers on every platform agree on which image, title and link a block
//! shows. Unknown blocks are passed through as raw rows.

use crate::config::EdsConfig;
use crate::models::{BlockColumn, BlockRow, ContentNode, EdsPage, SectionContainer};
use crate::parsing::{extract_plain_text, parse_block_content};

/// Label used for a call-to-action link that carries no text.
pub const DEFAULT_CTA_LABEL: &str = "Learn More";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Hero(HeroVariant),
    Cards,
    Generic,
}

impl BlockType {
    /// Dispatch on the first word of the block name: `hero (small)` is a
    /// small hero, `cards` are cards, everything else is generic.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim().to_ascii_lowercase();
        let base = name
            .split(|c: char| !c.is_ascii_alphanumeric())
            .next()
            .unwrap_or_default();
        match base {
            "hero" => BlockType::Hero(HeroVariant::from_name(&name)),
            "cards" => BlockType::Cards,
            _ => BlockType::Generic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeroVariant {
    #[default]
    Default,
    Small,
    Large,
    Centered,
}

impl HeroVariant {
    pub fn from_name(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        if name.contains("small") {
            HeroVariant::Small
        } else if name.contains("large") {
            HeroVariant::Large
        } else if name.contains("center") {
            HeroVariant::Centered
        } else {
            HeroVariant::Default
        }
    }
}

/// A link rendered as a button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallToAction {
    pub label: String,
    /// Raw `href`, to be routed through [`crate::links::classify_link`].
    pub href: Option<String>,
}

impl CallToAction {
    pub fn from_link(link: &ContentNode) -> Self {
        Self {
            label: link
                .display_text()
                .unwrap_or(DEFAULT_CTA_LABEL)
                .to_string(),
            href: link.href.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeroBlock {
    pub variant: HeroVariant,
    pub image_url: Option<String>,
    pub image_alt: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub cta: Option<CallToAction>,
}

impl HeroBlock {
    /// Only the first row is used. The image comes from the first column,
    /// text and link from the second column, or the first when there is
    /// only one.
    pub fn from_rows(name: &str, rows: &[BlockRow], config: &EdsConfig) -> Self {
        let first_row = rows.first();
        let image_column = first_row.and_then(BlockRow::first_column);
        let text_column = first_row.and_then(|row| row.second_column().or(row.first_column()));

        let image = image_column.and_then(BlockColumn::first_image);
        let mut texts = text_column.map(column_texts).unwrap_or_default().into_iter();

        Self {
            variant: HeroVariant::from_name(name),
            image_url: config.resolve_url(image.as_ref().and_then(|i| i.src.as_deref())),
            image_alt: image.and_then(|i| i.alt),
            title: texts.next(),
            subtitle: texts.next(),
            cta: text_column
                .and_then(BlockColumn::first_link)
                .map(|link| CallToAction::from_link(&link)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Card {
    pub image_url: Option<String>,
    pub image_alt: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub link: Option<CallToAction>,
}

impl Card {
    /// One card per row, with the same column convention as [`HeroBlock`].
    pub fn from_row(row: &BlockRow, config: &EdsConfig) -> Self {
        let image = row.first_column().and_then(BlockColumn::first_image);
        let text_column = row.second_column().or(row.first_column());
        let mut texts = text_column.map(column_texts).unwrap_or_default();

        let title = (!texts.is_empty()).then(|| texts.remove(0));
        let body = (!texts.is_empty()).then(|| texts.join("\n"));

        Self {
            image_url: config.resolve_url(image.as_ref().and_then(|i| i.src.as_deref())),
            image_alt: image.and_then(|i| i.alt),
            title,
            body,
            link: text_column
                .and_then(BlockColumn::first_link)
                .map(|link| CallToAction::from_link(&link)),
        }
    }
}

// Text of each text item, skipping items that flatten to nothing (a
// paragraph wrapping only a picture, for instance).
fn column_texts(column: &BlockColumn) -> Vec<String> {
    column
        .text_items()
        .into_iter()
        .map(|item| match &item.text {
            Some(text) => text.clone(),
            None => extract_plain_text(item.content.as_ref()),
        })
        .filter(|text| !text.trim().is_empty())
        .collect()
}

/// Block name for display: first letter upper-cased.
pub fn block_title(name: &str) -> String {
    let mut chars = name.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Consumer of a dispatched page. Implemented by each front end.
pub trait PageRenderer {
    fn begin_section(&mut self, _section: &SectionContainer) {}

    /// A node outside any block: heading, paragraph, image, list, ...
    fn default_content(&mut self, node: &ContentNode, config: &EdsConfig);

    fn hero(&mut self, hero: &HeroBlock);

    fn cards(&mut self, cards: &[Card]);

    fn generic_block(&mut self, name: &str, rows: &[BlockRow], config: &EdsConfig);

    fn end_group(&mut self) {}

    fn end_section(&mut self) {}
}

/// Walk a page in order, dispatching each node.
pub fn render_page<R: PageRenderer + ?Sized>(page: &EdsPage, config: &EdsConfig, renderer: &mut R) {
    for section in &page.content {
        renderer.begin_section(section);
        for group in &section.section {
            for node in group {
                render_node(node, config, renderer);
            }
            renderer.end_group();
        }
        renderer.end_section();
    }
}

pub fn render_node<R: PageRenderer + ?Sized>(
    node: &ContentNode,
    config: &EdsConfig,
    renderer: &mut R,
) {
    if !node.is_block() {
        renderer.default_content(node, config);
        return;
    }

    let name = node.block_name();
    let rows = parse_block_content(node.content.as_ref());
    match BlockType::from_name(name) {
        BlockType::Hero(_) => renderer.hero(&HeroBlock::from_rows(name, &rows, config)),
        BlockType::Cards => {
            let cards: Vec<Card> = rows.iter().map(|row| Card::from_row(row, config)).collect();
            renderer.cards(&cards);
        }
        BlockType::Generic => renderer.generic_block(name, &rows, config),
    }
}
