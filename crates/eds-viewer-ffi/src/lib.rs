//! UniFFI bindings for eds-viewer mobile apps
//!
//! Exposes page parsing, block dispatch and link routing to the Kotlin and
//! Swift front ends. Pages are flattened into plain records so the host
//! only has to lay out a list of items per section.

use eds_viewer_engine::{
    BlockRow, CallToAction, Card, ContentNode, DEFAULT_CONTENT_URL, EdsConfig, EdsPage, HeroBlock,
    HeroVariant, LinkAction, NodeKind, PageRenderer, Route, SectionContainer, block_title,
    extract_plain_text, heading_text, render_node, render_page,
};

uniffi::setup_scaffolding!();

// ============ Errors ============

/// Errors that can cross the FFI boundary
/// Note: Field is named `reason` not `message` to avoid conflict with Throwable.message in Kotlin
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("Parse error: {reason}")]
    ParseError { reason: String },

    #[error("Invalid site URL: {reason}")]
    InvalidSite { reason: String },
}

fn site_config(site_url: &str) -> Result<EdsConfig, FfiError> {
    EdsConfig::new(site_url, DEFAULT_CONTENT_URL).map_err(|e| FfiError::InvalidSite {
        reason: e.to_string(),
    })
}

// ============ Page Handle ============

/// A parsed page bound to the site it was fetched from.
///
/// Immutable once built, so no locking is needed across threads.
#[derive(uniffi::Object)]
pub struct PageHandle {
    page: EdsPage,
    config: EdsConfig,
}

#[uniffi::export]
impl PageHandle {
    /// Parse page JSON as served by the HTML-to-JSON service.
    #[uniffi::constructor]
    pub fn from_json(json: String, site_url: String) -> Result<Self, FfiError> {
        let config = site_config(&site_url)?;
        let page = EdsPage::from_json_str(&json).map_err(|e| FfiError::ParseError {
            reason: e.to_string(),
        })?;
        Ok(Self { page, config })
    }

    pub fn title(&self) -> Option<String> {
        self.page.title().map(str::to_string)
    }

    pub fn description(&self) -> Option<String> {
        self.page.metadata.description().map(str::to_string)
    }

    /// The page as a list of sections, each a flat list of render items.
    pub fn sections(&self) -> Vec<SectionDto> {
        let mut collector = SectionCollector::default();
        render_page(&self.page, &self.config, &mut collector);
        collector.sections
    }
}

// ============ DTOs ============

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct SectionDto {
    /// Section style from the section metadata, e.g. "highlight"
    pub style: Option<String>,
    pub items: Vec<RenderItemDto>,
}

/// A single renderable item.
///
/// `kind` is one of "heading", "paragraph", "image", "link", "list",
/// "hero", "card" or "block". Fields that don't apply to a kind are empty.
#[derive(Debug, Clone, PartialEq, Default, uniffi::Record)]
pub struct RenderItemDto {
    pub kind: String,
    /// Heading/paragraph text, link label, hero/card title, block title
    pub text: Option<String>,
    /// Hero subtitle or card body
    pub secondary_text: Option<String>,
    /// Heading level (1-6) if this is a heading, 0 otherwise
    pub heading_level: u8,
    /// Absolute image URL
    pub image_url: Option<String>,
    pub image_alt: Option<String>,
    /// Raw link target; pass it to [`classify_link`] when tapped
    pub href: Option<String>,
    /// Label for `href` on heroes and cards
    pub link_label: Option<String>,
    /// Hero variant: "default", "small", "large" or "centered"
    pub variant: Option<String>,
    pub list_items: Vec<String>,
    pub ordered: bool,
}

impl RenderItemDto {
    fn with_kind(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            ..Self::default()
        }
    }

    fn with_link(mut self, link: Option<&CallToAction>) -> Self {
        if let Some(link) = link {
            self.link_label = Some(link.label.clone());
            self.href = link.href.clone();
        }
        self
    }
}

/// What the host should do with a tapped link.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct LinkActionDto {
    /// "anchor", "external" or "navigate"
    pub kind: String,
    /// Fragment for anchors, full URL for external links, site path
    /// ("" for home) for navigation
    pub target: String,
}

impl LinkActionDto {
    fn from_engine(action: LinkAction) -> Self {
        let (kind, target) = match action {
            LinkAction::Anchor(fragment) => ("anchor", fragment),
            LinkAction::External(url) => ("external", url),
            LinkAction::Navigate(Route::Home) => ("navigate", String::new()),
            LinkAction::Navigate(Route::Page(path)) => ("navigate", path),
        };
        Self {
            kind: kind.to_string(),
            target,
        }
    }
}

// ============ Renderer ============

#[derive(Default)]
struct SectionCollector {
    sections: Vec<SectionDto>,
}

impl SectionCollector {
    fn push(&mut self, item: RenderItemDto) {
        // render_page always opens a section first; this only guards direct use
        if self.sections.is_empty() {
            self.sections.push(SectionDto {
                style: None,
                items: Vec::new(),
            });
        }
        if let Some(section) = self.sections.last_mut() {
            section.items.push(item);
        }
    }
}

impl PageRenderer for SectionCollector {
    fn begin_section(&mut self, section: &SectionContainer) {
        self.sections.push(SectionDto {
            style: section.style().map(str::to_string),
            items: Vec::new(),
        });
    }

    fn default_content(&mut self, node: &ContentNode, config: &EdsConfig) {
        let item = match node.kind() {
            NodeKind::Heading => {
                let Some(text) = heading_text(node) else {
                    return;
                };
                RenderItemDto {
                    text: Some(text),
                    heading_level: node.heading_level(),
                    ..RenderItemDto::with_kind("heading")
                }
            }
            NodeKind::Image => RenderItemDto {
                image_url: config.resolve_url(node.src.as_deref()),
                image_alt: node.alt.clone(),
                ..RenderItemDto::with_kind("image")
            },
            NodeKind::Link => RenderItemDto {
                text: node.display_text().map(str::to_string),
                href: node.href.clone(),
                ..RenderItemDto::with_kind("link")
            },
            NodeKind::List => RenderItemDto {
                list_items: node
                    .items
                    .iter()
                    .flatten()
                    .filter_map(|item| item.text.clone())
                    .collect(),
                ordered: node.ordered.unwrap_or(false),
                ..RenderItemDto::with_kind("list")
            },
            _ => {
                let text = match &node.text {
                    Some(text) => text.clone(),
                    None => extract_plain_text(node.content.as_ref()),
                };
                if text.trim().is_empty() {
                    return;
                }
                RenderItemDto {
                    text: Some(text),
                    ..RenderItemDto::with_kind("paragraph")
                }
            }
        };
        self.push(item);
    }

    fn hero(&mut self, hero: &HeroBlock) {
        let variant = match hero.variant {
            HeroVariant::Default => "default",
            HeroVariant::Small => "small",
            HeroVariant::Large => "large",
            HeroVariant::Centered => "centered",
        };
        let item = RenderItemDto {
            text: hero.title.clone(),
            secondary_text: hero.subtitle.clone(),
            image_url: hero.image_url.clone(),
            image_alt: hero.image_alt.clone(),
            variant: Some(variant.to_string()),
            ..RenderItemDto::with_kind("hero")
        };
        self.push(item.with_link(hero.cta.as_ref()));
    }

    fn cards(&mut self, cards: &[Card]) {
        for card in cards {
            let item = RenderItemDto {
                text: card.title.clone(),
                secondary_text: card.body.clone(),
                image_url: card.image_url.clone(),
                image_alt: card.image_alt.clone(),
                ..RenderItemDto::with_kind("card")
            };
            self.push(item.with_link(card.link.as_ref()));
        }
    }

    fn generic_block(&mut self, name: &str, rows: &[BlockRow], config: &EdsConfig) {
        self.push(RenderItemDto {
            text: Some(block_title(name)),
            ..RenderItemDto::with_kind("block")
        });
        for row in rows {
            for column in &row.columns {
                for item in &column.items {
                    render_node(item, config, self);
                }
            }
        }
    }
}

// ============ Standalone Functions ============

/// Decide how the host should handle a tapped link.
#[uniffi::export]
pub fn classify_link(url: String, site_url: String) -> Result<LinkActionDto, FfiError> {
    let config = site_config(&site_url)?;
    Ok(LinkActionDto::from_engine(
        eds_viewer_engine::classify_link(&url, &config),
    ))
}

/// Make an image or link URL absolute against the site. `None` for blank input.
#[uniffi::export]
pub fn resolve_url(url: Option<String>, site_url: String) -> Result<Option<String>, FfiError> {
    let config = site_config(&site_url)?;
    Ok(config.resolve_url(url.as_deref()))
}
