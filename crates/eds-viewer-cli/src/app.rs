use anyhow::Result;
use eds_viewer_engine::{EdsConfig, LinkAction, Route, classify_link};
use ratatui::widgets::ListState;

use crate::render::{PageLink, TextRenderer};
use crate::source::PageSource;

pub struct App {
    source: PageSource,
    config: EdsConfig,
    pub route: Route,
    history: Vec<Route>,
    pub title: String,
    pub lines: Vec<String>,
    pub links: Vec<PageLink>,
    pub link_list_state: ListState,
    pub scroll: u16,
    pub status: String,
}

impl App {
    pub fn new(source: PageSource, config: EdsConfig, route: Route) -> Result<Self> {
        let mut app = Self {
            source,
            config,
            route: route.clone(),
            history: Vec::new(),
            title: String::new(),
            lines: Vec::new(),
            links: Vec::new(),
            link_list_state: ListState::default(),
            scroll: 0,
            status: String::new(),
        };
        app.show(route)?;
        Ok(app)
    }

    /// Load and render `route`, replacing the current page.
    fn show(&mut self, route: Route) -> Result<()> {
        let page = self.source.load(&route, &self.config)?;
        let rendered = TextRenderer::render(&page, &self.config);

        self.title = page
            .title()
            .map(str::to_string)
            .unwrap_or_else(|| format!("/{}", route.path()));
        self.lines = rendered.lines;
        self.links = rendered.links;
        self.route = route;
        self.scroll = 0;
        self.link_list_state
            .select(if self.links.is_empty() { None } else { Some(0) });
        Ok(())
    }

    fn navigate(&mut self, route: Route) {
        let previous = self.route.clone();
        match self.show(route) {
            Ok(()) => {
                self.history.push(previous);
                self.status.clear();
            }
            Err(e) => {
                log::warn!("navigation failed: {e:#}");
                self.status = format!("Failed to load page: {e:#}");
            }
        }
    }

    pub fn back(&mut self) {
        let Some(previous) = self.history.pop() else {
            self.status = "Nothing to go back to".to_string();
            return;
        };
        if let Err(e) = self.show(previous.clone()) {
            self.history.push(previous);
            self.status = format!("Failed to load page: {e:#}");
        } else {
            self.status.clear();
        }
    }

    pub fn reload(&mut self) {
        match self.show(self.route.clone()) {
            Ok(()) => self.status = "Reloaded".to_string(),
            Err(e) => self.status = format!("Failed to reload: {e:#}"),
        }
    }

    pub fn activate_selected_link(&mut self) {
        let Some(href) = self
            .link_list_state
            .selected()
            .and_then(|i| self.links.get(i))
            .map(|link| link.href.clone())
        else {
            return;
        };
        self.follow(&href);
    }

    pub fn follow(&mut self, href: &str) {
        match classify_link(href, &self.config) {
            LinkAction::Anchor(fragment) => {
                self.status = format!("In-page anchors are not supported yet (#{fragment})");
            }
            LinkAction::External(url) => {
                log::info!("external link: {url}");
                self.status = format!("Open externally: {url}");
            }
            LinkAction::Navigate(Route::Home) if self.route == Route::Home => {
                self.status = "Already on the home page".to_string();
            }
            LinkAction::Navigate(route) => self.navigate(route),
        }
    }

    pub fn next_link(&mut self) {
        if self.links.is_empty() {
            return;
        }
        let i = match self.link_list_state.selected() {
            Some(i) => (i + 1) % self.links.len(),
            None => 0,
        };
        self.link_list_state.select(Some(i));
    }

    pub fn previous_link(&mut self) {
        if self.links.is_empty() {
            return;
        }
        let i = match self.link_list_state.selected() {
            Some(0) | None => self.links.len() - 1,
            Some(i) => i - 1,
        };
        self.link_list_state.select(Some(i));
    }

    pub fn scroll_down(&mut self, amount: u16) {
        let max = u16::try_from(self.lines.len().saturating_sub(1)).unwrap_or(u16::MAX);
        self.scroll = self.scroll.saturating_add(amount).min(max);
    }

    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll = self.scroll.saturating_sub(amount);
    }
}
