use tracing::debug;

use super::events::TocEvent;
use super::naming::{NameResolver, fragment_from_label};
use crate::model::TocLink;

/// Streaming consumer that turns TOC events into uniquely named links.
#[derive(Debug)]
pub struct TocExtractor {
    marker: String,
    started: bool,
    in_anchor: bool,
    current_url: String,
    fragments: Vec<String>,
    resolver: NameResolver,
    links: Vec<TocLink>,
}

/// What a finished extraction produced.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub marker_found: bool,
    pub links: Vec<TocLink>,
}

impl TocExtractor {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            started: false,
            in_anchor: false,
            current_url: String::new(),
            fragments: Vec::new(),
            resolver: NameResolver::new(),
            links: Vec::new(),
        }
    }

    pub fn handle(&mut self, event: TocEvent<'_>) {
        match event {
            TocEvent::Start { tag, attrs } => self.on_start_tag(tag, &attrs),
            TocEvent::End { tag } => self.on_end_tag(tag),
            TocEvent::Text(data) => self.on_text(data),
        }
    }

    pub fn on_start_tag(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        if !self.started || tag != "a" {
            return;
        }

        self.in_anchor = true;
        self.current_url.clear();
        if let Some((_, href)) = attrs.iter().rev().find(|(name, _)| *name == "href") {
            self.current_url = strip_url_fragment(href).to_string();
        }
    }

    pub fn on_end_tag(&mut self, tag: &str) {
        if !self.started {
            return;
        }

        match tag {
            "li" => {
                self.fragments.pop();
            }
            "a" => {
                self.in_anchor = false;
                self.resolve_and_emit();
            }
            _ => {}
        }
    }

    pub fn on_text(&mut self, data: &str) {
        if !self.started {
            if data.contains(self.marker.as_str()) {
                debug!(marker = %self.marker, "found toc start marker");
                self.started = true;
            }
            return;
        }

        if !self.in_anchor {
            return;
        }

        if let Some(fragment) = fragment_from_label(data) {
            self.fragments.push(fragment);
        }
    }

    pub fn finish(self) -> Extraction {
        Extraction {
            marker_found: self.started,
            links: self.links,
        }
    }

    fn resolve_and_emit(&mut self) {
        let Some(name) = self.resolver.resolve(&self.fragments) else {
            return;
        };

        debug!(name = %name, url = %self.current_url, "resolved toc link");
        self.links.push(TocLink {
            name,
            url: self.current_url.clone(),
        });
    }
}

fn strip_url_fragment(href: &str) -> &str {
    href.split_once('#').map_or(href, |(page, _)| page)
}
