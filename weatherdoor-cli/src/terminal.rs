use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use weatherdoor_core::{DisplayState, HtmlPage, Markup, Page};

/// Page backed by an HTML file; alerts go straight to the terminal.
#[derive(Debug)]
pub struct FilePage {
    inner: HtmlPage,
    out: PathBuf,
    cities: Vec<String>,
    selected: Option<String>,
}

impl FilePage {
    pub fn new(out: PathBuf, cities: Vec<String>) -> Self {
        Self { inner: HtmlPage::default(), out, cities, selected: None }
    }

    pub fn path(&self) -> &PathBuf {
        &self.out
    }

    pub fn select(&mut self, city: &str) {
        self.selected = Some(city.to_string());
    }

    pub fn write(&self) -> Result<()> {
        let html = self.inner.to_document(&self.cities, self.selected.as_deref());
        fs::write(&self.out, html)
            .with_context(|| format!("Failed to write page: {}", self.out.display()))
    }
}

impl Page for FilePage {
    fn set_display(&mut self, state: DisplayState) {
        self.inner.set_display(state);
    }

    fn set_hero(&mut self, markup: Markup) {
        self.inner.set_hero(markup);
    }

    fn set_upcoming(&mut self, markup: Markup) {
        self.inner.set_upcoming(markup);
    }

    fn set_header(&mut self, text: &str) {
        self.inner.set_header(text);
    }

    fn set_title(&mut self, title: &str) {
        self.inner.set_title(title);
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
        self.inner.alert(message);
    }
}
