use maud::{Markup, PreEscaped};

use crate::templates::{self, Layout};

/// Which of the two page regions is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    /// Loading indicator shown, main content hidden.
    Loading,
    /// Loading indicator hidden, main content shown.
    Content,
    /// Loading indicator hidden, main content left as it was.
    Dismissed,
}

/// The surface a forecast is rendered onto.
pub trait Page {
    fn set_display(&mut self, state: DisplayState);

    fn set_hero(&mut self, markup: Markup);

    fn set_upcoming(&mut self, markup: Markup);

    fn set_header(&mut self, text: &str);

    fn set_title(&mut self, title: &str);

    /// Blocking, user-visible failure notice.
    fn alert(&mut self, message: &str);
}

/// In-memory page that can be serialised to a full HTML document.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    title: String,
    header: String,
    hero: Markup,
    upcoming: Markup,
    loading_visible: bool,
    content_visible: bool,
    alerts: Vec<String>,
}

impl Default for HtmlPage {
    fn default() -> Self {
        Self {
            title: "天氣任意門".to_string(),
            header: String::new(),
            hero: PreEscaped(String::new()),
            upcoming: PreEscaped(String::new()),
            loading_visible: false,
            content_visible: false,
            alerts: Vec::new(),
        }
    }
}

impl HtmlPage {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn hero_html(&self) -> &str {
        &self.hero.0
    }

    pub fn upcoming_html(&self) -> &str {
        &self.upcoming.0
    }

    pub fn is_loading_visible(&self) -> bool {
        self.loading_visible
    }

    pub fn is_content_visible(&self) -> bool {
        self.content_visible
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn to_document(&self, cities: &[String], selected: Option<&str>) -> String {
        let layout = Layout {
            title: &self.title,
            header: &self.header,
            cities,
            selected,
            loading_visible: self.loading_visible,
            content_visible: self.content_visible,
        };
        templates::document(&layout, &self.hero, &self.upcoming).into_string()
    }
}

impl Page for HtmlPage {
    fn set_display(&mut self, state: DisplayState) {
        match state {
            DisplayState::Loading => {
                self.loading_visible = true;
                self.content_visible = false;
            }
            DisplayState::Content => {
                self.loading_visible = false;
                self.content_visible = true;
            }
            DisplayState::Dismissed => self.loading_visible = false,
        }
    }

    fn set_hero(&mut self, markup: Markup) {
        self.hero = markup;
    }

    fn set_upcoming(&mut self, markup: Markup) {
        self.upcoming = markup;
    }

    fn set_header(&mut self, text: &str) {
        self.header = text.to_string();
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_transitions() {
        let mut page = HtmlPage::default();

        page.set_display(DisplayState::Loading);
        assert!(page.is_loading_visible());
        assert!(!page.is_content_visible());

        page.set_display(DisplayState::Content);
        assert!(!page.is_loading_visible());
        assert!(page.is_content_visible());
    }

    #[test]
    fn dismissed_leaves_content_untouched() {
        let mut page = HtmlPage::default();
        page.set_display(DisplayState::Content);
        page.set_display(DisplayState::Dismissed);
        assert!(page.is_content_visible());

        page.set_display(DisplayState::Loading);
        page.set_display(DisplayState::Dismissed);
        assert!(!page.is_loading_visible());
        assert!(!page.is_content_visible());
    }

    #[test]
    fn alerts_are_collected_in_order() {
        let mut page = HtmlPage::default();
        page.alert("one");
        page.alert("two");
        assert_eq!(page.alerts(), ["one", "two"]);
    }
}
