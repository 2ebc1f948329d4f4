use maud::{DOCTYPE, Markup, html};

use crate::{
    classify::AdviceVariant,
    view_model::{HeroCard, MiniCard},
};

pub const NO_DATA_TEXT: &str = "沒有找到天氣資料，任意門打不開了…";

pub fn no_data() -> Markup {
    html! {
        p { (NO_DATA_TEXT) }
    }
}

fn advice_item(variant: &AdviceVariant, caption: &str, value: &str) -> Markup {
    html! {
        div class="advice-item" {
            div class="advice-icon" { (variant.icon) }
            div class="advice-text" { (variant.text) }
            div class="advice-meta" { (caption) " " (value) }
        }
    }
}

pub fn hero_card(card: &HeroCard) -> Markup {
    html! {
        div class="hero-card hand-drawn-box" {
            div class="bell-decoration" { "🔔" }
            div class="hero-period" { (card.heading()) }
            div class="hero-temp-container" {
                div class="hero-icon" { (card.icon) }
                div class="hero-temp" { (card.temperature()) "°" }
            }
            div class="hero-desc" { (card.condition) }

            div class="advice-grid" {
                (advice_item(&card.advice.rain, "降雨率", &card.rain))
                (advice_item(&card.advice.cloth, "最高溫", &card.max_temp))
            }
        }
    }
}

pub fn mini_card(card: &MiniCard) -> Markup {
    html! {
        div class="mini-card" {
            div class="mini-time" { (card.label()) }
            div class="mini-icon" { (card.icon) }
            div class="mini-temp" { (card.temp_range()) }
            div class="mini-rain" { "💧" (card.rain) }
        }
    }
}

pub fn upcoming(cards: &[MiniCard]) -> Markup {
    html! {
        @for card in cards {
            (mini_card(card))
        }
    }
}

/// Everything the page layout needs besides the rendered regions.
#[derive(Debug, Clone, Copy)]
pub struct Layout<'a> {
    pub title: &'a str,
    pub header: &'a str,
    pub cities: &'a [String],
    pub selected: Option<&'a str>,
    pub loading_visible: bool,
    pub content_visible: bool,
}

fn display(visible: bool, shown: &'static str) -> &'static str {
    if visible { shown } else { "display:none" }
}

pub fn document(layout: &Layout<'_>, hero: &Markup, upcoming: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="zh-Hant-TW" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (layout.title) }
                link rel="stylesheet" href="style.css";
            }
            body {
                header class="top-bar" {
                    h1 { "天氣任意門" }
                    span id="updateTime" { (layout.header) }
                    select id="citySelect" {
                        @for city in layout.cities {
                            option value=(city) selected[layout.selected == Some(city.as_str())] {
                                (city)
                            }
                        }
                    }
                }
                div id="loading" style=(display(layout.loading_visible, "display:flex")) {
                    "任意門開啟中…"
                }
                main id="mainContent" style=(display(layout.content_visible, "display:block")) {
                    section id="heroCard" { (hero) }
                    section id="futureForecasts" class="future-forecasts" { (upcoming) }
                }
            }
        }
    }
}
