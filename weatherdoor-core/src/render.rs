use chrono::NaiveDateTime;
use maud::html;

use crate::{
    model::ForecastSeries,
    page::Page,
    templates,
    view_model::{self, ForecastView},
};

/// Replace the hero and upcoming regions with `series` and refresh the header.
///
/// An empty series is a normal outcome: the hero shows the no-data placeholder
/// and the upcoming region is cleared.
pub fn render<P: Page + ?Sized>(page: &mut P, series: &ForecastSeries, now: NaiveDateTime) {
    match view_model::build_view(series, now) {
        ForecastView::NoData => {
            page.set_hero(templates::no_data());
            page.set_upcoming(html! {});
        }
        ForecastView::Forecast { hero, upcoming } => {
            page.set_hero(templates::hero_card(&hero));
            page.set_upcoming(templates::upcoming(&upcoming));
        }
    }

    page.set_header(&view_model::header_label(now));
}
