use dioxus::prelude::*;

use crate::components::site_layout::SiteLayout;
use crate::pages::overview_page::OverviewPage;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(SiteLayout)]


    #[route("/?:q")]
    OverviewPage { q: String },

}
