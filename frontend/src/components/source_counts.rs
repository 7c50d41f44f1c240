//! Whole-index record counts per source, independent of the current query.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::go_icons::GoDatabase;
use common::{count_format::group_thousands, query_terms::field_term_query};

use crate::{
    api::overview_api::counts_by_source,
    components::error_boundary::FetchErrorPanel,
    data_definitions::server_sources::to_fetch_error,
    routes::Route,
};

const SOURCE_FIELD: &str = "source";

#[component]
pub fn SourceCountsPanel() -> Element {
    let counts = use_resource(move || counts_by_source()).suspend()?.cloned();
    let counts = match counts {
        Err(e) => return rsx! {FetchErrorPanel { error: to_fetch_error(e) }},
        Ok(c) => c,
    };
    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: column;
                gap: 6px;
                padding: 10px;
                border: 1px solid rgba(0,0,0,0.2);
                border-radius: 10px;
                min-width: 220px;
            ",
            div {
                style: "display: flex; align-items: center; gap: 6px; font-weight: 500;",
                Icon { icon: GoDatabase, style: "width: 18px; height: 18px;" }
                "Collections"
            }
            for (source, count) in counts {
                div {
                    key: "{source}",
                    style: "display: flex; flex-direction: row; gap: 10px;",
                    Link {
                        to: Route::OverviewPage { q: field_term_query(SOURCE_FIELD, &source) },
                        "{source}"
                    }
                    div { style: "flex: 1 1 auto;" }
                    div {
                        style: "color: rgba(28, 33, 45, 0.7);",
                        {group_thousands(count)}
                    }
                }
            }
        }
    }
}
