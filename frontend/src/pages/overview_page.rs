use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::md_action_icons::MdSearch;

use common::{count_format::group_thousands, summary_view_state::SummaryViewState};
use crate::{
    api::overview_api::count_format_settings,
    components::{
        error_boundary::FetchErrorPanel,
        facet_table::FacetTableView,
        source_counts::SourceCountsPanel,
        suspend_boundary::{PanelSuspense, PendingNotice},
    },
    data_definitions::{server_sources::ServerSummarySource, state_bindings::use_summary_view_state},
    routes::Route,
};


/// Overview page; `q` comes from the page URL.
#[component]
pub fn OverviewPage(q: String) -> Element {
    rsx! {
        Title { "Record Overview" }
        OverviewRoot { initial_query: q }
    }
}

/// Starts an update, or an init when `initial` is given, without blocking the UI.
/// Failures land in the state's snapshot, which decides whether they are still
/// current.
fn spawn_update(state: Rc<SummaryViewState>, initial: Option<String>, mut pending: Signal<u32>) {
    spawn(async move {
        pending.with_mut(|p| *p += 1);
        let result = match initial {
            Some(q) => state.init(Some(&q), &ServerSummarySource).await,
            None => state.update(&ServerSummarySource).await,
        };
        pending.with_mut(|p| *p -= 1);
        if let Err(e) = result {
            dioxus::logger::tracing::debug!(latest = state.latest_issued(), "overview update ended with {}", e);
        }
    });
}

#[component]
fn OverviewRoot(initial_query: ReadSignal<String>) -> Element {
    let (state, snapshot) = use_summary_view_state();
    let pending = use_signal(|| 0_u32);
    let count_format = use_resource(move || count_format_settings());

    // re-runs whenever navigation changes `q`
    use_effect({
        let state = state.clone();
        move || {
            let q = initial_query.read().clone();
            spawn_update(state.clone(), Some(q), pending);
        }
    });

    let submit = use_callback({
        let state = state.clone();
        move |_: ()| {
            let q = state.query();
            if q == *initial_query.peek() {
                spawn_update(state.clone(), None, pending);
            } else {
                navigator().push(Route::OverviewPage { q });
            }
        }
    });

    let state_for_input = state.clone();
    let query_text = snapshot.read().query.clone();
    let summary = snapshot.read().summary.clone();
    let update_error = snapshot.read().error.clone();
    let count_format = count_format.cloned().and_then(Result::ok).unwrap_or_default();

    rsx! {
        div {
            id: "x-overview-container",
            style: "
                display:flex;
                flex-direction: column;
                gap: 16px;
                width: 100%;
                padding: 24px 40px;
                box-sizing: border-box;
            ",

            // QUERY INPUT
            div {
                style: "display:flex; flex-direction: row; gap: 10px; align-items: center;",
                input {
                    r#type: "text",
                    value: "{query_text}",
                    style: "flex: 1 1 auto; font-size: 18px; padding: 8px; border: 1px solid rgba(0,0,0,0.5); border-radius: 6px;",
                    oninput: move |e: FormEvent| {
                        state_for_input.set_query(&e.value());
                    },
                    onkeydown: move |e: KeyboardEvent| {
                        if e.key() == Key::Enter {
                            submit(());
                        }
                    },
                }
                button {
                    style: "cursor: pointer; display:flex; align-items:center; gap: 6px; font-size: 16px; padding: 8px 14px; border-radius: 6px;",
                    onclick: move |_| submit(()),
                    Icon { icon: MdSearch, style: "width: 20px; height: 20px;" }
                    "Update"
                }
            }

            if let Some(error) = update_error {
                FetchErrorPanel { error }
            }
            if pending() > 0 {
                PendingNotice { label: "Updating counts..." }
            }

            // TOTALS
            div {
                style: "font-size: 20px;",
                "{group_thousands(summary.total_records)} records"
            }
            div {
                style: "display:flex; flex-direction: row; gap: 16px; flex-wrap: wrap; color: rgba(28, 33, 45, 0.7);",
                for source in summary.sources.iter() {
                    span {
                        key: "{source}",
                        {format!("{}: {}", source, group_thousands(summary.totals.get(source).copied().unwrap_or(0)))}
                    }
                }
            }

            div {
                style: "display:flex; flex-direction: row; gap: 40px; align-items: flex-start;",

                // FACET TABLES
                div {
                    style: "display:flex; flex-direction: column; flex: 1 1 auto;",
                    for field in summary.fields.iter() {
                        if let Some(table) = summary.table(field) {
                            FacetTableView {
                                key: "{field}",
                                field: field.clone(),
                                table: table.clone(),
                                sources: summary.sources.clone(),
                                count_format: count_format.clone(),
                            }
                        }
                    }
                }

                PanelSuspense {
                    label: "Counting records per collection...",
                    SourceCountsPanel {}
                }
            }
        }
    }
}
