//! Error display for the overview: a page-level boundary for render failures
//! and an inline panel for failed index requests.

use common::fetch_error::FetchError;
use dioxus::prelude::*;

/// Catches render errors below the page frame and offers a way back to the
/// unfiltered overview.
#[component]
pub fn GlobalErrorBoundary(boundary_name: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: move |err: ErrorContext| {
                rsx! {
                    div {
                        style: "display:flex; flex-direction: column; gap: 10px; padding: 24px 40px; color: darkred;",
                        h2 { style: "margin: 0;", "The overview could not be displayed" }
                        div { style: "color: rgba(0,0,0,0.6);", "in {boundary_name}" }
                        a { href: "/", "Show all records" }
                        pre {
                            style: "border: 1px solid rgba(139,0,0,0.4); padding: 10px; border-radius: 6px; text-wrap: auto;",
                            "{err:#?}"
                        }
                    }
                }
            },
            children
        }
    }
}

fn error_headline(error: &FetchError) -> &'static str {
    match error {
        FetchError::Network(_) => "Index unreachable",
        FetchError::MalformedResponse(_) => "Unexpected index response",
    }
}

fn error_detail(error: &FetchError) -> &str {
    match error {
        FetchError::Network(message) | FetchError::MalformedResponse(message) => message,
    }
}

/// Inline notice for a failed index request. Whatever was shown before the
/// failure stays on the page around it.
#[component]
pub fn FetchErrorPanel(error: FetchError) -> Element {
    let headline = error_headline(&error);
    let detail = error_detail(&error);
    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: column;
                gap: 4px;
                padding: 8px 12px;
                border-left: 4px solid darkred;
                background: rgba(139,0,0,0.05);
            ",
            div { style: "color: darkred; font-weight: 500;", "{headline}" }
            div {
                style: "color: rgba(0,0,0,0.6); font-family: monospace; overflow-wrap: anywhere;",
                "{detail}"
            }
        }
    }
}
