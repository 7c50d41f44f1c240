//! Page frame: header, routed content, revision footer.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::md_action_icons::MdInfo;
use dioxus_free_icons::icons::md_action_icons::MdHome;

use crate::components::error_boundary::GlobalErrorBoundary;
use crate::data_definitions::server_sources::ServerRevisionSource;
use crate::data_definitions::state_bindings::use_repository_info;
use crate::routes::Route;


/// Shared layout component.
#[component]
pub fn SiteLayout() -> Element {
    rsx! {
        div {
            id: "x-layout-container",
            style: "
                display:flex;
                flex-direction: column;
                width: 100%;
                min-height: 100vh;
            ",

            div {
                id: "x-layout-header",
                style: "
                    display:flex;
                    flex-direction: row;
                    align-items: center;
                    gap: 16px;
                    padding: 12px 24px;
                    background-color: #1C212D;
                    color: white;
                ",
                Link {
                    to: Route::OverviewPage { q: String::new() },
                    span {
                        style: "color:white;",
                        Icon { icon: MdHome, style: "width: 26px; height: 26px;" }
                    }
                }
                span { style: "font-size: 22px; font-weight: 500;", "Record Overview" }
            }

            div {
                id: "x-page-container",
                style: "flex-grow:1; min-width: 100px;",
                GlobalErrorBoundary {
                    boundary_name: "SiteLayout".to_string(),
                    Outlet::<Route> {}
                }
            }

            RevisionFooter {}
        }
    }
}

#[component]
fn RevisionFooter() -> Element {
    let info = use_repository_info(ServerRevisionSource);
    rsx! {
        div {
            id: "x-layout-footer",
            style: "
                display:flex;
                flex-direction: row;
                align-items: center;
                gap: 6px;
                padding: 8px 24px;
                font-size: 13px;
                color: rgba(28, 33, 45, 0.7);
                border-top: 1px solid rgba(0,0,0,0.1);
            ",
            if !info.read().is_empty() {
                Icon { icon: MdInfo, style: "width: 16px; height: 16px;" }
            }
            "{info}"
        }
    }
}
