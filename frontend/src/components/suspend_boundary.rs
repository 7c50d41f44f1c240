use dioxus::prelude::*;

/// Holds a side panel's place while its index request is in flight.
#[component]
pub fn PanelSuspense(label: String, children: Element) -> Element {
    rsx! {
        SuspenseBoundary {
            fallback: move |_: SuspenseContext| rsx! {
                PendingNotice { label: label.clone() }
            },
            {children}
        }
    }
}

#[component]
pub fn PendingNotice(label: String) -> Element {
    rsx! {
        div {
            style: "color: rgba(28, 33, 45, 0.6); font-style: italic; padding: 8px 0;",
            "{label}"
        }
    }
}
