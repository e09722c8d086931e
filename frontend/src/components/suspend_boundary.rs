use dioxus::prelude::*;

use crate::components::error_boundary::ComponentErrorBoundary;

#[component]
pub fn SuspendWrapper(children: Element) -> Element {
    rsx! {
        SuspenseBoundary {
            fallback: |_s: SuspenseContext| rsx! {
                div {
                    width: "100%",
                    display: "flex",
                    align_items: "center",
                    justify_content: "center",
                    padding: "40px",
                    LoadingIndicator {}
                }
            },
            ComponentErrorBoundary {
                children
            }
        }
    }
}

#[component]
pub fn LoadingIndicator() -> Element {
    rsx! {
        div {
            style: "color:rgba(28, 33, 45, 0.7); font-size: 18px; padding: 10px;",
            "Loading products..."
        }
    }
}
