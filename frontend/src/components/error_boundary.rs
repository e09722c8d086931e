//! Error boundaries for the catalog page.

use dioxus::prelude::*;

use crate::data_definitions::catalog_query::CATALOG_PATH;

#[component]
pub fn GlobalErrorBoundary(boundary_name: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: move |err: ErrorContext| {
                dioxus::logger::tracing::error!("{} boundary caught: {:?}", boundary_name, err);
                rsx! {
                    h1 {
                        style: "color:darkred; font-size: 34px; border: 1px solid red; padding: 10px; border-radius: 5px; margin: 15px;",
                        "Something went wrong"
                    }
                    p {
                        style: "color:darkred; font-size: 20px; margin: 15px;",
                        "Boundary: {boundary_name}"
                    }
                    // a clean catalog URL drops whatever filters led here
                    a {
                        href: CATALOG_PATH,
                        style: "color:blue; font-size: 20px; border: 1px solid blue; padding: 10px; border-radius: 5px; margin: 15px;",
                        "Back to all products"
                    }
                    pre {
                        style: "color:black; border: 1px solid red; padding: 10px; border-radius: 5px; margin: 15px; text-wrap: auto;",
                        "{err:#?}"
                    }
                }
            },
            children
        }
    }
}

#[component]
pub fn ComponentErrorBoundary(children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: |err: ErrorContext| {
                let error_txt = match err.error() {
                    Some(e) => format!("{:#?}", e.0),
                    None => "Unknown error".to_string(),
                };
                rsx! {
                    ComponentErrorDisplay {
                        error_txt,
                        button {
                            style: "color:blue; font-size: 18px; border: 1px solid blue; padding: 8px; border-radius: 5px; margin: 10px; background: white; cursor: pointer;",
                            onclick: move |_| {
                                err.clear_errors();
                            },
                            "Try Again"
                        }
                    }
                }
            },
            div {
                width: "100%",
                {children}
            }
        }
    }
}

#[component]
pub fn ComponentErrorDisplay(error_txt: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        div {
            width: "100%",
            display: "flex",
            flex_direction: "column",
            align_items: "center",
            justify_content: "center",
            padding: "20px",

            h2 {
                style: "color:darkred; font-size: 24px; margin: 5px;",
                "Products could not be loaded",
            }

            pre {
                style: "color:darkred; border: 1px solid red; padding: 10px; border-radius: 5px; margin: 5px; text-wrap: auto; max-width: 500px; max-height: 300px; overflow-y: auto;",
                "{error_txt}"
            }

            {children}
        }
    }
}
