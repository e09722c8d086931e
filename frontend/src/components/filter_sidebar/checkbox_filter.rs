use common::{facet_summary::FacetEntry, filter_state::FilterEdit, sidebar_layout::annotate_label};
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_toggle_icons::{MdCheckBox, MdCheckBoxOutlineBlank}};

use crate::data_definitions::catalog_query::CatalogPageState;


#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxOption {
    pub value: String,
    pub label: String,
}

impl From<&FacetEntry> for CheckboxOption {
    fn from(entry: &FacetEntry) -> Self {
        Self { value: entry.code.clone(), label: annotate_label(&entry.label, entry.count) }
    }
}

/// One filter block of checkboxes. Each click is committed right away.
#[component]
pub fn CheckboxFilter(
    title: ReadSignal<String>,
    param: ReadSignal<String>,
    filter_name: ReadSignal<String>,
    options: ReadSignal<Vec<CheckboxOption>>,
) -> Element {
    if options.read().is_empty() {
        return rsx! {};
    }
    rsx! {
        div {
            class: "x-filter-block",
            h3 { "{title}" }
            ul {
                for option in options.read().iter().cloned() {
                    li {
                        key: "{option.value}",
                        FilterCheckbox {
                            param,
                            filter_name,
                            value: option.value,
                            label: option.label,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn FilterCheckbox(param: ReadSignal<String>, filter_name: ReadSignal<String>, value: ReadSignal<String>, label: ReadSignal<String>) -> Element {
    let page = use_context::<CatalogPageState>();
    let is_checked = use_memo(move || page.query.read().filter_state(&param.read()).is_selected(&filter_name.read(), &value.read()));
    rsx! {
        div {
            class: "x-facet-list-item",
            style: "
                display: flex;
                flex-direction: row;
                gap: 10px;
                cursor: pointer;
                padding: 4px;
                align-items: center;
            ",
            onclick: move |_e| {
                let edit = FilterEdit::toggle(filter_name.read().clone(), value.read().clone(), !is_checked());
                page.commit_edit(&param.read(), &edit);
            },

            if is_checked() {
                Icon { icon: MdCheckBox, style: "width: 22px; height: 22px; color: rgb(28, 33, 45); flex-shrink: 0;" }
            } else {
                Icon { icon: MdCheckBoxOutlineBlank, style: "width: 22px; height: 22px; color: black; flex-shrink: 0;" }
            }
            div {
                style: "
                    font-size: 16px;
                    line-height: 24px;
                    overflow: hidden;
                    text-overflow: ellipsis;
                    white-space: nowrap;
                    min-width: 0;
                ",
                "{label}"
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facet_entries_show_their_count() {
        let entry = FacetEntry { code: "new".into(), label: "New".into(), count: 2 };
        assert_eq!(CheckboxOption::from(&entry), CheckboxOption { value: "new".into(), label: "New (2)".into() });
    }
}
