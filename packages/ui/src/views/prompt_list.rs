use dioxus::prelude::*;
use store::list::filter_options;
use store::{ListQuery, ListView, PromptList};

use api::PromptApi;

use crate::icons::{FaMagnifyingGlass, FaPlus, FaXmark};
use crate::timer::sleep_ms;
use crate::{
    observe_api_error, use_auth, use_client, use_flash, use_library_config, use_toasts,
    CopyButton, Icon,
};

/// The library page: search, category and tag filters, paginated rows.
///
/// `query` comes from the URL. Every filter or page change is reported through
/// `on_navigate` with the next query; the fetch runs when the route delivers
/// that query back, so back/forward navigation and in-page changes share one
/// path. An offset past the end of the results is corrected through
/// `on_replace`, which should not add a history entry.
#[component]
pub fn PromptListView(
    query: ListQuery,
    on_navigate: EventHandler<ListQuery>,
    on_replace: EventHandler<ListQuery>,
    on_open: EventHandler<String>,
    on_create: EventHandler<()>,
) -> Element {
    let config = use_library_config();
    let client = use_client();
    let session = use_auth();
    let toasts = use_toasts();
    let mut flash = use_flash();
    let page_size = config.list.page_size;
    let debounce_ms = config.list.debounce_ms;

    let mut list = use_signal(|| PromptList::new(query.clone(), page_size));
    let mut pending_search = use_signal(|| Option::<Task>::None);
    let mut tags_open = use_signal(|| false);

    // Track the route query in a signal so the fetch effect re-runs on change
    let mut route_query = use_signal(|| query.clone());
    if *route_query.peek() != query {
        route_query.set(query.clone());
    }

    // One-shot toast left by the previous page
    use_effect(move || {
        let pending = flash.write().take();
        if let Some(pending) = pending {
            toasts.flash(pending);
        }
    });

    // Filter options, once. Failures leave the dropdowns empty.
    {
        let client = client.clone();
        use_future(move || {
            let client = client.clone();
            async move {
                let (categories, tags) = filter_options(&client).await;
                list.write().set_filter_options(categories, tags);
            }
        });
    }

    // One fetch per committed query
    use_effect(move || {
        let query = route_query();
        let request = {
            let mut list = list.write();
            list.sync_route(query);
            list.begin_fetch()
        };
        let client = client.clone();
        spawn(async move {
            let result = client.list_prompts(&request.params).await;
            if let Err(e) = &result {
                tracing::error!("Failed to load prompts: {e}");
                observe_api_error(session, e);
            }
            let corrected = {
                let mut list = list.write();
                list.finish_fetch(request.ticket, result) && list.clamp_offset()
            };
            if corrected {
                on_replace.call(list.peek().query().clone());
            }
        });
    });

    let commit = move |changed: bool| {
        if changed {
            let next = list.peek().query().clone();
            on_navigate.call(next);
        }
    };

    let mut cancel_pending_search = move || {
        if let Some(task) = pending_search.take() {
            task.cancel();
        }
    };

    let on_search = move |evt: FormEvent| {
        let ticket = list.write().type_search(&evt.value());
        cancel_pending_search();
        let task = spawn(async move {
            sleep_ms(debounce_ms).await;
            let changed = list.write().settle_search(ticket);
            commit(changed);
        });
        pending_search.set(Some(task));
    };

    let state = list.read();
    let view = state.view();
    let committed = state.query().clone();
    let search_input = state.search_input().to_string();
    let categories = state.categories().to_vec();
    let available_tags = state.available_tags().to_vec();
    let prompts = state.prompts().to_vec();
    let info = state.page_info();
    let shows_pagination = state.shows_pagination();
    let has_previous = state.has_previous();
    let has_next = state.has_next();
    drop(state);

    match &view {
        ListView::InitialLoading => {
            return rsx! {
                div { class: "page-status", "Loading prompts..." }
            };
        }
        ListView::Failed(err) => {
            return rsx! {
                div { class: "page-status page-error", "Error: {err}" }
            };
        }
        ListView::Empty => {
            return rsx! {
                div {
                    class: "empty-state",
                    h3 { "No prompts" }
                    p { "Get started by creating your first prompt." }
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| on_create.call(()),
                        Icon { icon: FaPlus, width: 14, height: 14 }
                        "Create your first prompt"
                    }
                }
            };
        }
        ListView::NoResults | ListView::Rows => {}
    }

    let tags_label = match committed.tags.len() {
        0 => "All Tags".to_string(),
        1 => "1 tag selected".to_string(),
        n => format!("{n} tags selected"),
    };

    rsx! {
        div {
            class: "page-header",
            div {
                h1 { "Library" }
                p { class: "muted", "Manage your prompt collection" }
            }
            button {
                class: "btn btn-primary",
                onclick: move |_| on_create.call(()),
                Icon { icon: FaPlus, width: 14, height: 14 }
                "New Prompt"
            }
        }

        div {
            class: "filter-bar",
            div {
                class: "search-field",
                Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                input {
                    r#type: "search",
                    placeholder: "Search prompts...",
                    value: "{search_input}",
                    oninput: on_search,
                }
            }
            select {
                class: "select",
                value: committed.category.clone().unwrap_or_default(),
                onchange: move |evt: FormEvent| {
                    let value = evt.value();
                    let changed = list.write().set_category(Some(value.as_str()));
                    commit(changed);
                },
                option { value: "", "All Categories" }
                for category in categories {
                    option {
                        key: "{category}",
                        value: "{category}",
                        selected: committed.category.as_deref() == Some(category.as_str()),
                        "{category}"
                    }
                }
            }
            div {
                class: "tag-filter",
                button {
                    r#type: "button",
                    class: "select",
                    onclick: move |_| tags_open.toggle(),
                    "{tags_label}"
                }
                if tags_open() {
                    div { class: "dropdown-backdrop", onclick: move |_| tags_open.set(false) }
                    div {
                        class: "dropdown",
                        if available_tags.is_empty() {
                            div { class: "dropdown-empty", "No tags available" }
                        }
                        for tag in available_tags {
                            label {
                                key: "{tag}",
                                class: "dropdown-item",
                                input {
                                    r#type: "checkbox",
                                    checked: committed.has_tag(&tag),
                                    onchange: {
                                        let tag = tag.clone();
                                        move |_| {
                                            let changed = list.write().toggle_tag(&tag);
                                            commit(changed);
                                        }
                                    },
                                }
                                span { "{tag}" }
                            }
                        }
                    }
                }
            }
            if committed.has_filters() {
                button {
                    r#type: "button",
                    class: "btn btn-secondary",
                    onclick: move |_| {
                        cancel_pending_search();
                        let changed = list.write().clear_filters();
                        commit(changed);
                    },
                    Icon { icon: FaXmark, width: 12, height: 12 }
                    "Clear filters"
                }
            }
        }

        if committed.has_filters() {
            div {
                class: "active-filters",
                if !committed.q.is_empty() {
                    span {
                        class: "chip chip-accent",
                        "Search: {committed.q}"
                        button {
                            r#type: "button",
                            class: "chip-remove",
                            title: "Remove",
                            onclick: move |_| {
                                cancel_pending_search();
                                let changed = list.write().clear_search();
                                commit(changed);
                            },
                            Icon { icon: FaXmark, width: 10, height: 10 }
                        }
                    }
                }
                if let Some(category) = committed.category.clone() {
                    span {
                        class: "chip chip-accent",
                        "Category: {category}"
                        button {
                            r#type: "button",
                            class: "chip-remove",
                            title: "Remove",
                            onclick: move |_| {
                                let changed = list.write().set_category(None);
                                commit(changed);
                            },
                            Icon { icon: FaXmark, width: 10, height: 10 }
                        }
                    }
                }
                for tag in committed.tags.clone() {
                    span {
                        key: "{tag}",
                        class: "chip chip-accent",
                        "Tag: {tag}"
                        button {
                            r#type: "button",
                            class: "chip-remove",
                            title: "Remove",
                            onclick: {
                                let tag = tag.clone();
                                move |_| {
                                    let changed = list.write().remove_tag(&tag);
                                    commit(changed);
                                }
                            },
                            Icon { icon: FaXmark, width: 10, height: 10 }
                        }
                    }
                }
            }
        }

        if view == ListView::NoResults {
            div {
                class: "empty-state",
                h3 { "No results found" }
                p { "No prompts match your current filters. Try adjusting your search or filters." }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| {
                        cancel_pending_search();
                        let changed = list.write().clear_filters();
                        commit(changed);
                    },
                    "Clear filters"
                }
            }
        } else {
            table {
                class: "prompt-table",
                thead {
                    tr {
                        th { "Title" }
                        th { "Category" }
                        th { "Tags" }
                        th { "Updated" }
                        th { span { class: "sr-only", "Actions" } }
                    }
                }
                tbody {
                    for prompt in prompts {
                        tr {
                            key: "{prompt.id}",
                            onclick: {
                                let id = prompt.id.clone();
                                move |_| on_open.call(id.clone())
                            },
                            td { class: "cell-title", "{prompt.title}" }
                            td { {prompt.category.as_deref().unwrap_or("-")} }
                            td {
                                if prompt.tags().is_empty() {
                                    "-"
                                } else {
                                    div {
                                        class: "chips",
                                        for tag in prompt.tags().iter() {
                                            span { class: "chip", "{tag}" }
                                        }
                                    }
                                }
                            }
                            td { class: "cell-date", {prompt.updated_at.format("%b %-d, %Y").to_string()} }
                            td {
                                class: "cell-actions",
                                CopyButton { content: prompt.content.clone(), class: "btn-icon" }
                            }
                        }
                    }
                }
            }

            if shows_pagination {
                nav {
                    class: "pagination",
                    aria_label: "Pagination",
                    p {
                        "Showing {info.showing_from} to {info.showing_to} of {info.total} results"
                    }
                    div {
                        class: "pagination-controls",
                        button {
                            class: "btn btn-secondary",
                            disabled: !has_previous,
                            onclick: move |_| {
                                let changed = list.write().previous_page();
                                commit(changed);
                            },
                            "Previous"
                        }
                        span { "Page {info.current_page} of {info.total_pages}" }
                        button {
                            class: "btn btn-secondary",
                            disabled: !has_next,
                            onclick: move |_| {
                                let changed = list.write().next_page();
                                commit(changed);
                            },
                            "Next"
                        }
                    }
                }
            }
        }
    }
}
