//! Search Select Component
//!
//! Dropdown with fuzzy search over labelled options.

use leptos::prelude::*;

/// Most suggestions shown at once
pub const MAX_SUGGESTIONS: usize = 8;

/// Simple fuzzy match: check if query chars appear in order in the target
pub fn fuzzy_match(query: &str, target: &str) -> bool {
    let query = query.to_lowercase();
    let target = target.to_lowercase();

    let mut target_chars = target.chars();
    for query_char in query.chars() {
        loop {
            match target_chars.next() {
                Some(c) if c == query_char => break,
                Some(_) => continue,
                None => return false,
            }
        }
    }
    true
}

/// Options matching `query`, prefix matches first, capped at `limit`
pub fn suggestions(query: &str, options: &[(u32, String)], limit: usize) -> Vec<(u32, String)> {
    let query = query.trim();
    let lower = query.to_lowercase();
    let mut matched: Vec<&(u32, String)> = options.iter().filter(|(_, label)| fuzzy_match(query, label)).collect();
    // Stable sort keeps the original order within each group
    matched.sort_by_key(|(_, label)| !label.to_lowercase().starts_with(&lower));
    matched.into_iter().take(limit).cloned().collect()
}

/// Search box with a suggestion list
///
/// Props:
/// - options: (id, label) pairs to search
/// - on_select: Callback with the chosen id
/// - clear_on_select: empty the box after choosing (for multi-pick forms)
#[component]
pub fn SearchSelect(
    #[prop(into)] options: Signal<Vec<(u32, String)>>,
    #[prop(into)] on_select: Callback<u32>,
    #[prop(into, optional)] placeholder: String,
    #[prop(optional)] clear_on_select: bool,
) -> impl IntoView {
    let (query, set_query) = signal(String::new());
    let (open, set_open) = signal(false);
    let (selected_idx, set_selected_idx) = signal(0usize);

    let current = Memo::new(move |_| {
        if !open.get() {
            return vec![];
        }
        options.with(|opts| suggestions(&query.get(), opts, MAX_SUGGESTIONS))
    });

    let choose = move |(id, label): (u32, String)| {
        set_query.set(if clear_on_select { String::new() } else { label });
        set_open.set(false);
        set_selected_idx.set(0);
        on_select.run(id);
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let sugg = current.get_untracked();
        match ev.key().as_str() {
            "ArrowDown" => {
                ev.prevent_default();
                set_open.set(true);
                let sel = selected_idx.get_untracked();
                if sel + 1 < sugg.len() {
                    set_selected_idx.set(sel + 1);
                }
            }
            "ArrowUp" => {
                ev.prevent_default();
                let sel = selected_idx.get_untracked();
                if sel > 0 {
                    set_selected_idx.set(sel - 1);
                }
            }
            "Enter" => {
                ev.prevent_default();
                if let Some(choice) = sugg.get(selected_idx.get_untracked()).cloned() {
                    choose(choice);
                }
            }
            "Escape" => set_open.set(false),
            _ => {}
        }
    };

    view! {
        <div class="search-select">
            <input
                type="text"
                class="search-select-input"
                placeholder=placeholder
                autocomplete="off"
                prop:value=move || query.get()
                on:input=move |ev| {
                    set_query.set(event_target_value(&ev));
                    set_open.set(true);
                    set_selected_idx.set(0);
                }
                on:focus=move |_| set_open.set(true)
                on:keydown=on_keydown
            />
            {move || {
                let sugg = current.get();
                if sugg.is_empty() {
                    view! { <div></div> }.into_any()
                } else {
                    let selected = selected_idx.get();
                    view! {
                        <div class="autocomplete-list">
                            {sugg.into_iter().enumerate().map(|(i, (id, label))| {
                                let text = label.clone();
                                view! {
                                    <button
                                        type="button"
                                        class=if i == selected { "autocomplete-item selected" } else { "autocomplete-item" }
                                        on:mousedown=move |ev| {
                                            ev.prevent_default();
                                            choose((id, label.clone()));
                                        }
                                    >
                                        {text}
                                    </button>
                                }
                            }).collect_view()}
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<(u32, String)> {
        vec![
            (1, "Faber-Castell".to_string()),
            (2, "Prismacolor".to_string()),
            (3, "Caran d'Ache".to_string()),
            (4, "Derwent".to_string()),
        ]
    }

    #[test]
    fn test_fuzzy_match() {
        assert!(fuzzy_match("pc", "Prismacolor"));
        assert!(fuzzy_match("", "anything"));
        assert!(!fuzzy_match("zz", "Prismacolor"));
        assert!(fuzzy_match("FC", "faber-castell"));
    }

    #[test]
    fn test_prefix_matches_first() {
        let ids: Vec<u32> = suggestions("c", &options(), 8).into_iter().map(|(id, _)| id).collect();
        // "Caran d'Ache" starts with c; the others only contain it
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_suggestions_capped() {
        let many: Vec<(u32, String)> = (0..20).map(|i| (i, format!("Pencil {}", i))).collect();
        assert_eq!(suggestions("pen", &many, MAX_SUGGESTIONS).len(), MAX_SUGGESTIONS);
        assert_eq!(suggestions("", &options(), MAX_SUGGESTIONS).len(), 4);
    }
}
