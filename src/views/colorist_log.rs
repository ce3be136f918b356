//! Colorist Log View
//!
//! Calendar journal. Days with entries are marked; picking a day lists its
//! entries and opens the entry form for that date.

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::journal_entries::{self, JournalEntryArgs};
use crate::api::{books, color_combos, color_palettes, colored_pencil_sets, inspiration};
use crate::calendar::{self, JournalCalendar};
use crate::components::{toggle_id, ColorGrid, DeleteConfirmButton, PickedSet, SetPicker, Swatch};
use crate::context::AppContext;
use crate::journal;
use crate::markdown;
use crate::models::{Book, ColorCombo, ColorPalette, Inspiration, JournalEntry, Pencil};
use crate::validation;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Lookup lists the form and entry cards draw names from
#[derive(Clone, Copy)]
struct Lookups {
    inspirations: ReadSignal<Vec<Inspiration>>,
    books: ReadSignal<Vec<Book>>,
    palettes: ReadSignal<Vec<ColorPalette>>,
    combos: ReadSignal<Vec<ColorCombo>>,
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[component]
pub fn ColoristLogView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let cal = RwSignal::new(JournalCalendar::new(today()));
    let (entries, set_entries) = signal(Vec::<JournalEntry>::new());
    // None: form closed, Some(None): new entry, Some(Some(id)): editing
    let (form, set_form) = signal::<Option<Option<JournalEntry>>>(None);

    let (inspirations, set_inspirations) = signal(Vec::<Inspiration>::new());
    let (book_list, set_book_list) = signal(Vec::<Book>::new());
    let (palettes, set_palettes) = signal(Vec::<ColorPalette>::new());
    let (combos, set_combos) = signal(Vec::<ColorCombo>::new());
    let lookups = Lookups { inspirations, books: book_list, palettes, combos };

    // Entry markers and lookup lists
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match journal_entries::get_dates().await {
                Ok(dates) => {
                    log::debug!("[LOG] {} dates with entries", dates.len());
                    cal.update(|c| c.set_dates(dates));
                }
                Err(e) => ctx.report("LOG", &e),
            }
            match inspiration::get_all().await {
                Ok(list) => set_inspirations.set(list),
                Err(e) => ctx.report("LOG", &e),
            }
            match books::get_all().await {
                Ok(list) => set_book_list.set(list),
                Err(e) => ctx.report("LOG", &e),
            }
            match color_palettes::get_all().await {
                Ok(list) => set_palettes.set(list),
                Err(e) => ctx.report("LOG", &e),
            }
            match color_combos::get_all().await {
                Ok(list) => set_combos.set(list),
                Err(e) => ctx.report("LOG", &e),
            }
        });
    });

    // Entries of the selected day
    let selected_iso = Memo::new(move |_| cal.with(|c| c.selected_iso()));
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let iso = selected_iso.get();
        spawn_local(async move {
            match journal_entries::get_by_date(&iso).await {
                Ok(list) => {
                    // The day may have changed while this was in flight
                    if selected_iso.get_untracked() == iso {
                        set_entries.set(journal::entries_on(&list, &iso));
                    }
                }
                Err(e) => ctx.report("LOG", &e),
            }
        });
    });

    let on_saved = move |entry: JournalEntry| {
        if let Some(date) = calendar::parse_iso(entry.date.get(..10).unwrap_or(&entry.date)) {
            cal.update(|c| c.mark_date(date));
        }
        set_entries.update(|list| {
            match list.iter_mut().find(|e| e.id == entry.id) {
                Some(existing) => *existing = entry,
                None => list.insert(0, entry),
            }
        });
        set_form.set(None);
    };

    let remove = move |id: u32| {
        spawn_local(async move {
            match journal_entries::delete(id).await {
                Ok(()) => {
                    log::info!("[LOG] Deleted entry {}", id);
                    set_entries.update(|list| list.retain(|e| e.id != id));
                    if entries.with_untracked(|l| l.is_empty()) {
                        let date = cal.with_untracked(|c| c.selected());
                        cal.update(|c| c.unmark_date(date));
                    }
                }
                Err(e) => ctx.report("LOG", &e),
            }
        });
    };

    view! {
        <section class="colorist-log">
            <h1>"Colorist log"</h1>
            <div class="log-layout">
                <CalendarPanel cal=cal on_pick=Callback::new(move |_| set_form.set(None)) />
                <div class="day-panel">
                    <div class="day-header">
                        <h2>{move || cal.with(|c| c.selected().format("%A, %B %-d, %Y").to_string())}</h2>
                        <button class="primary-btn" on:click=move |_| set_form.set(Some(None))>"New entry"</button>
                    </div>
                    {move || form.get().map(|existing| {
                        let date = selected_iso.get_untracked();
                        view! {
                            <JournalForm
                                existing=existing
                                date=date
                                lookups=lookups
                                on_saved=Callback::new(on_saved)
                                on_cancel=Callback::new(move |_| set_form.set(None))
                            />
                        }
                    })}
                    <Show
                        when=move || entries.with(|l| !l.is_empty())
                        fallback=|| view! { <div class="empty-message">"No entries for this day"</div> }
                    >
                        <ul class="entry-list">
                            <For
                                each=move || entries.get()
                                key=|e| (e.id, e.notes.clone(), e.pencils.len(), e.combos.len(), e.palettes.len())
                                children=move |entry| {
                                    let id = entry.id;
                                    let for_edit = entry.clone();
                                    view! {
                                        <li class="card entry-card">
                                            <EntrySummary entry=entry lookups=lookups />
                                            <div class="entry-actions">
                                                <button class="link-btn" on:click=move |_| set_form.set(Some(Some(for_edit.clone())))>"Edit"</button>
                                                <DeleteConfirmButton button_class="delete-btn" prompt="Delete entry?" on_confirm=move |_| remove(id) />
                                            </div>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    </Show>
                </div>
            </div>
        </section>
    }
}

#[component]
fn CalendarPanel(cal: RwSignal<JournalCalendar>, on_pick: Callback<NaiveDate>) -> impl IntoView {
    view! {
        <div id="journal-calendar" class="calendar">
            <div class="calendar-header">
                <button class="link-btn" on:click=move |_| cal.update(|c| c.prev_month())>"‹"</button>
                <span class="calendar-title">{move || cal.with(|c| c.month_title())}</span>
                <button class="link-btn" on:click=move |_| cal.update(|c| c.next_month())>"›"</button>
                <button class="link-btn" on:click=move |_| {
                    let day = today();
                    cal.update(|c| c.select(day));
                    on_pick.run(day);
                }>"Today"</button>
            </div>
            <table class="calendar-grid">
                <thead>
                    <tr>{WEEKDAYS.iter().map(|d| view! { <th>{*d}</th> }).collect_view()}</tr>
                </thead>
                <tbody>
                    {move || cal.with(|c| c.month_grid()).into_iter().map(|week| view! {
                        <tr>
                            {week.into_iter().map(|day| match day {
                                None => view! { <td class="calendar-day empty"></td> }.into_any(),
                                Some(date) => {
                                    let class = move || {
                                        let mut class = String::from("calendar-day");
                                        if cal.with(|c| c.has_entry(date)) { class.push_str(" has-entry"); }
                                        if cal.with(|c| c.selected() == date) { class.push_str(" selected"); }
                                        class
                                    };
                                    view! {
                                        <td class=class on:click=move |_| {
                                            cal.update(|c| c.select(date));
                                            on_pick.run(date);
                                        }>
                                            {date.format("%-d").to_string()}
                                        </td>
                                    }.into_any()
                                }
                            }).collect_view()}
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn EntrySummary(entry: JournalEntry, lookups: Lookups) -> impl IntoView {
    let inspiration_title = entry.inspiration_id.and_then(|id| {
        lookups.inspirations.with_untracked(|l| l.iter().find(|i| i.id == id).map(|i| i.title.clone()))
    });
    let book_title = entry.book_id.and_then(|id| {
        lookups.books.with_untracked(|l| l.iter().find(|b| b.id == id).map(|b| b.title.clone()))
    });
    let notes_html = entry.notes.as_deref().map(markdown::render_notes);

    view! {
        <div class="entry-summary">
            <div class="entry-meta">{journal::summarize(&entry)}</div>
            {inspiration_title.map(|t| view! { <div class="entry-link">"Inspiration: " {t}</div> })}
            {book_title.map(|t| view! { <div class="entry-link">"Book: " {t}</div> })}
            {notes_html.map(|html| view! { <div class="entry-notes markdown" inner_html=html></div> })}
        </div>
    }
}

/// Link a different set, or none; pencils of the old set no longer apply
fn link_set(args: &mut JournalEntryArgs, set_id: Option<u32>) {
    if args.colored_pencil_set_id != set_id {
        args.pencils.clear();
    }
    args.colored_pencil_set_id = set_id;
}

fn parse_optional_id(value: &str) -> Option<u32> {
    value.parse::<u32>().ok()
}

#[component]
fn JournalForm(
    existing: Option<JournalEntry>,
    date: String,
    lookups: Lookups,
    on_saved: Callback<JournalEntry>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let editing_id = existing.as_ref().map(|e| e.id);
    let initial = existing
        .as_ref()
        .map(JournalEntryArgs::from)
        .unwrap_or_else(|| JournalEntryArgs { date, ..Default::default() });

    let args = RwSignal::new(initial);
    let (set_pencils, set_set_pencils) = signal(Vec::<Pencil>::new());
    let (form_error, set_form_error) = signal::<Option<String>>(None);
    let (preview, set_preview) = signal(false);

    let load_set_pencils = move |set_id: u32| {
        spawn_local(async move {
            match colored_pencil_sets::get_by_id(set_id).await {
                Ok(set) => set_set_pencils.set(set.pencils.unwrap_or_default()),
                Err(e) => ctx.report("LOG", &e),
            }
        });
    };
    if let Some(set_id) = args.with_untracked(|a| a.colored_pencil_set_id) {
        load_set_pencils(set_id);
    }

    let pencil_swatches = Signal::derive(move || set_pencils.with(|p| p.iter().map(Swatch::from).collect::<Vec<_>>()));
    let selected_pencils = Signal::derive(move || args.with(|a| a.pencils.clone()));
    let visible_combos = Memo::new(move |_| {
        let set_ids: Vec<u32> = set_pencils.with(|p| p.iter().map(|x| x.id).collect());
        let picked = args.with(|a| a.pencils.clone());
        lookups.combos.with(|all| journal::filter_combos(all, &set_ids, &picked))
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = match validation::journal_entry(args.get_untracked()) {
            Ok(payload) => payload,
            Err(e) => {
                set_form_error.set(Some(e.to_string()));
                return;
            }
        };
        set_form_error.set(None);
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => journal_entries::update(id, &payload).await,
                None => journal_entries::create(&payload).await,
            };
            match result {
                Ok(entry) => {
                    log::info!("[LOG] Saved entry {} on {}", entry.id, entry.date);
                    on_saved.run(entry);
                }
                Err(e) => ctx.report("LOG", &e),
            }
        });
    };

    view! {
        <form class="journal-form" on:submit=on_submit>
            <label class="field-row">
                "Inspiration "
                <select on:change=move |ev| {
                    let id = parse_optional_id(&event_target_value(&ev));
                    args.update(|a| a.inspiration_id = id);
                }>
                    <option value="">"None"</option>
                    {move || lookups.inspirations.get().into_iter().map(|i| {
                        let id = i.id;
                        view! {
                            <option value=id.to_string() selected=move || args.with(|a| a.inspiration_id == Some(id))>
                                {i.title}
                            </option>
                        }
                    }).collect_view()}
                </select>
            </label>
            <label class="field-row">
                "Book "
                <select on:change=move |ev| {
                    let id = parse_optional_id(&event_target_value(&ev));
                    args.update(|a| a.book_id = id);
                }>
                    <option value="">"None"</option>
                    {move || lookups.books.get().into_iter().map(|b| {
                        let id = b.id;
                        view! {
                            <option value=id.to_string() selected=move || args.with(|a| a.book_id == Some(id))>
                                {b.title}
                            </option>
                        }
                    }).collect_view()}
                </select>
            </label>
            <SetPicker
                label="Pencil set"
                on_select={move |pick: Option<PickedSet>| {
                    let set_id = pick.map(|p| p.selection.set_id);
                    args.update(|a| link_set(a, set_id));
                    match set_id {
                        Some(id) => load_set_pencils(id),
                        None => set_set_pencils.set(Vec::new()),
                    }
                }}
            />
            <Show when=move || set_pencils.with(|p| !p.is_empty())>
                <h3 class="section-title">"Pencils used"</h3>
                <ColorGrid
                    swatches=pencil_swatches
                    selected=selected_pencils
                    on_toggle=Callback::new(move |id: u32| args.update(|a| toggle_id(&mut a.pencils, id)))
                    filterable=true
                />
            </Show>
            <h3 class="section-title">"Palettes"</h3>
            <div class="check-list">
                {move || lookups.palettes.get().into_iter().map(|p| {
                    let id = p.id;
                    view! {
                        <label class="checkbox-row">
                            <input
                                type="checkbox"
                                prop:checked=move || args.with(|a| a.palettes.contains(&id))
                                on:change=move |_| args.update(|a| toggle_id(&mut a.palettes, id))
                            />
                            {p.title}
                        </label>
                    }
                }).collect_view()}
            </div>
            <h3 class="section-title">"Combos"</h3>
            <div class="check-list">
                {move || visible_combos.get().into_iter().map(|c| {
                    let id = c.id;
                    view! {
                        <label class="checkbox-row">
                            <input
                                type="checkbox"
                                prop:checked=move || args.with(|a| a.combos.contains(&id))
                                on:change=move |_| args.update(|a| toggle_id(&mut a.combos, id))
                            />
                            {c.title}
                        </label>
                    }
                }).collect_view()}
            </div>
            <div class="notes-header">
                <h3 class="section-title">"Notes"</h3>
                <button type="button" class="link-btn" on:click=move |_| set_preview.update(|p| *p = !*p)>
                    {move || if preview.get() { "Edit" } else { "Preview" }}
                </button>
            </div>
            {move || if preview.get() {
                let html = markdown::render_notes(&args.with(|a| a.notes.clone().unwrap_or_default()));
                view! { <div class="entry-notes markdown" inner_html=html></div> }.into_any()
            } else {
                view! {
                    <textarea
                        class="notes-input"
                        rows="6"
                        placeholder="Markdown; [[#c8102e]] shows a swatch"
                        prop:value=move || args.with(|a| a.notes.clone().unwrap_or_default())
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            args.update(|a| a.notes = Some(text));
                        }
                    ></textarea>
                }.into_any()
            }}
            {move || form_error.get().map(|msg| view! { <div class="inline-error">{msg}</div> })}
            <div class="form-actions">
                <button type="button" class="secondary-btn" on:click=move |_| on_cancel.run(())>"Cancel"</button>
                <button type="submit" class="primary-btn">{if editing_id.is_some() { "Save changes" } else { "Add entry" }}</button>
            </div>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optional_id() {
        assert_eq!(parse_optional_id("12"), Some(12));
        assert_eq!(parse_optional_id(""), None);
        assert_eq!(parse_optional_id("none"), None);
    }

    #[test]
    fn test_link_set_drops_pencils_of_old_set() {
        let mut args = JournalEntryArgs {
            date: "2024-05-01".to_string(),
            colored_pencil_set_id: Some(4),
            pencils: vec![10, 11],
            ..Default::default()
        };
        link_set(&mut args, Some(4));
        assert_eq!(args.pencils, vec![10, 11]);

        link_set(&mut args, None);
        assert_eq!(args.colored_pencil_set_id, None);
        assert!(args.pencils.is_empty());

        args.pencils.push(20);
        link_set(&mut args, Some(7));
        assert_eq!(args.colored_pencil_set_id, Some(7));
        assert!(args.pencils.is_empty());
    }
}
