//! Inspirations Tab
//!
//! Saved YouTube videos and reference images.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::inspiration;
use crate::components::DeleteConfirmButton;
use crate::context::AppContext;
use crate::media;
use crate::models::{Inspiration, InspirationKind};
use crate::validation;

/// Thumbnail URL for the list card
pub fn preview_url(item: &Inspiration) -> Option<String> {
    match item.kind {
        InspirationKind::Video => item.embed_id.as_deref().map(media::youtube_thumbnail_url),
        InspirationKind::File => item.path.clone(),
    }
}

#[component]
pub fn InspirationsTab() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (items, set_items) = signal(Vec::<Inspiration>::new());
    let (kind, set_kind) = signal(InspirationKind::Video);
    let (title, set_title) = signal(String::new());
    let (source, set_source) = signal(String::new());
    let (form_error, set_form_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match inspiration::get_all().await {
                Ok(loaded) => set_items.set(loaded),
                Err(e) => ctx.report("INSPIRATION", &e),
            }
        });
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = match validation::inspiration(kind.get_untracked(), &title.get_untracked(), &source.get_untracked()) {
            Ok(payload) => payload,
            Err(e) => {
                set_form_error.set(Some(e.to_string()));
                return;
            }
        };
        set_form_error.set(None);
        spawn_local(async move {
            match inspiration::create(&payload).await {
                Ok(created) => {
                    log::info!("[INSPIRATION] Created {}", created.id);
                    set_items.update(|l| l.push(created));
                    set_title.set(String::new());
                    set_source.set(String::new());
                }
                Err(e) => ctx.report("INSPIRATION", &e),
            }
        });
    };

    let remove = move |id: u32| {
        spawn_local(async move {
            match inspiration::delete(id).await {
                Ok(()) => set_items.update(|l| l.retain(|i| i.id != id)),
                Err(e) => ctx.report("INSPIRATION", &e),
            }
        });
    };

    view! {
        <div class="inspirations-tab">
            <form class="inline-form" on:submit=on_submit>
                <select on:change=move |ev| {
                    set_kind.set(if event_target_value(&ev) == "file" { InspirationKind::File } else { InspirationKind::Video });
                }>
                    <option value="video" selected=move || kind.get() == InspirationKind::Video>"Video"</option>
                    <option value="file" selected=move || kind.get() == InspirationKind::File>"Image"</option>
                </select>
                <input type="text" placeholder="Title" prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev)) />
                <input
                    type="text"
                    placeholder=move || match kind.get() {
                        InspirationKind::Video => "YouTube link or id",
                        InspirationKind::File => "Image URL",
                    }
                    prop:value=move || source.get()
                    on:input=move |ev| set_source.set(event_target_value(&ev))
                />
                <button type="submit">"Add"</button>
            </form>
            {move || form_error.get().map(|msg| view! { <div class="inline-error">{msg}</div> })}
            <ul class="card-list inspiration-list">
                <For
                    each=move || items.get()
                    key=|i| i.id
                    children=move |item| {
                        let id = item.id;
                        let preview = preview_url(&item);
                        view! {
                            <li class="card inspiration-card">
                                {preview.map(|src| view! { <img class="inspiration-thumb" src=src alt="" /> })}
                                <span class="card-title">{item.title.clone()}</span>
                                <span class="card-meta">{match item.kind {
                                    InspirationKind::Video => "Video",
                                    InspirationKind::File => "Image",
                                }}</span>
                                <DeleteConfirmButton button_class="delete-btn" on_confirm=move |_| remove(id) />
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_url() {
        let video = Inspiration {
            id: 1,
            kind: InspirationKind::Video,
            title: "Roses".into(),
            embed_id: Some("dQw4w9WgXcQ".into()),
            path: None,
        };
        assert_eq!(preview_url(&video).as_deref(), Some("https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg"));

        let file = Inspiration { id: 2, kind: InspirationKind::File, title: "Page".into(), embed_id: None, path: Some("/img/p.jpg".into()) };
        assert_eq!(preview_url(&file).as_deref(), Some("/img/p.jpg"));
    }
}
