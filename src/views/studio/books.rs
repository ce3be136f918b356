//! Books Tab

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::books;
use crate::components::DeleteConfirmButton;
use crate::context::AppContext;
use crate::models::Book;
use crate::validation;

#[component]
pub fn BooksTab() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (list, set_list) = signal(Vec::<Book>::new());
    let (title, set_title) = signal(String::new());
    let (author, set_author) = signal(String::new());
    let (form_error, set_form_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match books::get_all().await {
                Ok(loaded) => set_list.set(loaded),
                Err(e) => ctx.report("BOOKS", &e),
            }
        });
    });

    let add_book = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = match validation::book(&title.get_untracked(), &author.get_untracked()) {
            Ok(payload) => payload,
            Err(e) => {
                set_form_error.set(Some(e.to_string()));
                return;
            }
        };
        set_form_error.set(None);
        spawn_local(async move {
            match books::create(&payload).await {
                Ok(book) => {
                    set_list.update(|l| l.push(book));
                    set_title.set(String::new());
                    set_author.set(String::new());
                }
                Err(e) => ctx.report("BOOKS", &e),
            }
        });
    };

    let remove = move |id: u32| {
        spawn_local(async move {
            match books::delete(id).await {
                Ok(()) => set_list.update(|l| l.retain(|b| b.id != id)),
                Err(e) => ctx.report("BOOKS", &e),
            }
        });
    };

    view! {
        <div class="books-tab">
            <form class="inline-form" on:submit=add_book>
                <input type="text" placeholder="Title" prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev)) />
                <input type="text" placeholder="Author (optional)" prop:value=move || author.get()
                    on:input=move |ev| set_author.set(event_target_value(&ev)) />
                <button type="submit">"Add"</button>
            </form>
            {move || form_error.get().map(|msg| view! { <div class="inline-error">{msg}</div> })}
            <ul class="card-list">
                <For
                    each=move || list.get()
                    key=|b| b.id
                    children=move |book| {
                        let id = book.id;
                        view! {
                            <li class="card book-card">
                                <span class="card-title">{book.title.clone()}</span>
                                {book.author.clone().map(|a| view! { <span class="card-meta">{a}</span> })}
                                <DeleteConfirmButton button_class="delete-btn" on_confirm=move |_| remove(id) />
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}
