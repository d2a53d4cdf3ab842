use crate::domain::a001_page::ui::details::PageEdit;
use crate::shared::api_utils::query_param;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let page_id = query_param("id");
    log::info!("Opening page editor for {:?}", page_id);

    match page_id {
        Some(id) => view! { <PageEdit id=id /> }.into_any(),
        None => view! {
            <div class="details-container">
                <div class="error">"Не указан id страницы (?id=...)"</div>
            </div>
        }
        .into_any(),
    }
}
