use leptos::*;

use crate::workflow::Notice;

#[component]
pub fn NoticeBanner(notice: Notice) -> impl IntoView {
    let class = if notice.is_error() {
        "notice notice-error"
    } else {
        "notice notice-success"
    };

    view! {
        <div class=class role="status">{notice.message()}</div>
    }
}
