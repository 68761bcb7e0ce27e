use gloo::timers::callback::Timeout;
use pocket_budget_core::Notice;
use yew::prelude::*;

const DISMISS_AFTER_MS: u32 = 5_000;

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub notice: Option<Notice>,
    pub on_dismiss: Callback<()>,
}

#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    {
        // Each new notice restarts the timer; dropping the Timeout cancels it
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with(props.notice.clone(), move |notice| {
            let timeout = notice
                .is_some()
                .then(|| Timeout::new(DISMISS_AFTER_MS, move || on_dismiss.emit(())));
            move || drop(timeout)
        });
    }

    let Some(notice) = props.notice.as_ref() else {
        return html! {};
    };

    let onclick = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_| on_dismiss.emit(()))
    };

    html! {
        <div class={classes!("toast", if notice.is_error() { "error" } else { "info" })} role="status">
            <div class="toast-body">
                <strong class="toast-title">{&notice.title}</strong>
                <p class="toast-message">{&notice.message}</p>
            </div>
            <button class="toast-close" {onclick} aria-label="Dismiss">{"×"}</button>
        </div>
    }
}
