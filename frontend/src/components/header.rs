use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub syncing: bool,
    pub on_refresh: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let onclick = {
        let on_refresh = props.on_refresh.clone();
        Callback::from(move |_| on_refresh.emit(()))
    };

    html! {
        <header class="header">
            <div class="container">
                <h1>{"Pocket Budget"}</h1>
                <div class="header-right">
                    <span class={classes!("sync-status", props.syncing.then_some("syncing"))}>
                        {if props.syncing { "Syncing..." } else { "Up to date" }}
                    </span>
                    <button class="btn btn-secondary" {onclick} disabled={props.syncing}>
                        {"Refresh"}
                    </button>
                </div>
            </div>
        </header>
    }
}
