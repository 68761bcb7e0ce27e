use shared::BudgetSummary;
use yew::prelude::*;

use crate::services::format::format_money;

#[derive(Properties, PartialEq)]
pub struct OverviewCardsProps {
    pub summary: BudgetSummary,
}

#[function_component(OverviewCards)]
pub fn overview_cards(props: &OverviewCardsProps) -> Html {
    let summary = &props.summary;
    let cards = [
        ("Total Budget", format_money(summary.total_budget), "budget"),
        ("Total Spent", format_money(summary.total_spent), "spent"),
        ("Remaining", format_money(summary.remaining), "remaining"),
        ("Average Daily", format_money(summary.average_daily), "daily"),
    ];

    html! {
        <section class="overview-cards">
            {for cards.into_iter().map(|(label, value, class)| html! {
                <div class={classes!("overview-card", class)}>
                    <span class="card-label">{label}</span>
                    <span class="card-value">{value}</span>
                </div>
            })}
            <div class="overview-card count">
                <span class="card-label">{"Transactions"}</span>
                <span class="card-value">{summary.transaction_count}</span>
            </div>
        </section>
    }
}
