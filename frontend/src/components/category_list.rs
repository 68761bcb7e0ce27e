use rust_decimal::Decimal;
use shared::CategorySpending;
use yew::prelude::*;

use crate::services::format::{bar_width, format_money, format_percentage};

#[derive(Properties, PartialEq)]
pub struct CategoryListProps {
    pub spending: Vec<CategorySpending>,
}

#[function_component(CategoryList)]
pub fn category_list(props: &CategoryListProps) -> Html {
    html! {
        <section class="category-section">
            <h2>{"Spending by Category"}</h2>
            <ul class="category-list">
                {for props.spending.iter().map(|entry| {
                    let over = entry.percentage > Decimal::ONE_HUNDRED;
                    html! {
                        <li class="category-row">
                            <div class="category-heading">
                                <span class="category-name">{&entry.category}</span>
                                <span class="category-amounts">
                                    {format!("{} / {}", format_money(entry.spent), format_money(entry.limit))}
                                </span>
                            </div>
                            <div class="progress">
                                <div
                                    class={classes!("progress-bar", over.then_some("over-budget"))}
                                    style={format!("width: {}", bar_width(entry.percentage))}
                                />
                            </div>
                            <span class="category-percentage">{format_percentage(entry.percentage)}</span>
                        </li>
                    }
                })}
            </ul>
        </section>
    }
}
