use shared::{Transaction, TransactionKind};
use yew::prelude::*;

use crate::services::format::{format_date, format_money};

#[derive(Properties, PartialEq)]
pub struct TransactionTableProps {
    /// Newest first
    pub transactions: Vec<Transaction>,
}

#[function_component(TransactionTable)]
pub fn transaction_table(props: &TransactionTableProps) -> Html {
    html! {
        <section class="transactions-section">
            <h2>{"Recent Transactions"}</h2>

            {if props.transactions.is_empty() {
                html! { <div class="empty">{"No transactions yet"}</div> }
            } else {
                html! {
                    <div class="table-container">
                        <table class="transactions-table">
                            <thead>
                                <tr>
                                    <th>{"Date"}</th>
                                    <th>{"Description"}</th>
                                    <th>{"Category"}</th>
                                    <th>{"Amount"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {for props.transactions.iter().map(|transaction| {
                                    let (amount_class, sign) = match transaction.kind {
                                        TransactionKind::Expense => ("amount negative", "-"),
                                        TransactionKind::Income => ("amount positive", "+"),
                                    };

                                    html! {
                                        <tr key={transaction.id.clone()}>
                                            <td class="date">{format_date(transaction.date)}</td>
                                            <td class="description">
                                                {&transaction.description}
                                                {if transaction.receipt.is_some() {
                                                    html! { <span class="receipt-badge" title="Receipt attached">{"🧾"}</span> }
                                                } else { html! {} }}
                                            </td>
                                            <td class="category">{&transaction.category}</td>
                                            <td class={amount_class}>
                                                {format!("{}{}", sign, format_money(transaction.amount))}
                                            </td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                    </div>
                }
            }}
        </section>
    }
}
