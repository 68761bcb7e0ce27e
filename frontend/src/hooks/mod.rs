pub mod use_budget;
