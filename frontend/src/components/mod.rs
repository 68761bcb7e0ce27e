pub mod category_list;
pub mod forms;
pub mod header;
pub mod overview;
pub mod toast;
pub mod transactions;
