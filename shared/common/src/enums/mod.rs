pub mod order_book_type;
pub mod side;
pub mod trader_event;
