pub mod contact;
pub mod customer;
pub mod order;
pub mod sales;

pub use contact::{ContactMessage, NewContactMessage};
pub use customer::{Customer, NewCustomer};
pub use order::{FoodOrder, NewOrder, QuoteRequest};
pub use sales::{NewSalesRequest, SalesItem, SalesRequest};
