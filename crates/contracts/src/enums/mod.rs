pub mod order_status;
pub mod product_category;
pub mod user_role;
