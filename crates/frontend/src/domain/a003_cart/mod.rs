pub mod api;
pub mod checkout;
pub mod context;
pub mod state;
pub mod storage;
pub mod ui;
