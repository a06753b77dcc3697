pub mod filter;
pub mod option;
pub mod organization;
pub mod role;
