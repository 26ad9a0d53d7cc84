pub mod business_info;
