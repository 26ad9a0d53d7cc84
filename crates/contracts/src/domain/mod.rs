pub mod a001_sale_record;
