pub mod neopool;
