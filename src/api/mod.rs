pub mod sth;
