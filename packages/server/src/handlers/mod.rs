pub mod achievement;
pub mod pages;
