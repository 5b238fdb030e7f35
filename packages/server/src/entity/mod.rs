pub mod achievement;
