pub mod dbstore;
