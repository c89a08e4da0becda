pub mod spotify;
