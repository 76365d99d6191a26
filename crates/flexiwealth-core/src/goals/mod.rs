pub mod crorepati;
pub mod inflation;
pub mod timeline;
