pub mod run;
pub mod show;
pub mod version;
