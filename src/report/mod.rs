pub mod issue;
pub mod json;
pub mod merger;
pub mod run;
pub mod terminal;
